// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Seam to the user-facing frontend.

use tether_ipc::TypedValue;

use crate::error::Result;
use crate::report::ErrorReport;

/// Surfaces the daemon triggers but does not implement: the URI launcher,
/// the error dialog and the device chooser.
pub trait Presenter {
    /// Open `uri` with the default handler.
    fn open_uri(&self, uri: &str) -> Result<()>;

    fn show_error(&self, report: &ErrorReport);

    /// Let the user pick a device to run `action` with `target` on.
    fn choose_device(&self, title: &str, action: &str, target: &TypedValue);
}

/// Presenter for a daemon without a frontend. Every trigger is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn open_uri(&self, uri: &str) -> Result<()> {
        tracing::info!(uri, "open uri requested");
        Ok(())
    }

    fn show_error(&self, report: &ErrorReport) {
        tracing::error!(
            name = %report.name,
            message = %report.message,
            stack = %report.stack,
            "error dialog requested"
        );
    }

    fn choose_device(&self, title: &str, action: &str, target: &TypedValue) {
        tracing::info!(title, action, ?target, "device chooser requested");
    }
}
