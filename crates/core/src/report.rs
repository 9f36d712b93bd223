// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Service-level error reporting.
//!
//! Every report is logged. It is also raised as a notification whose click
//! action (`app.error`) carries the report back as a string map, so the
//! service can open the help URL or show the error dialog.

use std::collections::BTreeMap;
use std::rc::Rc;

use tether_ipc::TypedValue;

use crate::notify::{Notification, NotificationSink, Priority};

const DEFAULT_NAME: &str = "Error";
const ERROR_ICON: &str = "dialog-error";
/// Application action a report notification activates.
pub const ERROR_ACTION: &str = "app.error";

/// A structured error record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub name: String,
    pub message: String,
    pub stack: String,
    /// Troubleshooting page, when one exists for this error.
    pub url: Option<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            message: message.into(),
            stack: String::new(),
            url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Report an error value, using its source chain as the stack.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut stack = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        Self::new(err.to_string()).with_stack(stack.join("\n"))
    }

    fn name_or_default(&self) -> &str {
        match self.name.trim() {
            "" => DEFAULT_NAME,
            name => name,
        }
    }

    /// Key under which the report's notification is shown. Reports sharing
    /// a key replace each other.
    pub fn identity_key(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => self.message.trim().to_string(),
        }
    }

    /// The report as the `app.error` action target.
    pub fn to_target(&self) -> TypedValue {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), self.name_or_default().to_string());
        map.insert("message".to_string(), self.message.trim().to_string());
        map.insert("stack".to_string(), self.stack.trim().to_string());
        if let Some(url) = &self.url {
            map.insert("url".to_string(), url.clone());
        }
        TypedValue::StringMap(map)
    }

    /// Rebuild a report from an `app.error` target.
    ///
    /// Requires a string map with at least a message.
    pub fn from_target(target: &TypedValue) -> Option<Self> {
        let map = target.as_string_map()?;
        let message = map.get("message")?;
        Some(Self {
            name: map
                .get("name")
                .cloned()
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            message: message.clone(),
            stack: map.get("stack").cloned().unwrap_or_default(),
            url: map.get("url").cloned(),
        })
    }
}

/// Build the notification for a report, with its identity key.
pub fn notification_for(report: &ErrorReport) -> (String, Notification) {
    let (body, priority) = match report.url {
        Some(_) => ("Click for help troubleshooting", Priority::Urgent),
        None => ("Click for more information", Priority::High),
    };
    let notification = Notification::new(format!("Tether: {}", report.name_or_default()), body)
        .icon(ERROR_ICON)
        .priority(priority)
        .default_action(ERROR_ACTION, report.to_target());
    (report.identity_key(), notification)
}

/// Logs error reports and raises them as notifications.
pub struct ErrorReporter {
    sink: Rc<dyn NotificationSink>,
}

impl ErrorReporter {
    pub fn new(sink: Rc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Report an error. Never fails; a sink failure is logged.
    pub fn report(&self, report: &ErrorReport) {
        tracing::error!(
            name = %report.name_or_default(),
            message = %report.message,
            stack = %report.stack,
            url = ?report.url,
            "service error"
        );

        let (id, notification) = notification_for(report);
        if let Err(e) = self.sink.send(&id, notification) {
            tracing::error!(error = %e, "failed to raise error notification");
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
