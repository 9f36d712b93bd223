// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tether-core operations.

use thiserror::Error;

/// All possible errors that can occur in tether-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("settings error: {0}")]
    Settings(String),

    #[error("identity error: {0}")]
    Identity(String),

    #[error("unsupported URI: {0}")]
    UnsupportedUri(String),

    #[error("unknown application action: '{0}'")]
    UnknownAppAction(String),

    #[error("invalid target for '{action}': {reason}")]
    InvalidAppTarget { action: String, reason: String },

    #[error("notification error: {0}")]
    Notification(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Envelope(#[from] tether_ipc::EnvelopeError),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Failures while resolving or activating a routed action.
///
/// These never escape the router: each one is logged and the remaining
/// devices still receive the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("device not found: {0}")]
    HandleNotFound(String),

    #[error("unknown action '{action}' for device {device}")]
    UnknownAction { device: String, action: String },

    #[error("action '{action}' on device {device} expects {expected}, got {actual}")]
    TargetTypeMismatch {
        device: String,
        action: String,
        expected: String,
        actual: String,
    },

    #[error("device {device} failed to run '{action}': {reason}")]
    Device {
        device: String,
        action: String,
        reason: String,
    },
}

/// A specialized Result type for tether-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
