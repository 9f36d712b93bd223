// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by the `tether` command line.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing {missing} option\n  hint: {given} requires {missing}")]
    MissingRequiredOption {
        given: &'static str,
        missing: &'static str,
    },

    #[error("failed to register {name}: {reason}")]
    BusRegistration { name: &'static str, reason: String },

    #[error(transparent)]
    Bus(#[from] tether_ipc::BusError),

    #[error("daemon error: {0}")]
    Daemon(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] tether_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
