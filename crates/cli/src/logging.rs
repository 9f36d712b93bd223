// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup.
//!
//! The primary instance logs at `info` to `daemon.log` in the state
//! directory, falling back to stderr. A client invocation logs at `warn` to
//! stderr. `RUST_LOG` overrides either default.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::env::vars;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(vars::RUST_LOG).unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_daemon(log_path: &Path) {
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    // Try to open log file, fall back to stderr
    if let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter("info"))
            .with_writer(file)
            .with_ansi(false)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter("info"))
            .with_writer(std::io::stderr)
            .try_init();
    }
}

pub fn init_client() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}
