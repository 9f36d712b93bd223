// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Returns the value of `TETHER_CONFIG_DIR` if set.
pub fn config_dir() -> Option<PathBuf> {
    path_var(vars::TETHER_CONFIG_DIR)
}

/// Returns the value of `TETHER_CACHE_DIR` if set.
pub fn cache_dir() -> Option<PathBuf> {
    path_var(vars::TETHER_CACHE_DIR)
}

/// Returns the value of `TETHER_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    path_var(vars::TETHER_STATE_DIR)
}

pub fn xdg_config_home() -> Option<PathBuf> {
    path_var(vars::XDG_CONFIG_HOME)
}

pub fn xdg_cache_home() -> Option<PathBuf> {
    path_var(vars::XDG_CACHE_HOME)
}

pub fn xdg_state_home() -> Option<PathBuf> {
    path_var(vars::XDG_STATE_HOME)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
