// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration and directory resolution.
//!
//! Configuration is read from `config.toml` in the config directory:
//! - `call_timeout_secs`: bound on each call to the primary instance (default 25)
//! - `notification_app_name`: app name on notifications sent with `--notification`
//!
//! Each directory is taken from its command-line override, then the
//! `TETHER_*_DIR` variable, then the XDG base directory, then the platform
//! default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tether_core::Paths;
use tether_ipc::{CallOptions, CancelToken};

use crate::env;
use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "tether";

fn default_call_timeout_secs() -> u64 {
    tether_ipc::DEFAULT_CALL_TIMEOUT.as_secs()
}

fn default_notification_app_name() -> String {
    "Tether CLI".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
    #[serde(default = "default_notification_app_name")]
    pub notification_app_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            call_timeout_secs: default_call_timeout_secs(),
            notification_app_name: default_notification_app_name(),
        }
    }
}

impl Config {
    /// Loads configuration from the given config directory. A missing file
    /// yields defaults.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if config.call_timeout_secs == 0 {
            return Err(Error::Config(
                "call_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Options for calls to the primary, abandoned once `cancel` fires.
    pub fn call_options(&self, cancel: CancelToken) -> CallOptions {
        CallOptions {
            timeout: Some(self.call_timeout()),
            cancel: Some(cancel),
        }
    }
}

/// Directory overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct DirOverrides {
    pub config_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
}

fn resolve_dir(
    what: &str,
    flag: Option<&PathBuf>,
    var: Option<PathBuf>,
    xdg: Option<PathBuf>,
    platform: Option<PathBuf>,
    home_relative: &str,
) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.clone());
    }
    if let Some(dir) = var {
        return Ok(dir);
    }
    if let Some(dir) = xdg.or(platform) {
        return Ok(dir.join(APP_DIR_NAME));
    }
    dirs::home_dir()
        .map(|home| home.join(home_relative).join(APP_DIR_NAME))
        .ok_or_else(|| Error::Config(format!("cannot determine the {} directory", what)))
}

/// Resolve the config, cache and state directories.
pub fn resolve_paths(overrides: &DirOverrides) -> Result<Paths> {
    Ok(Paths {
        config_dir: resolve_dir(
            "config",
            overrides.config_dir.as_ref(),
            env::config_dir(),
            env::xdg_config_home(),
            dirs::config_dir(),
            ".config",
        )?,
        cache_dir: resolve_dir(
            "cache",
            overrides.cache_dir.as_ref(),
            env::cache_dir(),
            env::xdg_cache_home(),
            dirs::cache_dir(),
            ".cache",
        )?,
        state_dir: resolve_dir(
            "state",
            overrides.state_dir.as_ref(),
            env::state_dir(),
            env::xdg_state_home(),
            dirs::state_dir(),
            ".local/state",
        )?,
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
