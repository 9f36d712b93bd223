// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Directory layout of one daemon instance.

use std::path::PathBuf;

use tether_ipc::BusPaths;

use crate::identity::IdentityFiles;
use crate::settings::SETTINGS_FILE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Settings, certificate and private key.
    pub config_dir: PathBuf,
    /// Per-device caches.
    pub cache_dir: PathBuf,
    /// Bus socket, lock, PID and log files.
    pub state_dir: PathBuf,
}

impl Paths {
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn identity(&self) -> IdentityFiles {
        IdentityFiles::in_dir(&self.config_dir)
    }

    pub fn device_cache_dir(&self, id: &str) -> PathBuf {
        self.cache_dir.join(id)
    }

    pub fn bus(&self) -> BusPaths {
        BusPaths::new(&self.state_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join("daemon.log")
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
