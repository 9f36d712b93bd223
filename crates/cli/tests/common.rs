// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command as StdCommand, Stdio};
use std::time::{Duration, Instant};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// A valid device id derived from a short tag.
pub fn device_id(tag: &str) -> String {
    format!("{:_<32}", tag)
}

/// Isolated config, cache and state directories for one test.
pub struct Sandbox {
    pub temp: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.temp.path().join("cache")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.temp.path().join("state")
    }

    pub fn socket_path(&self) -> PathBuf {
        self.state_dir().join("bus.sock")
    }

    pub fn log(&self) -> String {
        fs::read_to_string(self.state_dir().join("daemon.log")).unwrap_or_default()
    }

    /// Remember devices in the settings store before the daemon starts.
    pub fn remember(&self, ids: &[String]) {
        fs::create_dir_all(self.config_dir()).unwrap();
        let list = ids
            .iter()
            .map(|id| format!("\"{}\"", id))
            .collect::<Vec<_>>()
            .join(", ");
        fs::write(
            self.config_dir().join("settings.toml"),
            format!("name = \"laptop\"\ndevices = [{}]\n", list),
        )
        .unwrap();
    }

    fn apply_env(&self, cmd: &mut StdCommand) {
        cmd.env("TETHER_CONFIG_DIR", self.config_dir())
            .env("TETHER_CACHE_DIR", self.cache_dir())
            .env("TETHER_STATE_DIR", self.state_dir())
            .env_remove("RUST_LOG");
    }

    /// The `tether` binary running inside this sandbox.
    pub fn tether(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("tether");
        cmd.env("TETHER_CONFIG_DIR", self.config_dir())
            .env("TETHER_CACHE_DIR", self.cache_dir())
            .env("TETHER_STATE_DIR", self.state_dir())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Start a primary instance in the background and wait for its socket.
    pub fn spawn_primary(&self) -> Child {
        let mut cmd = StdCommand::new(env!("CARGO_BIN_EXE_tether"));
        self.apply_env(&mut cmd);
        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        while std::os::unix::net::UnixStream::connect(self.socket_path()).is_err() {
            assert!(Instant::now() < deadline, "primary did not start");
            std::thread::sleep(Duration::from_millis(20));
        }
        child
    }

    /// Ask the primary to quit and wait for it to exit.
    pub fn stop_primary(&self, mut child: Child) -> std::process::ExitStatus {
        tether_ipc::BusClient::new(self.socket_path()).quit().unwrap();
        child.wait().unwrap()
    }
}
