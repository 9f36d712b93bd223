// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::Parser;

use crate::config::DirOverrides;

const EXAMPLES_HELP: &str = "\
Examples:
  tether                                   Start the daemon
  tether -l                                List connected, paired devices
  tether -d <id> --ping                    Ping a device
  tether -d <id> --message +15551234 --message-body hi
                                           Send an SMS through a device
  tether -d <id> --share-file ~/a.pdf      Share a file
  tether sms:+15551234                     Pick a device to text a number";

/// Command line of `tether`.
///
/// Without `--device` (and without a listing or version flag) the process
/// becomes the daemon, or hands its URIs to the running one.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "tether")]
#[command(about = "Control and sync with nearby devices")]
#[command(disable_version_flag = true)]
#[command(after_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Show release version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// List available devices (connected and paired)
    #[arg(short = 'l', long)]
    pub list_devices: bool,

    /// List all devices
    #[arg(short = 'a', long)]
    pub list_all: bool,

    /// Target device
    #[arg(short = 'd', long, value_name = "DEVICE-ID")]
    pub device: Option<String>,

    /// Pair
    #[arg(long)]
    pub pair: bool,

    /// Unpair
    #[arg(long)]
    pub unpair: bool,

    /// Send SMS (only the first number is used)
    #[arg(long, value_name = "PHONE-NUMBER")]
    pub message: Vec<String>,

    /// Message body
    #[arg(long, value_name = "TEXT")]
    pub message_body: Option<String>,

    /// Send notification
    #[arg(long, value_name = "TITLE")]
    pub notification: Option<String>,

    /// Notification app name
    #[arg(long, value_name = "NAME")]
    pub notification_appname: Option<String>,

    /// Notification body
    #[arg(long, value_name = "TEXT")]
    pub notification_body: Option<String>,

    /// Notification icon
    #[arg(long, value_name = "ICON-NAME")]
    pub notification_icon: Option<String>,

    /// Notification ID
    #[arg(long, value_name = "ID")]
    pub notification_id: Option<String>,

    /// Ping
    #[arg(long)]
    pub ping: bool,

    /// Ring
    #[arg(long)]
    pub ring: bool,

    /// Share file
    #[arg(long, value_name = "FILEPATH|URI")]
    pub share_file: Vec<String>,

    /// Share link
    #[arg(long, value_name = "URL")]
    pub share_link: Vec<String>,

    /// Share text
    #[arg(long, value_name = "TEXT")]
    pub share_text: Option<String>,

    /// Config directory (settings, certificate)
    #[arg(long, value_name = "DIR", hide_short_help = true)]
    pub config_dir: Option<PathBuf>,

    /// Cache directory
    #[arg(long, value_name = "DIR", hide_short_help = true)]
    pub cache_dir: Option<PathBuf>,

    /// State directory (bus socket, logs)
    #[arg(long, value_name = "DIR", hide_short_help = true)]
    pub state_dir: Option<PathBuf>,

    /// URIs to open (sms:, tel:, file: or a local path)
    #[arg(value_name = "URI")]
    pub uris: Vec<String>,
}

impl Cli {
    pub fn dir_overrides(&self) -> DirOverrides {
        DirOverrides {
            config_dir: self.config_dir.clone(),
            cache_dir: self.cache_dir.clone(),
            state_dir: self.state_dir.clone(),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
