// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Turns command-line intents into action envelopes.
//!
//! Intents are handled in a fixed order: listing, then pairing, then every
//! data intent present. Envelopes go to an [`Endpoint`]: the local service
//! when this process is the primary instance, or the bus client otherwise.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tether_core::{uri, Service};
use tether_ipc::{sanitize_device_id, ActionEnvelope, BusClient, ManagedObjects, TypedValue};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Error, Result};

/// Exit code of a handled invocation.
pub const EXIT_HANDLED: i32 = 0;
/// No device intent was given; the caller should run as the daemon.
pub const EXIT_START_DAEMON: i32 = -1;
/// Exit code of a failed invocation.
pub const EXIT_FAILURE: i32 = 1;

const DEFAULT_NOTIFICATION_ICON: &str = "org.tether.Tether";

/// Where envelopes and listing requests are delivered.
pub trait Endpoint {
    fn managed_objects(&self) -> Result<ManagedObjects>;

    fn activate_action(&self, envelope: &ActionEnvelope) -> Result<()>;
}

/// Delivery into the service running in this process.
pub struct LocalEndpoint<'a> {
    service: &'a Service,
}

impl<'a> LocalEndpoint<'a> {
    pub fn new(service: &'a Service) -> Self {
        Self { service }
    }
}

impl Endpoint for LocalEndpoint<'_> {
    fn managed_objects(&self) -> Result<ManagedObjects> {
        Ok(self.service.managed_objects())
    }

    fn activate_action(&self, envelope: &ActionEnvelope) -> Result<()> {
        self.service.dispatch(envelope);
        Ok(())
    }
}

/// Delivery to the primary instance over the bus.
pub struct RemoteEndpoint {
    client: BusClient,
}

impl RemoteEndpoint {
    pub fn new(client: BusClient) -> Self {
        Self { client }
    }
}

impl Endpoint for RemoteEndpoint {
    fn managed_objects(&self) -> Result<ManagedObjects> {
        Ok(self.client.managed_objects()?)
    }

    fn activate_action(&self, envelope: &ActionEnvelope) -> Result<()> {
        Ok(self.client.activate_action(envelope)?)
    }
}

/// Handle the device intents on the command line.
///
/// Returns [`EXIT_START_DAEMON`] when no device intent is present, otherwise
/// [`EXIT_HANDLED`]. A device intent without `--device` is an error.
pub fn handle_local_options(
    cli: &Cli,
    endpoint: &dyn Endpoint,
    config: &Config,
    out: &mut dyn Write,
) -> Result<i32> {
    if cli.list_devices {
        list_devices(endpoint, false, out)?;
        return Ok(EXIT_HANDLED);
    }
    if cli.list_all {
        list_devices(endpoint, true, out)?;
        return Ok(EXIT_HANDLED);
    }

    // Validate before anything is sent; pairing ends handling before messages
    let message = if cli.pair || cli.unpair {
        None
    } else {
        message_target(cli)?
    };

    let Some(device) = cli.device.as_deref() else {
        return match first_device_intent(cli) {
            Some(given) => Err(Error::MissingRequiredOption {
                given,
                missing: "--device",
            }),
            None => Ok(EXIT_START_DAEMON),
        };
    };
    let id = sanitize_device_id(device);
    let send = |action: &str, target: Option<TypedValue>| {
        let mut envelope = ActionEnvelope::new(id.as_str(), action);
        envelope.target = target;
        tracing::debug!(device = %id, action, "sending action");
        endpoint.activate_action(&envelope)
    };

    if cli.pair {
        send("pair", None)?;
        return Ok(EXIT_HANDLED);
    }
    if cli.unpair {
        send("unpair", None)?;
        return Ok(EXIT_HANDLED);
    }

    if let Some(target) = message {
        send("sendSms", Some(target))?;
    }
    if let Some(title) = cli.notification.as_deref() {
        let now = chrono::Utc::now().timestamp_millis();
        send("sendNotification", Some(notification_target(cli, title, config, now)))?;
    }
    if cli.ping {
        send("ping", Some(TypedValue::from("")))?;
    }
    if cli.ring {
        send("ring", None)?;
    }
    for file in &cli.share_file {
        let file = file_argument(file)?;
        send("shareFile", Some(TypedValue::StringBool(file, false)))?;
    }
    for link in &cli.share_link {
        send("shareUri", Some(TypedValue::from(link.as_str())))?;
    }
    if let Some(text) = cli.share_text.as_deref() {
        send("shareText", Some(TypedValue::from(text)))?;
    }

    Ok(EXIT_HANDLED)
}

/// The first flag that needs `--device`, in handling order.
fn first_device_intent(cli: &Cli) -> Option<&'static str> {
    [
        (cli.pair, "--pair"),
        (cli.unpair, "--unpair"),
        (!cli.message.is_empty(), "--message"),
        (cli.notification.is_some(), "--notification"),
        (cli.ping, "--ping"),
        (cli.ring, "--ring"),
        (!cli.share_file.is_empty(), "--share-file"),
        (!cli.share_link.is_empty(), "--share-link"),
        (cli.share_text.is_some(), "--share-text"),
    ]
    .into_iter()
    .find_map(|(present, flag)| present.then_some(flag))
}

/// Print devices: every device as `id\tname\tconnected\tpaired`, or only
/// the ids of connected and paired devices.
pub fn list_devices(endpoint: &dyn Endpoint, full: bool, out: &mut dyn Write) -> Result<()> {
    for device in endpoint.managed_objects()?.values() {
        if full {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                device.id, device.name, device.connected, device.paired
            )?;
        } else if device.connected && device.paired {
            writeln!(out, "{}", device.id)?;
        }
    }
    Ok(())
}

/// `sendSms` target for the first `--message` address.
fn message_target(cli: &Cli) -> Result<Option<TypedValue>> {
    let Some(address) = cli.message.first() else {
        return Ok(None);
    };
    let body = cli
        .message_body
        .as_deref()
        .ok_or(Error::MissingRequiredOption {
            given: "--message",
            missing: "--message-body",
        })?;
    if cli.message.len() > 1 {
        tracing::warn!(
            count = cli.message.len(),
            "only the first --message address is used"
        );
    }
    Ok(Some(TypedValue::StringPair(address.clone(), body.to_string())))
}

/// `sendNotification` target. `now_ms` stamps the time and default id.
pub fn notification_target(cli: &Cli, title: &str, config: &Config, now_ms: i64) -> TypedValue {
    let body = cli.notification_body.clone().unwrap_or_default();
    let now = now_ms.to_string();

    let mut dict = BTreeMap::new();
    let mut put = |key: &str, value: TypedValue| {
        dict.insert(key.to_string(), value);
    };
    put(
        "appName",
        TypedValue::from(
            cli.notification_appname
                .clone()
                .unwrap_or_else(|| config.notification_app_name.clone()),
        ),
    );
    put(
        "id",
        TypedValue::from(cli.notification_id.clone().unwrap_or_else(|| now.clone())),
    );
    put("title", TypedValue::from(title));
    put("text", TypedValue::from(body.as_str()));
    put("ticker", TypedValue::from(format!("{}: {}", title, body)));
    put("time", TypedValue::from(now));
    put("isClearable", TypedValue::Bool(true));
    put(
        "icon",
        TypedValue::from(
            cli.notification_icon
                .as_deref()
                .unwrap_or(DEFAULT_NOTIFICATION_ICON),
        ),
    );
    TypedValue::Dict(dict)
}

/// Make a `--share-file` argument meaningful to another process: URIs pass
/// through, relative paths are made absolute.
fn file_argument(arg: &str) -> Result<String> {
    if uri::scheme(arg).is_some() {
        return Ok(arg.to_string());
    }
    Ok(absolute(Path::new(arg))?.display().to_string())
}

/// Convert positional arguments to URIs; local paths become `file:` URIs.
pub fn uris_from_args(args: &[String]) -> Result<Vec<String>> {
    args.iter()
        .map(|arg| {
            if uri::scheme(arg).is_some() {
                Ok(arg.clone())
            } else {
                Ok(file_uri(&absolute(Path::new(arg))?))
            }
        })
        .collect()
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn file_uri(path: &Path) -> String {
    let mut uri = String::from("file://");
    for byte in path.to_string_lossy().bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                uri.push(char::from(byte))
            }
            other => uri.push_str(&format!("%{:02X}", other)),
        }
    }
    uri
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
