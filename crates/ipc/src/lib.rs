// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared bus protocol between `tether` instances.
//!
//! This crate defines the action envelope codec, the request/response types
//! exchanged between a secondary invocation and the primary instance, and the
//! framing used on the Unix socket. Messages are serialized as JSON with
//! length-prefixed framing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod bus;
pub mod client;
pub mod envelope;

pub use bus::{register, BusConnection, BusError, BusOwner, BusPaths, Registration};
pub use client::{BusClient, CallOptions, CancelToken, DEFAULT_CALL_TIMEOUT};
pub use envelope::{ActionEnvelope, EnvelopeError, Selector, TypedValue, ValueKind, WILDCARD};

/// Well-known name the primary instance owns.
pub const BUS_NAME: &str = "org.tether.Tether";
/// Root object path; devices live under `<root>/Device/<id>`.
pub const OBJECT_ROOT: &str = "/org/tether/Tether";

/// Collapse runs of characters that are not ASCII alphanumeric or `_`
/// into a single `_`.
pub fn sanitize_device_id(id: &str) -> String {
    let mut sanitized = String::with_capacity(id.len());
    let mut in_run = false;
    for c in id.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            sanitized.push(c);
            in_run = false;
        } else if !in_run {
            sanitized.push('_');
            in_run = true;
        }
    }
    sanitized
}

/// Object path of the device with the given id.
pub fn device_object_path(id: &str) -> String {
    format!("{}/Device/{}", OBJECT_ROOT, sanitize_device_id(id))
}

// ============================================================================
// Protocol types
// ============================================================================

/// Public attributes of one managed device object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceProperties {
    pub id: String,
    pub name: String,
    pub connected: bool,
    pub paired: bool,
}

/// Object path to device attributes, as returned by `GetManagedObjects`.
pub type ManagedObjects = BTreeMap<String, DeviceProperties>;

/// Request sent from a secondary invocation to the primary instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BusRequest {
    /// Version handshake request.
    Hello { version: String },
    /// Enumerate all device objects and their public attributes.
    GetManagedObjects,
    /// Route an encoded action envelope to one or all devices.
    ActivateAction { envelope: Vec<u8> },
    /// Activate an application-level action (`error`, `connect`, ...).
    ActivateApp {
        action: String,
        target: Option<TypedValue>,
    },
    /// Open URIs handed to a secondary invocation.
    Open { uris: Vec<String> },
    /// Plain activation with no intent.
    Activate,
    /// Stop the primary instance.
    Quit,
}

/// Response sent from the primary instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BusResponse {
    /// Version handshake response.
    Hello { version: String },
    /// Managed device objects.
    ManagedObjects { objects: ManagedObjects },
    /// Call completed.
    Ok,
    /// Call failed before it could be handled.
    Error { message: String },
}

/// Length-prefixed JSON framing.
pub mod framing {
    use std::io::{Read, Write};

    use serde::de::DeserializeOwned;
    use serde::Serialize;

    /// Maximum message size (1MB) to prevent malformed messages from causing hangs.
    pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

    /// Write a serializable message to the given writer.
    pub fn write_message<W: Write, T: Serialize>(
        writer: &mut W,
        message: &T,
    ) -> std::io::Result<()> {
        let json = serde_json::to_vec(message)
            .map_err(|e| std::io::Error::other(format!("serialize error: {}", e)))?;
        let len =
            u32::try_from(json.len()).map_err(|_| std::io::Error::other("message too large"))?;
        writer.write_all(&len.to_be_bytes())?;
        writer.write_all(&json)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a deserializable message from the given reader.
    pub fn read_message<R: Read, T: DeserializeOwned>(reader: &mut R) -> std::io::Result<T> {
        let mut len_buf = [0u8; 4];
        reader.read_exact(&mut len_buf)?;
        let len = u32::from_be_bytes(len_buf) as usize;
        check_len(len)?;

        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;

        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::other(format!("deserialize error: {}", e)))
    }

    /// Total frame length (header included) if `buf` holds a complete header.
    pub fn frame_len(buf: &[u8]) -> std::io::Result<Option<usize>> {
        let Some(header) = buf.get(..4) else {
            return Ok(None);
        };
        let mut len_buf = [0u8; 4];
        len_buf.copy_from_slice(header);
        let len = u32::from_be_bytes(len_buf) as usize;
        check_len(len)?;
        Ok(Some(4 + len))
    }

    fn check_len(len: usize) -> std::io::Result<()> {
        if len > MAX_MESSAGE_SIZE {
            return Err(std::io::Error::other(format!(
                "message too large: {} bytes (max {})",
                len, MAX_MESSAGE_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
