// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Seam to the device protocol engine.
//!
//! Pairing, encryption and payload transfer belong to the engine. The
//! daemon only asks it to discover peers and to deliver activated actions.

use tether_ipc::TypedValue;

use crate::device::DeviceRecord;

/// The device protocol engine.
pub trait Engine {
    /// Announce ourselves, to one address or by broadcast when `None`.
    fn identify(&self, address: Option<&str>);

    /// Deliver an activated action to a device.
    fn deliver(
        &self,
        device: &DeviceRecord,
        action: &str,
        target: Option<&TypedValue>,
    ) -> Result<(), String>;
}

/// Engine used when no transport is attached: it logs every request and
/// refuses deliveries to devices that are not connected.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessEngine;

impl Engine for HeadlessEngine {
    fn identify(&self, address: Option<&str>) {
        match address {
            Some(address) => tracing::info!(address, "identify requested"),
            None => tracing::info!("identify broadcast requested"),
        }
    }

    fn deliver(
        &self,
        device: &DeviceRecord,
        action: &str,
        target: Option<&TypedValue>,
    ) -> Result<(), String> {
        if !device.connected {
            return Err("device is not connected".to_string());
        }
        tracing::info!(device = %device.id, action, ?target, "delivering action");
        Ok(())
    }
}
