// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Device handles.
//!
//! A handle is the router's only view of a device: it reports a
//! [`DeviceRecord`] and accepts `activate(action, target)`. [`StoredDevice`]
//! is the handle built from a remembered device in the settings store; it
//! checks the action table, keeps the pairing flag in settings, and defers
//! delivery to the engine through the work queue.

use std::cell::Cell;
use std::rc::Rc;

use tether_ipc::{DeviceProperties, TypedValue, ValueKind};

use crate::engine::Engine;
use crate::error::RouteError;
use crate::queue::WorkQueue;
use crate::settings::Settings;

/// Public state of one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub id: String,
    pub name: String,
    pub paired: bool,
    pub connected: bool,
}

impl DeviceRecord {
    pub fn properties(&self) -> DeviceProperties {
        DeviceProperties {
            id: self.id.clone(),
            name: self.name.clone(),
            connected: self.connected,
            paired: self.paired,
        }
    }
}

/// A handle the router can activate actions on.
pub trait Device {
    fn id(&self) -> &str;

    fn record(&self) -> DeviceRecord;

    /// Activate `action` with an optional target.
    ///
    /// Returns once the action is accepted; any work it implies may still
    /// be pending on the work queue.
    fn activate(&self, action: &str, target: Option<&TypedValue>) -> Result<(), RouteError>;
}

/// Actions a device accepts and the target shape each one expects.
pub const DEVICE_ACTIONS: &[(&str, Option<ValueKind>)] = &[
    ("pair", None),
    ("unpair", None),
    ("ping", Some(ValueKind::String)),
    ("ring", None),
    ("sendSms", Some(ValueKind::StringPair)),
    ("uriSms", Some(ValueKind::String)),
    ("sendNotification", Some(ValueKind::Dict)),
    ("shareFile", Some(ValueKind::StringBool)),
    ("shareUri", Some(ValueKind::String)),
    ("shareText", Some(ValueKind::String)),
];

/// Expected target shape of a device action, or `None` if the action is unknown.
pub fn action_signature(action: &str) -> Option<Option<ValueKind>> {
    DEVICE_ACTIONS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, kind)| *kind)
}

fn describe(kind: Option<ValueKind>) -> String {
    match kind {
        Some(kind) => kind.to_string(),
        None => "no target".to_string(),
    }
}

/// Check `target` against the action table.
pub fn check_target(
    device: &str,
    action: &str,
    target: Option<&TypedValue>,
) -> Result<(), RouteError> {
    let expected = action_signature(action).ok_or_else(|| RouteError::UnknownAction {
        device: device.to_string(),
        action: action.to_string(),
    })?;
    let actual = target.map(TypedValue::kind);
    if expected != actual {
        return Err(RouteError::TargetTypeMismatch {
            device: device.to_string(),
            action: action.to_string(),
            expected: describe(expected),
            actual: describe(actual),
        });
    }
    Ok(())
}

/// Handle for a device remembered in the settings store.
pub struct StoredDevice {
    id: String,
    connected: Cell<bool>,
    settings: Rc<Settings>,
    engine: Rc<dyn Engine>,
    queue: Rc<WorkQueue>,
}

impl StoredDevice {
    pub fn new(
        id: impl Into<String>,
        settings: Rc<Settings>,
        engine: Rc<dyn Engine>,
        queue: Rc<WorkQueue>,
    ) -> Self {
        Self {
            id: id.into(),
            connected: Cell::new(false),
            settings,
            engine,
            queue,
        }
    }

    /// Connection state is owned by the engine; it reports changes here.
    pub fn set_connected(&self, connected: bool) {
        self.connected.set(connected);
    }

    fn forget_pairing(&self) -> Result<(), RouteError> {
        self.settings
            .set_device_paired(&self.id, false)
            .map_err(|e| RouteError::Device {
                device: self.id.clone(),
                action: "unpair".to_string(),
                reason: e.to_string(),
            })
    }
}

impl Device for StoredDevice {
    fn id(&self) -> &str {
        &self.id
    }

    fn record(&self) -> DeviceRecord {
        let stored = self.settings.device(&self.id).unwrap_or_default();
        DeviceRecord {
            id: self.id.clone(),
            name: stored.name.unwrap_or_else(|| self.id.clone()),
            paired: stored.paired,
            connected: self.connected.get(),
        }
    }

    fn activate(&self, action: &str, target: Option<&TypedValue>) -> Result<(), RouteError> {
        check_target(&self.id, action, target)?;

        // Unpairing is local; pairing completes only when the peer accepts
        if action == "unpair" {
            self.forget_pairing()?;
        }

        let record = self.record();
        let engine = Rc::clone(&self.engine);
        let action = action.to_string();
        let target = target.cloned();
        self.queue.defer(move || {
            if let Err(reason) = engine.deliver(&record, &action, target.as_ref()) {
                tracing::warn!(
                    device = %record.id,
                    action = %action,
                    reason = %reason,
                    "delivery failed"
                );
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
