// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Action routing.
//!
//! The router resolves an envelope's selector against the registry and
//! activates the action on every handle it resolves to. Failures are logged
//! with their selector, device and action, and never stop the remaining
//! handles.

use std::rc::Rc;

use tether_ipc::{ActionEnvelope, Selector};

use crate::device::Device;
use crate::error::RouteError;
use crate::registry::Registry;

/// What one dispatch did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Handles the selector resolved to.
    pub resolved: usize,
    /// Handles that accepted the action.
    pub activated: usize,
    pub failures: Vec<RouteError>,
}

impl DispatchSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Router<'a> {
    registry: &'a Registry,
}

impl<'a> Router<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Resolve a selector to device handles.
    ///
    /// The wildcard yields a snapshot of every registered handle, possibly
    /// empty. A concrete id that is not registered is an error.
    pub fn resolve(&self, selector: &Selector) -> Result<Vec<Rc<dyn Device>>, RouteError> {
        match selector {
            Selector::All => Ok(self.registry.snapshot()),
            Selector::Device(id) => self
                .registry
                .get(id)
                .map(|device| vec![device])
                .ok_or_else(|| RouteError::HandleNotFound(id.clone())),
        }
    }

    /// Activate the envelope's action on every resolved handle.
    pub fn dispatch(&self, envelope: &ActionEnvelope) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        let devices = match self.resolve(&envelope.selector) {
            Ok(devices) => devices,
            Err(err) => {
                tracing::warn!(
                    selector = %envelope.selector,
                    action = %envelope.action,
                    error = %err,
                    "dispatch failed"
                );
                summary.failures.push(err);
                return summary;
            }
        };
        summary.resolved = devices.len();

        for device in devices {
            match device.activate(&envelope.action, envelope.target.as_ref()) {
                Ok(()) => summary.activated += 1,
                Err(err) => {
                    tracing::warn!(
                        selector = %envelope.selector,
                        device = %device.id(),
                        action = %envelope.action,
                        error = %err,
                        "action failed"
                    );
                    summary.failures.push(err);
                }
            }
        }

        tracing::debug!(
            selector = %envelope.selector,
            action = %envelope.action,
            resolved = summary.resolved,
            activated = summary.activated,
            "dispatched"
        );
        summary
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
