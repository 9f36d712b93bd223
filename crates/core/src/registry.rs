// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of known device handles, keyed by device id.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tether_ipc::{device_object_path, ManagedObjects};

use crate::device::{Device, DeviceRecord, StoredDevice};
use crate::engine::Engine;
use crate::queue::WorkQueue;
use crate::settings::Settings;

/// Device handles currently known to the daemon.
#[derive(Default)]
pub struct Registry {
    devices: RefCell<BTreeMap<String, Rc<dyn Device>>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("devices", &self.devices.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry holding one [`StoredDevice`] per remembered id.
    pub fn load_stored(
        settings: &Rc<Settings>,
        engine: &Rc<dyn Engine>,
        queue: &Rc<WorkQueue>,
    ) -> Self {
        let registry = Self::new();
        for id in settings.devices() {
            let device =
                StoredDevice::new(id, Rc::clone(settings), Rc::clone(engine), Rc::clone(queue));
            registry.insert(Rc::new(device));
        }
        registry
    }

    /// Add a handle, replacing any previous handle with the same id.
    pub fn insert(&self, device: Rc<dyn Device>) -> Option<Rc<dyn Device>> {
        let id = device.id().to_string();
        self.devices.borrow_mut().insert(id, device)
    }

    pub fn get(&self, id: &str) -> Option<Rc<dyn Device>> {
        self.devices.borrow().get(id).cloned()
    }

    /// Handles in id order, detached from the registry so callers may
    /// mutate it while iterating.
    pub fn snapshot(&self) -> Vec<Rc<dyn Device>> {
        self.devices.borrow().values().cloned().collect()
    }

    pub fn records(&self) -> Vec<DeviceRecord> {
        self.snapshot().iter().map(|d| d.record()).collect()
    }

    /// Device properties keyed by object path.
    pub fn managed_objects(&self) -> ManagedObjects {
        self.records()
            .into_iter()
            .map(|record| (device_object_path(&record.id), record.properties()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.devices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.devices.borrow_mut().clear();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
