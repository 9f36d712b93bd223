// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent daemon settings.
//!
//! Settings live in `settings.toml` in the config directory:
//!
//! ```toml
//! name = "laptop"
//! id = "6f1c2b0e_4d3a_4b8e_9a71_2c5d8e0f4a19"
//! devices = ["..."]
//!
//! [device.<id>]
//! name = "Phone"
//! paired = true
//! ```
//!
//! One [`Settings`] handle is created at startup and shared by every
//! component that needs it. Each mutation is written through to disk and
//! announced to subscribers with the key that changed.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings filename within the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Per-device settings subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub paired: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    devices: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    device: BTreeMap<String, DeviceSettings>,
}

/// The setting a change notification refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsKey {
    Name,
    Id,
    Devices,
    /// The subtree of one device.
    Device(String),
}

type Subscriber = Rc<dyn Fn(&SettingsKey)>;

/// Process-scoped settings store.
pub struct Settings {
    path: PathBuf,
    doc: RefCell<Document>,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("path", &self.path)
            .field("doc", &self.doc)
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| Error::Settings(format!("failed to parse settings: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Document::default(),
            Err(e) => {
                return Err(Error::Settings(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Ok(Self {
            path,
            doc: RefCell::new(doc),
            subscribers: RefCell::new(Vec::new()),
        })
    }

    /// Load `settings.toml` from the given config directory.
    pub fn load_from_dir(config_dir: &Path) -> Result<Self> {
        Self::load(config_dir.join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a callback invoked after every change.
    ///
    /// Callbacks may subscribe or mutate settings themselves; they see only
    /// the subscribers registered before the change.
    pub fn subscribe(&self, callback: impl Fn(&SettingsKey) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Drop all subscribers. Called once at shutdown.
    pub fn close(&self) {
        self.subscribers.borrow_mut().clear();
    }

    pub fn name(&self) -> Option<String> {
        self.doc.borrow().name.clone()
    }

    pub fn set_name(&self, name: &str) -> Result<()> {
        self.update(SettingsKey::Name, |doc| doc.name = Some(name.to_string()))
    }

    pub fn id(&self) -> Option<String> {
        self.doc.borrow().id.clone()
    }

    pub fn set_id(&self, id: &str) -> Result<()> {
        self.update(SettingsKey::Id, |doc| doc.id = Some(id.to_string()))
    }

    /// Reset the local id so it is regenerated from the certificate.
    pub fn reset_id(&self) -> Result<()> {
        self.update(SettingsKey::Id, |doc| doc.id = None)
    }

    /// Ids of remembered devices.
    pub fn devices(&self) -> Vec<String> {
        self.doc.borrow().devices.clone()
    }

    pub fn set_devices(&self, devices: Vec<String>) -> Result<()> {
        self.update(SettingsKey::Devices, |doc| doc.devices = devices)
    }

    /// Settings subtree of one device, if it has one.
    pub fn device(&self, id: &str) -> Option<DeviceSettings> {
        self.doc.borrow().device.get(id).cloned()
    }

    pub fn set_device_paired(&self, id: &str, paired: bool) -> Result<()> {
        self.update(SettingsKey::Device(id.to_string()), |doc| {
            doc.device.entry(id.to_string()).or_default().paired = paired;
        })
    }

    pub fn set_device_name(&self, id: &str, name: &str) -> Result<()> {
        self.update(SettingsKey::Device(id.to_string()), |doc| {
            doc.device.entry(id.to_string()).or_default().name = Some(name.to_string());
        })
    }

    /// Remove the whole settings subtree of one device.
    pub fn reset_device(&self, id: &str) -> Result<()> {
        self.update(SettingsKey::Device(id.to_string()), |doc| {
            doc.device.remove(id);
        })
    }

    /// Keep only `kept` devices, unpaired, drop the subtrees of `removed`
    /// and clear the local id, all in one write.
    pub fn reset_identity(&self, kept: &[String], removed: &BTreeSet<String>) -> Result<()> {
        let mut keys: Vec<SettingsKey> = kept
            .iter()
            .chain(removed)
            .map(|id| SettingsKey::Device(id.clone()))
            .collect();
        keys.push(SettingsKey::Devices);
        keys.push(SettingsKey::Id);

        self.commit(keys, |doc| {
            for id in kept {
                doc.device.entry(id.clone()).or_default().paired = false;
            }
            for id in removed {
                doc.device.remove(id);
            }
            doc.devices = kept.to_vec();
            doc.id = None;
        })
    }

    fn update(&self, key: SettingsKey, mutate: impl FnOnce(&mut Document)) -> Result<()> {
        self.commit(vec![key], mutate)
    }

    /// Apply `mutate` and save. The in-memory document is restored when the
    /// save fails, so memory never runs ahead of disk.
    fn commit(&self, keys: Vec<SettingsKey>, mutate: impl FnOnce(&mut Document)) -> Result<()> {
        let previous = self.doc.borrow().clone();
        mutate(&mut self.doc.borrow_mut());
        if let Err(e) = self.save() {
            *self.doc.borrow_mut() = previous;
            return Err(e);
        }

        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for key in &keys {
            for subscriber in &subscribers {
                subscriber(key);
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&*self.doc.borrow())
            .map_err(|e| Error::Settings(format!("failed to serialize settings: {}", e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
