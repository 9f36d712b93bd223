// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot configuration migration, run at startup before devices load.
//!
//! Older releases accepted device ids the protocol now rejects. The local
//! certificate is the source of truth for our own id: when its common name
//! is no longer a valid id, identity is discarded and regenerated, remembered
//! devices with invalid ids are purged, and the remaining ones must pair
//! again.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path};

use crate::error::Result;
use crate::id::{normalize_name, validate_device_id, validate_name};
use crate::notify::{Notification, NotificationSink, Priority};
use crate::paths::Paths;
use crate::settings::Settings;

pub const MIGRATED_NOTIFICATION_ID: &str = "settings-migrated";
const MIGRATED_TITLE: &str = "Settings Migrated";
const MIGRATED_BODY: &str = "Tether has updated to support changes to the device protocol. \
                             Some devices may need to be paired again.";

/// Remembered device ids sorted by one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationRecord {
    /// Ids kept, in their original order.
    pub valid_device_ids: Vec<String>,
    pub removed_ids: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Identity was valid or absent; nothing beyond the name was touched.
    Unchanged,
    Migrated(MigrationRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub name_repaired: bool,
    pub outcome: MigrationOutcome,
}

impl MigrationReport {
    pub fn changed(&self) -> bool {
        self.name_repaired || matches!(self.outcome, MigrationOutcome::Migrated(_))
    }
}

pub struct Migrator<'a> {
    settings: &'a Settings,
    paths: &'a Paths,
    notifier: &'a dyn NotificationSink,
    host_name: String,
}

impl<'a> Migrator<'a> {
    pub fn new(
        settings: &'a Settings,
        paths: &'a Paths,
        notifier: &'a dyn NotificationSink,
    ) -> Self {
        Self {
            settings,
            paths,
            notifier,
            host_name: crate::id::host_name(),
        }
    }

    /// Use `host_name` instead of the machine's when repairing the name.
    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = host_name.into();
        self
    }

    pub fn run(&self) -> Result<MigrationReport> {
        let name_repaired = self.repair_name()?;

        if !self.identity_needs_reset() {
            return Ok(MigrationReport {
                name_repaired,
                outcome: MigrationOutcome::Unchanged,
            });
        }

        tracing::warn!("local identity is invalid, migrating settings");
        let record = self.sort_devices();
        // Settings commit before any file is deleted
        self.settings
            .reset_identity(&record.valid_device_ids, &record.removed_ids)?;
        for id in &record.removed_ids {
            self.purge_cache(id);
        }
        self.paths.identity().remove();
        self.notify();

        tracing::info!(
            kept = record.valid_device_ids.len(),
            removed = record.removed_ids.len(),
            "settings migrated"
        );
        Ok(MigrationReport {
            name_repaired,
            outcome: MigrationOutcome::Migrated(record),
        })
    }

    fn repair_name(&self) -> Result<bool> {
        let current = self.settings.name().unwrap_or_default();
        if validate_name(&current) {
            return Ok(false);
        }
        let name = normalize_name(&self.host_name);
        tracing::info!(old = %current, new = %name, "repairing device name");
        self.settings.set_name(&name)?;
        Ok(true)
    }

    fn identity_needs_reset(&self) -> bool {
        match self.paths.identity().common_name() {
            Ok(Some(common_name)) => !validate_device_id(&common_name),
            // Fresh install: identity is generated elsewhere
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable certificate, discarding identity");
                true
            }
        }
    }

    fn sort_devices(&self) -> MigrationRecord {
        let mut record = MigrationRecord::default();
        for id in self.settings.devices() {
            if validate_device_id(&id) {
                record.valid_device_ids.push(id);
            } else {
                tracing::debug!(id = %id, "invalid device id removed");
                record.removed_ids.insert(id);
            }
        }
        record
    }

    fn purge_cache(&self, id: &str) {
        // Invalid ids are arbitrary strings; never let one escape the cache dir
        let mut components = Path::new(id).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single {
            tracing::warn!(id, "device id is not a plain file name, cache left in place");
            return;
        }

        let dir = self.paths.device_cache_dir(id);
        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "failed to remove device cache")
            }
        }
    }

    fn notify(&self) {
        let notification = Notification::new(MIGRATED_TITLE, MIGRATED_BODY)
            .icon("dialog-warning")
            .priority(Priority::High);
        if let Err(e) = self.notifier.send(MIGRATED_NOTIFICATION_ID, notification) {
            tracing::warn!(error = %e, "failed to send migration notification");
        }
    }
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
