// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tether-core: the primary instance of the tether daemon.
//!
//! This crate holds the device-facing side of the daemon: identifier
//! predicates, the settings store, device handles and their registry, the
//! action router, the startup configuration migrator, notifications and the
//! error reporter, and the [`Service`] that ties them to the bus.

pub mod device;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod id;
pub mod identity;
pub mod migrate;
pub mod notify;
pub mod paths;
pub mod queue;
pub mod registry;
pub mod report;
pub mod router;
pub mod service;
pub mod settings;
pub mod uri;

pub use device::{Device, DeviceRecord, StoredDevice};
pub use engine::{Engine, HeadlessEngine};
pub use error::{Error, Result, RouteError};
pub use frontend::{LogPresenter, Presenter};
pub use migrate::{MigrationOutcome, MigrationRecord, MigrationReport, Migrator};
pub use notify::{Notification, NotificationCenter, NotificationSink, Priority};
pub use paths::Paths;
pub use queue::WorkQueue;
pub use registry::Registry;
pub use report::{ErrorReport, ErrorReporter};
pub use router::{DispatchSummary, Router};
pub use service::{Collaborators, Service};
pub use settings::{DeviceSettings, Settings, SettingsKey};

#[cfg(test)]
pub(crate) mod test_helpers;
