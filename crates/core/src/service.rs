// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The primary instance.
//!
//! [`Service::startup`] loads settings, runs the configuration migrator
//! and builds the device registry. The service then answers bus requests:
//! envelope dispatch through the router, application actions, URI opening
//! and device enumeration. [`Service::shutdown`] drains deferred work and
//! closes the settings store.

use std::cell::Cell;
use std::rc::Rc;

use tether_ipc::{
    envelope, ActionEnvelope, BusOwner, BusRequest, BusResponse, ManagedObjects, TypedValue,
};

use crate::engine::{Engine, HeadlessEngine};
use crate::error::{Error, Result};
use crate::frontend::{LogPresenter, Presenter};
use crate::migrate::{MigrationReport, Migrator};
use crate::notify::{NotificationCenter, NotificationSink};
use crate::paths::Paths;
use crate::queue::WorkQueue;
use crate::registry::Registry;
use crate::report::{ErrorReport, ErrorReporter};
use crate::router::{DispatchSummary, Router};
use crate::settings::Settings;
use crate::uri::intent_for_uri;

/// External parts the service drives but does not implement.
pub struct Collaborators {
    pub engine: Rc<dyn Engine>,
    pub notifier: Rc<dyn NotificationSink>,
    pub presenter: Rc<dyn Presenter>,
}

impl Collaborators {
    /// Collaborators for a daemon with no transport and no frontend.
    pub fn headless() -> Self {
        Self {
            engine: Rc::new(HeadlessEngine),
            notifier: Rc::new(NotificationCenter::new()),
            presenter: Rc::new(LogPresenter),
        }
    }
}

pub struct Service {
    paths: Paths,
    settings: Rc<Settings>,
    queue: Rc<WorkQueue>,
    registry: Registry,
    collaborators: Collaborators,
    reporter: ErrorReporter,
    migration: MigrationReport,
    quit: Cell<bool>,
}

impl Service {
    pub fn startup(paths: Paths, collaborators: Collaborators) -> Result<Self> {
        let settings = Rc::new(Settings::load(paths.settings_path())?);

        let migration = Migrator::new(&settings, &paths, collaborators.notifier.as_ref()).run()?;

        let queue = Rc::new(WorkQueue::new());
        let registry = Registry::load_stored(&settings, &collaborators.engine, &queue);
        let reporter = ErrorReporter::new(Rc::clone(&collaborators.notifier));

        tracing::info!(
            devices = registry.len(),
            migrated = migration.changed(),
            "service started"
        );
        Ok(Self {
            paths,
            settings,
            queue,
            registry,
            collaborators,
            reporter,
            migration,
            quit: Cell::new(false),
        })
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn settings(&self) -> &Rc<Settings> {
        &self.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn queue(&self) -> &Rc<WorkQueue> {
        &self.queue
    }

    /// What the startup migration did.
    pub fn migration(&self) -> &MigrationReport {
        &self.migration
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.get()
    }

    pub fn managed_objects(&self) -> ManagedObjects {
        self.registry.managed_objects()
    }

    pub fn dispatch(&self, envelope: &ActionEnvelope) -> DispatchSummary {
        Router::new(&self.registry).dispatch(envelope)
    }

    /// Activate an application-level action.
    pub fn activate_app(&self, action: &str, target: Option<&TypedValue>) -> Result<()> {
        match action {
            "connect" => {
                let address = target.and_then(TypedValue::as_str).ok_or_else(|| {
                    Error::InvalidAppTarget {
                        action: action.to_string(),
                        reason: "expected an address string".to_string(),
                    }
                })?;
                self.collaborators.engine.identify(Some(address));
            }
            "refresh" => self.collaborators.engine.identify(None),
            "error" => {
                let report = target.and_then(ErrorReport::from_target).ok_or_else(|| {
                    Error::InvalidAppTarget {
                        action: action.to_string(),
                        reason: "expected an error record".to_string(),
                    }
                })?;
                match &report.url {
                    Some(url) => self.collaborators.presenter.open_uri(url)?,
                    None => self.collaborators.presenter.show_error(&report),
                }
            }
            "quit" => self.quit.set(true),
            other => return Err(Error::UnknownAppAction(other.to_string())),
        }
        Ok(())
    }

    /// Offer each URI to the device chooser. Unsupported URIs are logged
    /// and skipped. Returns the number of URIs offered.
    pub fn open(&self, uris: &[String]) -> usize {
        let mut offered = 0;
        for uri in uris {
            match intent_for_uri(uri) {
                Ok(intent) => {
                    self.collaborators.presenter.choose_device(
                        intent.title,
                        intent.action,
                        &intent.target,
                    );
                    offered += 1;
                }
                Err(e) => tracing::warn!(uri = %uri, error = %e, "failed to open uri"),
            }
        }
        offered
    }

    pub fn report_error(&self, report: &ErrorReport) {
        self.reporter.report(report);
    }

    /// Answer one bus request.
    pub fn handle(&self, request: BusRequest) -> BusResponse {
        match request {
            BusRequest::Hello { version } => {
                tracing::debug!(client = %version, "hello");
                BusResponse::Hello {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                }
            }
            BusRequest::GetManagedObjects => BusResponse::ManagedObjects {
                objects: self.managed_objects(),
            },
            BusRequest::ActivateAction { envelope: bytes } => match envelope::decode(&bytes) {
                Ok(envelope) => {
                    self.dispatch(&envelope);
                    BusResponse::Ok
                }
                Err(e) => {
                    tracing::warn!(error = %e, "rejected action envelope");
                    BusResponse::Error {
                        message: e.to_string(),
                    }
                }
            },
            BusRequest::ActivateApp { action, target } => {
                match self.activate_app(&action, target.as_ref()) {
                    Ok(()) => BusResponse::Ok,
                    Err(e) => {
                        self.report_error(&ErrorReport::from_error(&e));
                        BusResponse::Error {
                            message: e.to_string(),
                        }
                    }
                }
            }
            BusRequest::Open { uris } => {
                self.open(&uris);
                BusResponse::Ok
            }
            BusRequest::Activate => {
                tracing::debug!("activated");
                BusResponse::Ok
            }
            BusRequest::Quit => {
                self.quit.set(true);
                BusResponse::Ok
            }
        }
    }

    /// Serve bus requests until a quit is requested.
    pub fn serve(&self, owner: &BusOwner) {
        tracing::info!(socket = %owner.paths().socket_path().display(), "serving");

        while !self.quit_requested() {
            let mut connection = match owner.accept() {
                Ok(connection) => connection,
                Err(e) => {
                    tracing::warn!("failed to accept connection: {}", e);
                    continue;
                }
            };
            match connection.read_request() {
                // Secondaries check that the owner is up by connecting once
                Ok(None) => tracing::debug!("connection closed without a request"),
                Ok(Some(request)) => {
                    let response = self.handle(request);
                    if let Err(e) = connection.reply(&response) {
                        tracing::warn!("failed to write response: {}", e);
                    }
                }
                Err(e) => tracing::warn!("failed to read request: {}", e),
            }
            self.queue.run_pending();
        }

        tracing::info!("quit requested");
    }

    /// Run all deferred work and close the settings store.
    pub fn shutdown(self) {
        let ran = self.queue.drain();
        self.settings.close();
        self.registry.clear();
        tracing::info!(jobs = ran, "service stopped");
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
