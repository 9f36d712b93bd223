// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fakes for unit tests.

#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tempfile::TempDir;
use tether_ipc::TypedValue;

use crate::device::{Device, DeviceRecord};
use crate::engine::Engine;
use crate::error::RouteError;
use crate::frontend::Presenter;
use crate::paths::Paths;
use crate::report::ErrorReport;

/// A valid device id derived from a short tag.
pub fn device_id(tag: &str) -> String {
    format!("{:_<32}", tag)
}

/// Paths rooted in a fresh temp directory.
pub fn temp_paths() -> (TempDir, Paths) {
    let temp = TempDir::new().unwrap();
    let paths = Paths {
        config_dir: temp.path().join("config"),
        cache_dir: temp.path().join("cache"),
        state_dir: temp.path().join("state"),
    };
    (temp, paths)
}

/// Device handle that records every activation.
pub struct FakeDevice {
    pub id: String,
    pub calls: RefCell<Vec<(String, Option<TypedValue>)>>,
    pub fail_with: RefCell<Option<RouteError>>,
}

impl FakeDevice {
    pub fn new(id: &str) -> Rc<Self> {
        Rc::new(Self {
            id: id.to_string(),
            calls: RefCell::new(Vec::new()),
            fail_with: RefCell::new(None),
        })
    }

    pub fn failing(id: &str, error: RouteError) -> Rc<Self> {
        let device = Self::new(id);
        *device.fail_with.borrow_mut() = Some(error);
        device
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Device for FakeDevice {
    fn id(&self) -> &str {
        &self.id
    }

    fn record(&self) -> DeviceRecord {
        DeviceRecord {
            id: self.id.clone(),
            name: format!("Fake {}", self.id.trim_end_matches('_')),
            paired: true,
            connected: true,
        }
    }

    fn activate(&self, action: &str, target: Option<&TypedValue>) -> Result<(), RouteError> {
        self.calls
            .borrow_mut()
            .push((action.to_string(), target.cloned()));
        match self.fail_with.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Engine that records identify and delivery requests.
#[derive(Default)]
pub struct RecordingEngine {
    pub identified: RefCell<Vec<Option<String>>>,
    pub delivered: RefCell<Vec<(String, String, Option<TypedValue>)>>,
}

impl Engine for RecordingEngine {
    fn identify(&self, address: Option<&str>) {
        self.identified
            .borrow_mut()
            .push(address.map(str::to_string));
    }

    fn deliver(
        &self,
        device: &DeviceRecord,
        action: &str,
        target: Option<&TypedValue>,
    ) -> Result<(), String> {
        self.delivered.borrow_mut().push((
            device.id.clone(),
            action.to_string(),
            target.cloned(),
        ));
        Ok(())
    }
}

/// Presenter that records every trigger.
#[derive(Default)]
pub struct RecordingPresenter {
    pub opened: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<ErrorReport>>,
    pub choosers: RefCell<Vec<(String, String, TypedValue)>>,
    pub fail_open: Cell<bool>,
}

impl Presenter for RecordingPresenter {
    fn open_uri(&self, uri: &str) -> crate::Result<()> {
        if self.fail_open.get() {
            return Err(crate::Error::Io(std::io::Error::other("no handler")));
        }
        self.opened.borrow_mut().push(uri.to_string());
        Ok(())
    }

    fn show_error(&self, report: &ErrorReport) {
        self.errors.borrow_mut().push(report.clone());
    }

    fn choose_device(&self, title: &str, action: &str, target: &TypedValue) {
        self.choosers
            .borrow_mut()
            .push((title.to_string(), action.to_string(), target.clone()));
    }
}
