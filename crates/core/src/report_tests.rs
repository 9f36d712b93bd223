// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::{Error, Result};
use crate::notify::NotificationCenter;

struct FailingSink;

impl NotificationSink for FailingSink {
    fn send(&self, _id: &str, _notification: Notification) -> Result<()> {
        Err(Error::Notification("no notification server".to_string()))
    }

    fn withdraw(&self, _id: &str) {}
}

#[test]
fn report_without_url() {
    let report = ErrorReport::new("  disk full \n").with_stack("at write\n");
    let (id, n) = notification_for(&report);

    assert_eq!(id, "disk full");
    assert_eq!(n.title, "Tether: Error");
    assert_eq!(n.body, "Click for more information");
    assert_eq!(n.icon, "dialog-error");
    assert_eq!(n.priority, Priority::High);

    let (action, target) = n.default_action.unwrap();
    assert_eq!(action, "app.error");
    let map = target.as_string_map().unwrap();
    assert_eq!(map["message"], "disk full");
    assert_eq!(map["stack"], "at write");
    assert_eq!(map["name"], "Error");
    assert!(!map.contains_key("url"));
}

#[test]
fn report_with_url() {
    let report = ErrorReport::new("port in use")
        .with_name(" SocketError ")
        .with_url("https://example.org/help");
    let (id, n) = notification_for(&report);

    assert_eq!(id, "https://example.org/help");
    assert_eq!(n.title, "Tether: SocketError");
    assert_eq!(n.body, "Click for help troubleshooting");
    assert_eq!(n.priority, Priority::Urgent);

    let (_, target) = n.default_action.unwrap();
    assert_eq!(
        target.as_string_map().unwrap()["url"],
        "https://example.org/help"
    );
}

#[test]
fn empty_name_defaults() {
    let report = ErrorReport::new("x").with_name("  ");
    assert_eq!(notification_for(&report).1.title, "Tether: Error");
}

#[test]
fn target_round_trips() {
    let report = ErrorReport::new("boom")
        .with_name("Crash")
        .with_stack("frame")
        .with_url("https://example.org");
    assert_eq!(ErrorReport::from_target(&report.to_target()), Some(report));
}

#[test]
fn from_target_rejects_other_shapes() {
    assert_eq!(ErrorReport::from_target(&TypedValue::from("boom")), None);
    assert_eq!(
        ErrorReport::from_target(&TypedValue::StringMap(BTreeMap::new())),
        None
    );
}

#[test]
fn from_error_uses_display() {
    let err = Error::Settings("bad toml".to_string());
    let report = ErrorReport::from_error(&err);
    assert_eq!(report.message, err.to_string());
    assert_eq!(report.name, "Error");
}

#[test]
fn reporter_notifies_under_identity_key() {
    let center = Rc::new(NotificationCenter::new());
    let reporter = ErrorReporter::new(center.clone());

    reporter.report(&ErrorReport::new("same"));
    reporter.report(&ErrorReport::new(" same "));

    assert_eq!(center.ids(), vec!["same".to_string()]);
}

#[test]
fn reporter_swallows_sink_failure() {
    let reporter = ErrorReporter::new(Rc::new(FailingSink));
    reporter.report(&ErrorReport::new("ignored"));
}
