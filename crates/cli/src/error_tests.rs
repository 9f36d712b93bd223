// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn missing_required_option_names_both_flags() {
    let err = Error::MissingRequiredOption {
        given: "--message",
        missing: "--message-body",
    };
    let msg = err.to_string();
    assert!(msg.starts_with("missing --message-body option"));
    assert!(msg.contains("--message requires --message-body"));
}

#[test]
fn bus_registration_names_the_bus() {
    let err = Error::BusRegistration {
        name: tether_ipc::BUS_NAME,
        reason: "permission denied".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "failed to register org.tether.Tether: permission denied"
    );
}

#[test]
fn bus_errors_are_transparent() {
    let err = Error::from(tether_ipc::BusError::Cancelled);
    assert_eq!(err.to_string(), "call cancelled");
}

#[test]
fn core_errors_are_transparent() {
    let err = Error::from(tether_core::Error::UnsupportedUri("http://x".to_string()));
    assert_eq!(err.to_string(), "unsupported URI: http://x");
}
