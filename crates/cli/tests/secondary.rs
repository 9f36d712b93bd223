// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn secondary_lists_through_the_primary() {
    let sandbox = Sandbox::new();
    let id = device_id("phone");
    sandbox.remember(std::slice::from_ref(&id));
    let primary = sandbox.spawn_primary();

    sandbox
        .tether()
        .arg("--list-all")
        .assert()
        .success()
        .stdout(format!("{}\t{}\tfalse\tfalse\n", id, id));

    assert!(sandbox.stop_primary(primary).success());
}

#[test]
fn secondary_actions_are_routed_by_the_primary() {
    let sandbox = Sandbox::new();
    let primary = sandbox.spawn_primary();

    sandbox
        .tether()
        .args(["-d", "abc123", "--ping"])
        .assert()
        .success();

    assert!(sandbox.stop_primary(primary).success());
    assert!(sandbox.log().contains("device not found: abc123"));
}

#[test]
fn secondary_without_intent_activates_the_primary() {
    let sandbox = Sandbox::new();
    let primary = sandbox.spawn_primary();

    sandbox.tether().assert().success();

    assert!(sandbox.stop_primary(primary).success());
    assert!(!sandbox.log().contains("failed to read request"));
}

#[test]
fn secondary_hands_uris_to_the_primary() {
    let sandbox = Sandbox::new();
    let primary = sandbox.spawn_primary();

    sandbox
        .tether()
        .args(["sms:+15551234", "https://example.org"])
        .assert()
        .success();

    assert!(sandbox.stop_primary(primary).success());
    let log = sandbox.log();
    assert!(log.contains("device chooser requested"));
    assert!(log.contains("unsupported URI: https://example.org"));
}
