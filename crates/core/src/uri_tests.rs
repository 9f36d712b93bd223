// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    sms = { "sms:+15551234?body=hi", "Send SMS", "uriSms" },
    tel = { "tel:+15551234", "Dial Number", "shareUri" },
    upper_tel = { "TEL:+15551234", "Dial Number", "shareUri" },
    file = { "file:///home/me/a.txt", "Share File", "shareFile" },
)]
fn supported_schemes(uri: &str, title: &str, action: &str) {
    let intent = intent_for_uri(uri).unwrap();
    assert_eq!(intent.title, title);
    assert_eq!(intent.action, action);
}

#[test]
fn file_target_is_string_bool() {
    let intent = intent_for_uri("file:///tmp/a").unwrap();
    assert_eq!(
        intent.target,
        TypedValue::StringBool("file:///tmp/a".to_string(), false)
    );
}

#[test]
fn sms_target_is_whole_uri() {
    let intent = intent_for_uri("sms:+15551234").unwrap();
    assert_eq!(intent.target, TypedValue::from("sms:+15551234"));
}

#[parameterized(
    http = { "https://example.org" },
    no_scheme = { "/tmp/a" },
    empty = { "" },
    bad_scheme = { "1abc:x" },
)]
fn unsupported(uri: &str) {
    assert!(matches!(intent_for_uri(uri), Err(Error::UnsupportedUri(u)) if u == uri));
}

#[parameterized(
    simple = { "sms:1", Some("sms") },
    plus = { "svn+ssh://x", Some("svn+ssh") },
    none = { "plain", None },
    leading_digit = { "9p:x", None },
)]
fn scheme_parsing(uri: &str, expected: Option<&str>) {
    assert_eq!(scheme(uri).as_deref(), expected);
}
