// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use super::*;
use yare::parameterized;

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn nested_dict() -> TypedValue {
    let mut inner = BTreeMap::new();
    inner.insert("names".to_string(), TypedValue::StringArray(vec![]));
    inner.insert(
        "labels".to_string(),
        TypedValue::StringMap(string_map(&[("a", "1")])),
    );
    let mut outer = BTreeMap::new();
    outer.insert("title".to_string(), TypedValue::from("Hi"));
    outer.insert("isClearable".to_string(), TypedValue::Bool(true));
    outer.insert("inner".to_string(), TypedValue::Dict(inner));
    TypedValue::Dict(outer)
}

#[parameterized(
    none = { None },
    string = { Some(TypedValue::from("hello")) },
    empty_string = { Some(TypedValue::from("")) },
    boolean = { Some(TypedValue::Bool(false)) },
    string_array = { Some(TypedValue::StringArray(vec!["a".to_string(), "b".to_string()])) },
    empty_array = { Some(TypedValue::StringArray(vec![])) },
    string_bool = { Some(TypedValue::StringBool("file:///tmp/a.txt".to_string(), false)) },
    string_pair = { Some(TypedValue::StringPair("+15551234".to_string(), "hello".to_string())) },
    string_map = { Some(TypedValue::StringMap(super::string_map(&[("name", "Error"), ("message", "boom")]))) },
    empty_map = { Some(TypedValue::StringMap(BTreeMap::new())) },
    empty_dict = { Some(TypedValue::Dict(BTreeMap::new())) },
    nested_dict = { Some(super::nested_dict()) },
)]
fn round_trip(target: Option<TypedValue>) {
    let envelope = ActionEnvelope {
        selector: Selector::Device("abc123".to_string()),
        action: "ping".to_string(),
        target,
    };
    let bytes = encode(&envelope).unwrap();
    assert_eq!(decode(&bytes).unwrap(), envelope);
}

#[test]
fn wildcard_selector_round_trips() {
    let envelope = ActionEnvelope::new(Selector::All, "ring");
    let bytes = encode(&envelope).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.selector, Selector::All);
    assert_eq!(decoded.target, None);
}

#[test]
fn wire_shape_carries_has_target_flag() {
    let envelope = ActionEnvelope::new("abc123", "ping").with_target(TypedValue::from(""));
    let value: serde_json::Value = serde_json::from_slice(&encode(&envelope).unwrap()).unwrap();
    assert_eq!(value["selector"], "abc123");
    assert_eq!(value["action"], "ping");
    assert_eq!(value["has_target"], true);
    assert_eq!(value["target"]["type"], "string");
}

#[parameterized(
    missing_selector = { r#"{"action":"ping","has_target":false}"# },
    numeric_action = { r#"{"selector":"*","action":7,"has_target":false}"# },
    unknown_discriminant = { r#"{"selector":"*","action":"ping","has_target":true,"target":{"type":"variant","value":1}}"# },
    mismatched_content = { r#"{"selector":"*","action":"ping","has_target":true,"target":{"type":"bool","value":"yes"}}"# },
    target_flag_without_value = { r#"{"selector":"*","action":"ping","has_target":true}"# },
    not_json = { "selector=*" },
)]
fn decode_rejects_malformed(input: &str) {
    let err = decode(input.as_bytes()).unwrap_err();
    assert!(matches!(err, EnvelopeError::Malformed(_)), "{:?}", err);
}

#[test]
fn decode_ignores_target_when_flag_unset() {
    let input = r#"{"selector":"abc","action":"ring","has_target":false,"target":{"type":"string","value":"x"}}"#;
    let envelope = decode(input.as_bytes()).unwrap();
    assert_eq!(envelope.target, None);
}

#[parameterized(
    wildcard = { "*", Selector::All },
    device = { "abc123", Selector::Device("abc123".to_string()) },
    star_prefix = { "*abc", Selector::Device("*abc".to_string()) },
)]
fn selector_parse(input: &str, expected: Selector) {
    assert_eq!(Selector::parse(input), expected);
    assert_eq!(expected.as_str(), input);
}

#[test]
fn value_kind_names_match_wire_tags() {
    for value in [
        TypedValue::from("s"),
        TypedValue::Bool(true),
        TypedValue::StringArray(vec![]),
        TypedValue::StringBool("s".to_string(), true),
        TypedValue::StringPair("a".to_string(), "b".to_string()),
        TypedValue::StringMap(BTreeMap::new()),
        TypedValue::Dict(BTreeMap::new()),
    ] {
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], value.kind().as_str());
    }
}
