// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Action envelopes and their wire codec.
//!
//! An envelope addresses one device (or all of them) and names an action
//! with an optional typed target. On the wire it is the tuple
//! `(selector, action, has_target, target)` serialized as JSON:
//!
//! ```json
//! {"selector":"*","action":"ping","has_target":true,"target":{"type":"string","value":""}}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selector value addressing every registered device.
pub const WILDCARD: &str = "*";

/// Errors raised by the envelope codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("malformed envelope: {0}")]
    Malformed(String),

    #[error("failed to encode envelope: {0}")]
    Encode(String),
}

/// Addressing mode of an action invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Every device currently registered.
    All,
    /// A single device by id.
    Device(String),
}

impl Selector {
    /// Parse a selector from its wire form (`*` or a device id).
    pub fn parse(s: &str) -> Self {
        if s == WILDCARD {
            Selector::All
        } else {
            Selector::Device(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selector::All => WILDCARD,
            Selector::Device(id) => id,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Selector::parse(s)
    }
}

/// Payload shapes that may cross the process boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    String(String),
    Bool(bool),
    StringArray(Vec<String>),
    StringBool(String, bool),
    StringPair(String, String),
    StringMap(BTreeMap<String, String>),
    Dict(BTreeMap<String, TypedValue>),
}

/// Discriminant of a [`TypedValue`], used to declare and report expected shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    StringArray,
    StringBool,
    StringPair,
    StringMap,
    Dict,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
            ValueKind::StringArray => "string_array",
            ValueKind::StringBool => "string_bool",
            ValueKind::StringPair => "string_pair",
            ValueKind::StringMap => "string_map",
            ValueKind::Dict => "dict",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TypedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::String(_) => ValueKind::String,
            TypedValue::Bool(_) => ValueKind::Bool,
            TypedValue::StringArray(_) => ValueKind::StringArray,
            TypedValue::StringBool(..) => ValueKind::StringBool,
            TypedValue::StringPair(..) => ValueKind::StringPair,
            TypedValue::StringMap(_) => ValueKind::StringMap,
            TypedValue::Dict(_) => ValueKind::Dict,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            TypedValue::StringMap(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

/// An action addressed to one or all devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEnvelope {
    pub selector: Selector,
    pub action: String,
    pub target: Option<TypedValue>,
}

impl ActionEnvelope {
    /// Create an envelope with no target.
    pub fn new(selector: impl Into<Selector>, action: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            action: action.into(),
            target: None,
        }
    }

    /// Attach a target value.
    pub fn with_target(mut self, target: TypedValue) -> Self {
        self.target = Some(target);
        self
    }
}

#[derive(Serialize)]
struct WireEnvelopeRef<'a> {
    selector: &'a str,
    action: &'a str,
    has_target: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a TypedValue>,
}

#[derive(Deserialize)]
struct WireEnvelope {
    selector: String,
    action: String,
    has_target: bool,
    #[serde(default)]
    target: Option<TypedValue>,
}

/// Encode an envelope to its wire bytes.
pub fn encode(envelope: &ActionEnvelope) -> Result<Vec<u8>, EnvelopeError> {
    let wire = WireEnvelopeRef {
        selector: envelope.selector.as_str(),
        action: &envelope.action,
        has_target: envelope.target.is_some(),
        target: envelope.target.as_ref(),
    };
    serde_json::to_vec(&wire).map_err(|e| EnvelopeError::Encode(e.to_string()))
}

/// Decode wire bytes into a complete envelope.
///
/// Either every field is present and well-typed or the whole decode fails;
/// a target is only honoured when `has_target` is set.
pub fn decode(bytes: &[u8]) -> Result<ActionEnvelope, EnvelopeError> {
    let wire: WireEnvelope =
        serde_json::from_slice(bytes).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;

    let target = if wire.has_target {
        match wire.target {
            Some(target) => Some(target),
            None => {
                return Err(EnvelopeError::Malformed(
                    "has_target is set but no target was given".to_string(),
                ))
            }
        }
    } else {
        None
    };

    Ok(ActionEnvelope {
        selector: Selector::parse(&wire.selector),
        action: wire.action,
        target,
    })
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
