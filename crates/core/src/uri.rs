// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping of opened URIs to device actions.

use tether_ipc::TypedValue;

use crate::error::{Error, Result};

/// A device action to offer for an opened URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriIntent {
    /// Title of the device chooser.
    pub title: &'static str,
    pub action: &'static str,
    pub target: TypedValue,
}

/// Scheme of `uri`, lowercased, or `None` if it has no valid scheme.
pub fn scheme(uri: &str) -> Option<String> {
    let (scheme, _) = uri.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some(scheme.to_ascii_lowercase())
}

pub fn intent_for_uri(uri: &str) -> Result<UriIntent> {
    let intent = match scheme(uri).as_deref() {
        Some("sms") => UriIntent {
            title: "Send SMS",
            action: "uriSms",
            target: TypedValue::from(uri),
        },
        Some("tel") => UriIntent {
            title: "Dial Number",
            action: "shareUri",
            target: TypedValue::from(uri),
        },
        Some("file") => UriIntent {
            title: "Share File",
            action: "shareFile",
            target: TypedValue::StringBool(uri.to_string(), false),
        },
        _ => return Err(Error::UnsupportedUri(uri.to_string())),
    };
    Ok(intent)
}

#[cfg(test)]
#[path = "uri_tests.rs"]
mod tests;
