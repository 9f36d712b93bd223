// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Device identifier and device name predicates.

/// Shortest device id the protocol accepts.
pub const DEVICE_ID_MIN_LEN: usize = 32;
/// Longest device id the protocol accepts.
pub const DEVICE_ID_MAX_LEN: usize = 38;
/// Longest device name, in characters.
pub const MAX_NAME_LEN: usize = 32;
/// Name used when the host name normalizes to nothing.
pub const FALLBACK_NAME: &str = "Tether";

const FORBIDDEN_NAME_CHARS: &[char] = &[
    '"', '\'', ',', ';', ':', '.', '!', '?', '(', ')', '[', ']', '<', '>',
];

/// Validate a device id: 32-38 characters of `[A-Za-z0-9_]`.
pub fn validate_device_id(id: &str) -> bool {
    (DEVICE_ID_MIN_LEN..=DEVICE_ID_MAX_LEN).contains(&id.len())
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a device name used as the rendezvous name on discovery.
pub fn validate_name(name: &str) -> bool {
    let len = name.chars().count();
    (1..=MAX_NAME_LEN).contains(&len)
        && name
            .chars()
            .all(|c| !c.is_control() && !FORBIDDEN_NAME_CHARS.contains(&c))
}

/// Turn an arbitrary string (usually the host name) into a valid device name.
pub fn normalize_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control() && !FORBIDDEN_NAME_CHARS.contains(c))
        .take(MAX_NAME_LEN)
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The host name of this machine, or the fallback name if unavailable.
pub fn host_name() -> String {
    #[cfg(unix)]
    {
        if let Ok(name) = nix::unistd::gethostname() {
            let name = name.to_string_lossy().into_owned();
            if !name.is_empty() {
                return name;
            }
        }
    }
    FALLBACK_NAME.to_string()
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
