// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notifications raised by the daemon itself.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use tether_ipc::TypedValue;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub priority: Priority,
    /// Application action activated when the notification is clicked.
    pub default_action: Option<(String, TypedValue)>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: String::new(),
            priority: Priority::Normal,
            default_action: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn default_action(mut self, action: impl Into<String>, target: TypedValue) -> Self {
        self.default_action = Some((action.into(), target));
        self
    }
}

/// Destination for notifications.
///
/// Sending with an id already on display replaces that notification.
pub trait NotificationSink {
    fn send(&self, id: &str, notification: Notification) -> Result<()>;

    fn withdraw(&self, id: &str);
}

/// In-process notification sink: keeps the notifications on display and
/// logs each one.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    shown: RefCell<BTreeMap<String, Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Notification> {
        self.shown.borrow().get(id).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.shown.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.shown.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.borrow().is_empty()
    }
}

impl NotificationSink for NotificationCenter {
    fn send(&self, id: &str, notification: Notification) -> Result<()> {
        tracing::info!(
            id,
            title = %notification.title,
            priority = %notification.priority,
            "notification"
        );
        self.shown.borrow_mut().insert(id.to_string(), notification);
        Ok(())
    }

    fn withdraw(&self, id: &str) {
        self.shown.borrow_mut().remove(id);
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
