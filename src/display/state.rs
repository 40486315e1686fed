// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last-known display state.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{ConnectionStatus, DisplaySink};
use crate::status::{StatusField, StatusKey};

/// Last values shown on the dashboard.
///
/// Every value starts out stale (`None`) and stays that way until its field
/// has been received at least once. Values are kept raw; see
/// [`render`](super::render) for presentation.
///
/// # Examples
///
/// ```
/// use webhouse_client::display::DisplayState;
/// use webhouse_client::status::StatusKey;
///
/// let mut state = DisplayState::new();
/// assert!(state.is_stale(StatusKey::Temp));
///
/// assert!(state.apply_field(StatusKey::Temp, "22.5"));
/// assert_eq!(state.temperature_celsius(), Some(22.5));
///
/// // Applying the same value again reports no change
/// assert!(!state.apply_field(StatusKey::Temp, "22.5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    connection: Option<ConnectionStatus>,
    temperature: Option<String>,
    alarm_armed: Option<String>,
    alarm_triggered: Option<String>,
}

impl DisplayState {
    /// Creates a new state with every value stale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last connection status, if any was shown.
    #[must_use]
    pub fn connection(&self) -> Option<ConnectionStatus> {
        self.connection
    }

    /// Returns the raw value last shown for `key`.
    #[must_use]
    pub fn raw(&self, key: StatusKey) -> Option<&str> {
        match key {
            StatusKey::Temp => self.temperature.as_deref(),
            StatusKey::AlarmArmed => self.alarm_armed.as_deref(),
            StatusKey::AlarmTriggered => self.alarm_triggered.as_deref(),
        }
    }

    /// Returns true if `key` has never been received.
    #[must_use]
    pub fn is_stale(&self, key: StatusKey) -> bool {
        self.raw(key).is_none()
    }

    /// Returns the raw temperature value.
    #[must_use]
    pub fn temperature(&self) -> Option<&str> {
        self.temperature.as_deref()
    }

    /// Returns the temperature parsed as degrees Celsius.
    #[must_use]
    pub fn temperature_celsius(&self) -> Option<f64> {
        self.temperature.as_deref()?.parse().ok()
    }

    /// Returns whether the alarm is armed, if known.
    #[must_use]
    pub fn alarm_armed(&self) -> Option<bool> {
        self.alarm_armed.as_deref().map(|v| v == "1")
    }

    /// Returns whether the alarm has been triggered, if known.
    #[must_use]
    pub fn alarm_triggered(&self) -> Option<bool> {
        self.alarm_triggered.as_deref().map(|v| v == "1")
    }

    /// Records a raw field value.
    ///
    /// Returns true if the shown value changed.
    pub fn apply_field(&mut self, key: StatusKey, raw_value: &str) -> bool {
        let slot = match key {
            StatusKey::Temp => &mut self.temperature,
            StatusKey::AlarmArmed => &mut self.alarm_armed,
            StatusKey::AlarmTriggered => &mut self.alarm_triggered,
        };
        if slot.as_deref() == Some(raw_value) {
            return false;
        }
        *slot = Some(raw_value.to_string());
        true
    }

    /// Records a decoded field.
    pub fn apply(&mut self, field: &StatusField) -> bool {
        self.apply_field(field.key(), field.raw_value())
    }

    /// Records a connection status.
    ///
    /// Returns true if the shown status changed.
    pub fn apply_connection(&mut self, status: ConnectionStatus) -> bool {
        if self.connection == Some(status) {
            return false;
        }
        self.connection = Some(status);
        true
    }
}

/// A [`DisplayState`] shared between the connection task and readers.
///
/// Cloning is cheap; all clones see the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedDisplay {
    inner: Arc<RwLock<DisplayState>>,
}

impl SharedDisplay {
    /// Creates a new shared display with every value stale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DisplayState {
        self.inner.read().clone()
    }
}

impl DisplaySink for SharedDisplay {
    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.inner.write().apply_connection(status);
    }

    fn set_field(&mut self, key: StatusKey, raw_value: &str) {
        self.inner.write().apply_field(key, raw_value);
    }
}
