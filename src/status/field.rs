// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status field keys and decoded field values.

use std::fmt;
use std::str::FromStr;

/// A key the controller reports in its status frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKey {
    /// Current room temperature, as a decimal string (e.g. `"22.5"`).
    Temp,
    /// Whether the alarm is armed (`"0"` / `"1"`).
    AlarmArmed,
    /// Whether the alarm has been triggered (`"0"` / `"1"`).
    AlarmTriggered,
}

impl StatusKey {
    /// All keys, in the order the controller sends them.
    pub const ALL: [Self; 3] = [Self::Temp, Self::AlarmArmed, Self::AlarmTriggered];

    /// Returns the key token as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temp => "Temp",
            Self::AlarmArmed => "AlarmArmed",
            Self::AlarmTriggered => "AlarmTriggered",
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a wire key token.
///
/// Matching is exact and case-sensitive; unknown tokens yield `Err(())`.
impl FromStr for StatusKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Temp" => Ok(Self::Temp),
            "AlarmArmed" => Ok(Self::AlarmArmed),
            "AlarmTriggered" => Ok(Self::AlarmTriggered),
            _ => Err(()),
        }
    }
}

/// One decoded key/value pair from a status frame.
///
/// The value is kept exactly as received. Interpreting it is up to the
/// display; [`temperature`](Self::temperature) and [`flag`](Self::flag) are
/// convenience helpers.
///
/// # Examples
///
/// ```
/// use webhouse_client::status::{StatusField, StatusKey};
///
/// let field = StatusField::new(StatusKey::Temp, "22.5");
/// assert_eq!(field.raw_value(), "22.5");
/// assert_eq!(field.temperature(), Some(22.5));
///
/// let armed = StatusField::new(StatusKey::AlarmArmed, "1");
/// assert_eq!(armed.flag(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusField {
    key: StatusKey,
    raw_value: String,
}

impl StatusField {
    /// Creates a field from a key and its raw value.
    #[must_use]
    pub fn new(key: StatusKey, raw_value: impl Into<String>) -> Self {
        Self {
            key,
            raw_value: raw_value.into(),
        }
    }

    /// Returns the field key.
    #[must_use]
    pub const fn key(&self) -> StatusKey {
        self.key
    }

    /// Returns the value as received.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// Parses a `Temp` value as degrees Celsius.
    ///
    /// Returns `None` for other keys or unparseable values.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        match self.key {
            StatusKey::Temp => self.raw_value.parse().ok(),
            StatusKey::AlarmArmed | StatusKey::AlarmTriggered => None,
        }
    }

    /// Interprets an alarm value: `"1"` is set, anything else is clear.
    ///
    /// Returns `None` for the `Temp` key.
    #[must_use]
    pub fn flag(&self) -> Option<bool> {
        match self.key {
            StatusKey::AlarmArmed | StatusKey::AlarmTriggered => Some(self.raw_value == "1"),
            StatusKey::Temp => None,
        }
    }
}
