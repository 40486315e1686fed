// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lamp dimmer command.

use crate::command::WireCommand;
use crate::types::LampId;

/// Command to set the dimmer level of a lamp.
///
/// The level is passed through verbatim. The dashboard slider produces
/// values in 0-100, but the client does not enforce a range.
///
/// # Examples
///
/// ```
/// use webhouse_client::command::{DimmerCommand, WireCommand};
/// use webhouse_client::types::LampId;
///
/// let cmd = DimmerCommand::new(LampId::first(), 75);
/// assert_eq!(cmd.name(), "Dim1");
/// assert_eq!(cmd.encode(), "<Dim1:75>");
///
/// // Out-of-range values are not clamped
/// assert_eq!(DimmerCommand::new(LampId::first(), 250).encode(), "<Dim1:250>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimmerCommand {
    lamp: LampId,
    value: i64,
}

impl DimmerCommand {
    /// Creates a command setting `lamp` to `value`.
    #[must_use]
    pub fn new(lamp: LampId, value: i64) -> Self {
        Self { lamp, value }
    }

    /// Returns the target lamp.
    #[must_use]
    pub fn lamp(&self) -> &LampId {
        &self.lamp
    }

    /// Returns the dimmer level.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl WireCommand for DimmerCommand {
    fn name(&self) -> String {
        format!("Dim{}", self.lamp)
    }

    fn argument(&self) -> Option<String> {
        Some(self.value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimmer_command_encoding() {
        let cmd = DimmerCommand::new(LampId::second(), 0);
        assert_eq!(cmd.name(), "Dim2");
        assert_eq!(cmd.argument(), Some("0".to_string()));
        assert_eq!(cmd.encode(), "<Dim2:0>");
    }

    #[test]
    fn dimmer_command_passes_negative_values() {
        let cmd = DimmerCommand::new(LampId::first(), -1);
        assert_eq!(cmd.encode(), "<Dim1:-1>");
    }

    #[test]
    fn dimmer_command_named_lamp() {
        let lamp = LampId::new("Porch").unwrap();
        let cmd = DimmerCommand::new(lamp.clone(), 30);
        assert_eq!(cmd.encode(), "<DimPorch:30>");
        assert_eq!(cmd.lamp(), &lamp);
        assert_eq!(cmd.value(), 30);
    }
}
