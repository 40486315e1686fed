// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target temperature command.

use crate::command::WireCommand;

/// Command to set the target room temperature in °C.
///
/// The controller runs a bang-bang loop against this target. The value is
/// formatted with the shortest representation that round-trips, so whole
/// numbers carry no fractional part.
///
/// # Examples
///
/// ```
/// use webhouse_client::command::{TargetTempCommand, WireCommand};
///
/// assert_eq!(TargetTempCommand::new(22.0).encode(), "<SetTemp:22>");
/// assert_eq!(TargetTempCommand::new(19.5).encode(), "<SetTemp:19.5>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTempCommand {
    value: f64,
}

impl TargetTempCommand {
    /// Creates a command for the given target temperature.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }

    /// Returns the target temperature.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

impl WireCommand for TargetTempCommand {
    fn name(&self) -> String {
        "SetTemp".to_string()
    }

    fn argument(&self) -> Option<String> {
        Some(self.value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_temp_whole_number() {
        assert_eq!(TargetTempCommand::new(21.0).argument(), Some("21".to_string()));
    }

    #[test]
    fn target_temp_fraction() {
        let cmd = TargetTempCommand::new(20.25);
        assert_eq!(cmd.name(), "SetTemp");
        assert_eq!(cmd.encode(), "<SetTemp:20.25>");
    }

    #[test]
    fn target_temp_out_of_range_passthrough() {
        assert_eq!(TargetTempCommand::new(-40.0).encode(), "<SetTemp:-40>");
        assert_eq!(TargetTempCommand::new(500.0).encode(), "<SetTemp:500>");
    }
}
