// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance on/off commands.

use crate::command::WireCommand;
use crate::types::{Appliance, SwitchState};

/// Command to switch an appliance on or off.
///
/// The controller firmware matches these tokens literally, including their
/// inconsistent casing (`<HeatOn>` but `<L1on>`).
///
/// # Examples
///
/// ```
/// use webhouse_client::command::{SwitchCommand, WireCommand};
/// use webhouse_client::types::{Appliance, SwitchState};
///
/// assert_eq!(SwitchCommand::on(Appliance::Heating).encode(), "<HeatOn>");
/// assert_eq!(SwitchCommand::off(Appliance::Lamp1).encode(), "<L1off>");
/// assert_eq!(SwitchCommand::on(Appliance::Alarm).encode(), "<AlarmOn>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwitchCommand {
    appliance: Appliance,
    state: SwitchState,
}

impl SwitchCommand {
    /// Creates a command switching `appliance` to `state`.
    #[must_use]
    pub const fn new(appliance: Appliance, state: SwitchState) -> Self {
        Self { appliance, state }
    }

    /// Creates a command switching `appliance` on.
    #[must_use]
    pub const fn on(appliance: Appliance) -> Self {
        Self::new(appliance, SwitchState::On)
    }

    /// Creates a command switching `appliance` off.
    #[must_use]
    pub const fn off(appliance: Appliance) -> Self {
        Self::new(appliance, SwitchState::Off)
    }

    /// Returns the target appliance.
    #[must_use]
    pub const fn appliance(&self) -> Appliance {
        self.appliance
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> SwitchState {
        self.state
    }
}

impl WireCommand for SwitchCommand {
    fn name(&self) -> String {
        let token = match (self.appliance, self.state) {
            (Appliance::Heating, SwitchState::On) => "HeatOn",
            (Appliance::Heating, SwitchState::Off) => "HeatOff",
            (Appliance::Lamp1, SwitchState::On) => "L1on",
            (Appliance::Lamp1, SwitchState::Off) => "L1off",
            (Appliance::Lamp2, SwitchState::On) => "L2on",
            (Appliance::Lamp2, SwitchState::Off) => "L2off",
            (Appliance::Tv, SwitchState::On) => "TVon",
            (Appliance::Tv, SwitchState::Off) => "TVoff",
            (Appliance::Alarm, SwitchState::On) => "AlarmOn",
            (Appliance::Alarm, SwitchState::Off) => "AlarmOff",
        };
        token.to_string()
    }

    fn argument(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_tokens_match_firmware() {
        let expected = [
            (Appliance::Heating, "<HeatOn>", "<HeatOff>"),
            (Appliance::Lamp1, "<L1on>", "<L1off>"),
            (Appliance::Lamp2, "<L2on>", "<L2off>"),
            (Appliance::Tv, "<TVon>", "<TVoff>"),
            (Appliance::Alarm, "<AlarmOn>", "<AlarmOff>"),
        ];
        for (appliance, on, off) in expected {
            assert_eq!(SwitchCommand::on(appliance).encode(), on);
            assert_eq!(SwitchCommand::off(appliance).encode(), off);
        }
    }

    #[test]
    fn switch_command_has_no_argument() {
        let cmd = SwitchCommand::on(Appliance::Tv);
        assert_eq!(cmd.argument(), None);
        assert_eq!(cmd.appliance(), Appliance::Tv);
        assert!(cmd.state().is_on());
    }
}
