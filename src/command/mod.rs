// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller command definitions.
//!
//! This module provides typed representations of the commands the webhouse
//! controller understands, and their encoding into the wire format.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Wire form |
//! |-------------|---------|-----------|
//! | [`DimmerCommand`] | Set a lamp's dimmer level | `<Dim1:75>` |
//! | [`TargetTempCommand`] | Set the target room temperature | `<SetTemp:21.5>` |
//! | [`SwitchCommand`] | Switch an appliance on or off | `<HeatOn>`, `<L1off>` |
//! | [`StatusCommand`] | Ask for a status frame | `<GetStatus>` |
//!
//! # Command Structure
//!
//! Every command is a single angle-bracket delimited token: a name and an
//! optional argument separated by `:`. There is no escaping and no
//! terminator; the controller pushes a status frame after each command it
//! receives, so no command carries a correlation id.
//!
//! # Examples
//!
//! ```
//! use webhouse_client::command::{Command, DimmerCommand, WireCommand, encode_command};
//! use webhouse_client::types::LampId;
//!
//! let dim = DimmerCommand::new(LampId::first(), 75);
//! assert_eq!(dim.name(), "Dim1");
//! assert_eq!(dim.argument(), Some("75".to_string()));
//! assert_eq!(encode_command(&dim), "<Dim1:75>");
//!
//! assert_eq!(Command::GetStatus.encode(), "<GetStatus>");
//! ```

mod climate;
mod dimmer;
mod status;
mod switch;

pub use climate::TargetTempCommand;
pub use dimmer::DimmerCommand;
pub use status::StatusCommand;
pub use switch::SwitchCommand;

use crate::types::{Appliance, LampId, SwitchState};

/// A command that can be sent to the controller.
pub trait WireCommand {
    /// Returns the command name, including any embedded identifier.
    ///
    /// For example `"GetStatus"`, `"SetTemp"`, `"Dim1"`.
    fn name(&self) -> String;

    /// Returns the command argument, if any.
    fn argument(&self) -> Option<String>;

    /// Returns the full wire token.
    ///
    /// Format: `<name:argument>` or `<name>` if there is no argument.
    fn encode(&self) -> String {
        match self.argument() {
            Some(arg) => format!("<{}:{arg}>", self.name()),
            None => format!("<{}>", self.name()),
        }
    }
}

/// Encodes a command into its wire token.
///
/// This is a pure function; no range validation is performed on numeric
/// arguments.
#[must_use]
pub fn encode_command<C: WireCommand + ?Sized>(command: &C) -> String {
    command.encode()
}

/// Any command the controller understands.
///
/// Commands are ephemeral: build one for a user action, encode it, and
/// discard it.
///
/// # Examples
///
/// ```
/// use webhouse_client::command::{Command, WireCommand};
/// use webhouse_client::types::{Appliance, LampId, SwitchState};
///
/// assert_eq!(Command::set_dimmer(LampId::second(), 40).encode(), "<Dim2:40>");
/// assert_eq!(Command::set_target_temp(22.0).encode(), "<SetTemp:22>");
/// assert_eq!(Command::switch(Appliance::Tv, SwitchState::On).encode(), "<TVon>");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set a lamp's dimmer level.
    SetDimmer(DimmerCommand),
    /// Set the target temperature.
    SetTargetTemp(TargetTempCommand),
    /// Switch an appliance on or off.
    Switch(SwitchCommand),
    /// Request a status frame.
    GetStatus,
}

impl Command {
    /// Creates a dimmer command.
    #[must_use]
    pub fn set_dimmer(lamp: LampId, value: i64) -> Self {
        Self::SetDimmer(DimmerCommand::new(lamp, value))
    }

    /// Creates a target temperature command.
    #[must_use]
    pub fn set_target_temp(value: f64) -> Self {
        Self::SetTargetTemp(TargetTempCommand::new(value))
    }

    /// Creates an appliance switch command.
    #[must_use]
    pub fn switch(appliance: Appliance, state: SwitchState) -> Self {
        Self::Switch(SwitchCommand::new(appliance, state))
    }

    fn as_wire(&self) -> &dyn WireCommand {
        match self {
            Self::SetDimmer(cmd) => cmd,
            Self::SetTargetTemp(cmd) => cmd,
            Self::Switch(cmd) => cmd,
            Self::GetStatus => &StatusCommand,
        }
    }
}

impl WireCommand for Command {
    fn name(&self) -> String {
        self.as_wire().name()
    }

    fn argument(&self) -> Option<String> {
        self.as_wire().argument()
    }
}

impl From<DimmerCommand> for Command {
    fn from(cmd: DimmerCommand) -> Self {
        Self::SetDimmer(cmd)
    }
}

impl From<TargetTempCommand> for Command {
    fn from(cmd: TargetTempCommand) -> Self {
        Self::SetTargetTemp(cmd)
    }
}

impl From<SwitchCommand> for Command {
    fn from(cmd: SwitchCommand) -> Self {
        Self::Switch(cmd)
    }
}

impl From<StatusCommand> for Command {
    fn from(_: StatusCommand) -> Self {
        Self::GetStatus
    }
}
