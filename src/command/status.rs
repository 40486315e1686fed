// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status query command.

use crate::command::WireCommand;

/// Command asking the controller for a fresh status frame.
///
/// The controller answers every command with a status frame, so this is the
/// no-op command used for liveness polling.
///
/// # Examples
///
/// ```
/// use webhouse_client::command::{StatusCommand, WireCommand};
///
/// assert_eq!(StatusCommand.name(), "GetStatus");
/// assert_eq!(StatusCommand.argument(), None);
/// assert_eq!(StatusCommand.encode(), "<GetStatus>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCommand;

impl WireCommand for StatusCommand {
    fn name(&self) -> String {
        "GetStatus".to_string()
    }

    fn argument(&self) -> Option<String> {
        None
    }
}
