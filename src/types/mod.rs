// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for controller commands.
//!
//! # Types
//!
//! - [`LampId`] - Identifier of a dimmable lamp, safe to splice into a command token
//! - [`SwitchState`] - On/Off state for switchable appliances
//! - [`Appliance`] - The appliances the controller can switch
//!
//! Numeric command arguments (dimmer level, target temperature) are plain
//! integers and floats: the controller clamps them, the client does not.

mod lamp;
mod switch;

pub use lamp::LampId;
pub use switch::{Appliance, SwitchState};
