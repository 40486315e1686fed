// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switchable appliances and their on/off state.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// On/off state of a switchable appliance.
///
/// # Examples
///
/// ```
/// use webhouse_client::types::SwitchState;
///
/// assert_eq!("on".parse::<SwitchState>().unwrap(), SwitchState::On);
/// assert_eq!(SwitchState::from(false), SwitchState::Off);
/// assert!(SwitchState::On.is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchState {
    /// Appliance is off.
    Off,
    /// Appliance is on.
    On,
}

impl SwitchState {
    /// Returns the lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns true for [`SwitchState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "0" | "false" => Ok(Self::Off),
            "on" | "1" | "true" => Ok(Self::On),
            _ => Err(ValueError::InvalidSwitchState(s.to_string())),
        }
    }
}

impl From<bool> for SwitchState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// An appliance the controller can switch on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appliance {
    /// The room heating.
    Heating,
    /// The first lamp (LED 1).
    Lamp1,
    /// The second lamp (LED 2).
    Lamp2,
    /// The television.
    Tv,
    /// The alarm system (arm/disarm).
    Alarm,
}

impl Appliance {
    /// All appliances, in the order the dashboard lists them.
    pub const ALL: [Self; 5] = [
        Self::Heating,
        Self::Lamp1,
        Self::Lamp2,
        Self::Tv,
        Self::Alarm,
    ];

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Heating => "heating",
            Self::Lamp1 => "lamp 1",
            Self::Lamp2 => "lamp 2",
            Self::Tv => "TV",
            Self::Alarm => "alarm",
        }
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Appliance {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heat" | "heating" => Ok(Self::Heating),
            "l1" | "led1" | "lamp1" => Ok(Self::Lamp1),
            "l2" | "led2" | "lamp2" => Ok(Self::Lamp2),
            "tv" => Ok(Self::Tv),
            "alarm" => Ok(Self::Alarm),
            _ => Err(ValueError::UnknownAppliance(s.to_string())),
        }
    }
}
