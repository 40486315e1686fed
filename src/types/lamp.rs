// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lamp identifier type for dimmer commands.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Identifier of a dimmable lamp on the controller.
///
/// The identifier is spliced directly into the command name (`<Dim1:75>`),
/// so it must not contain any character that would end the token early or
/// be mistaken for the argument separator.
///
/// # Examples
///
/// ```
/// use webhouse_client::types::LampId;
///
/// let lamp = LampId::new("1").unwrap();
/// assert_eq!(lamp.as_str(), "1");
///
/// // Delimiters are rejected
/// assert!(LampId::new("1:2").is_err());
/// assert!(LampId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LampId(String);

impl LampId {
    /// Characters reserved by the command framing.
    const RESERVED: [char; 4] = ['<', '>', ':', ';'];

    /// Creates a new lamp identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidLampId` if the identifier is empty or
    /// contains whitespace or one of `<`, `>`, `:`, `;`.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        if id.is_empty()
            || id
                .chars()
                .any(|c| c.is_whitespace() || Self::RESERVED.contains(&c))
        {
            return Err(ValueError::InvalidLampId(id));
        }
        Ok(Self(id))
    }

    /// Identifier of the first lamp.
    #[must_use]
    pub fn first() -> Self {
        Self("1".to_string())
    }

    /// Identifier of the second lamp.
    #[must_use]
    pub fn second() -> Self {
        Self("2".to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LampId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<u32> for LampId {
    type Error = ValueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}
