// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status frame decoding.
//!
//! The controller answers every command with a status frame of
//! semicolon-joined `key:value` pairs:
//!
//! ```text
//! Temp:22.5;AlarmArmed:1;AlarmTriggered:0
//! ```
//!
//! Older firmware sends only `Temp:<value>`. Both decode through the same
//! path. Decoding never fails: segments without a `:` and unknown keys are
//! dropped, so an empty or garbled payload yields an empty frame.
//!
//! # Examples
//!
//! ```
//! use webhouse_client::status::{StatusKey, decode_status};
//!
//! let frame = decode_status("Temp:22.5;AlarmArmed:1;AlarmTriggered:0");
//! assert_eq!(frame.len(), 3);
//! assert_eq!(frame.get(StatusKey::Temp), Some("22.5"));
//!
//! // Legacy single-field frame
//! let legacy = decode_status("Temp:19.0");
//! assert_eq!(legacy.get(StatusKey::Temp), Some("19.0"));
//! assert_eq!(legacy.get(StatusKey::AlarmArmed), None);
//! ```

mod field;

pub use field::{StatusField, StatusKey};

/// A decoded status frame: the recognized fields, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFrame {
    fields: Vec<StatusField>,
}

impl StatusFrame {
    /// Returns the decoded fields in the order they appeared.
    #[must_use]
    pub fn fields(&self) -> &[StatusField] {
        &self.fields
    }

    /// Returns an iterator over the fields in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, StatusField> {
        self.fields.iter()
    }

    /// Returns the number of decoded fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field was recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the raw value for `key`.
    ///
    /// If the key appears more than once, the last occurrence wins.
    #[must_use]
    pub fn get(&self, key: StatusKey) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.key() == key)
            .map(StatusField::raw_value)
    }

    /// Consumes the frame and returns its fields.
    #[must_use]
    pub fn into_fields(self) -> Vec<StatusField> {
        self.fields
    }
}

impl IntoIterator for StatusFrame {
    type Item = StatusField;
    type IntoIter = std::vec::IntoIter<StatusField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatusFrame {
    type Item = &'a StatusField;
    type IntoIter = std::slice::Iter<'a, StatusField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Decodes one status payload into its recognized fields.
///
/// The payload is split on `;`; each trimmed segment is split on its first
/// `:` into key and value. The key must match a [`StatusKey`] exactly. The
/// value is everything after the first `:`, untouched.
#[must_use]
pub fn decode_status(raw: &str) -> StatusFrame {
    let fields = raw
        .split(';')
        .filter_map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return None;
            }
            let Some((key, value)) = segment.split_once(':') else {
                tracing::debug!(segment = %segment, "Dropping status segment without separator");
                return None;
            };
            match key.parse::<StatusKey>() {
                Ok(key) => Some(StatusField::new(key, value)),
                Err(()) => {
                    tracing::debug!(key = %key, "Ignoring unknown status key");
                    None
                }
            }
        })
        .collect();

    StatusFrame { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(frame: &StatusFrame) -> Vec<(StatusKey, &str)> {
        frame.iter().map(|f| (f.key(), f.raw_value())).collect()
    }

    #[test]
    fn decode_full_frame() {
        let frame = decode_status("Temp:22.5;AlarmArmed:1;AlarmTriggered:0");
        assert_eq!(
            pairs(&frame),
            vec![
                (StatusKey::Temp, "22.5"),
                (StatusKey::AlarmArmed, "1"),
                (StatusKey::AlarmTriggered, "0"),
            ]
        );
    }

    #[test]
    fn decode_legacy_single_field() {
        let frame = decode_status("Temp:19.0");
        assert_eq!(pairs(&frame), vec![(StatusKey::Temp, "19.0")]);
    }

    #[test]
    fn decode_empty_payload() {
        assert!(decode_status("").is_empty());
        assert!(decode_status(";;;").is_empty());
        assert!(decode_status("   \n").is_empty());
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let frame = decode_status("Foo:bar;Temp:20");
        assert_eq!(pairs(&frame), vec![(StatusKey::Temp, "20")]);
    }

    #[test]
    fn decode_drops_segments_without_separator() {
        let frame = decode_status("garbage;AlarmArmed:0;Temp");
        assert_eq!(pairs(&frame), vec![(StatusKey::AlarmArmed, "0")]);
    }

    #[test]
    fn decode_matches_key_exactly() {
        // A substring match on "Temp:" would have accepted both of these.
        let frame = decode_status("RoomTemp:30;Note:Temp:31;Temp:21");
        assert_eq!(pairs(&frame), vec![(StatusKey::Temp, "21")]);
    }

    #[test]
    fn decode_keeps_value_after_first_separator() {
        let frame = decode_status("Temp:21:5");
        assert_eq!(frame.get(StatusKey::Temp), Some("21:5"));
    }

    #[test]
    fn decode_trims_whitespace_and_newlines() {
        let frame = decode_status("Temp:22.0 ;\nAlarmArmed:1\r\n");
        assert_eq!(
            pairs(&frame),
            vec![(StatusKey::Temp, "22.0"), (StatusKey::AlarmArmed, "1")]
        );
    }

    #[test]
    fn decode_keeps_empty_values() {
        let frame = decode_status("Temp:");
        assert_eq!(pairs(&frame), vec![(StatusKey::Temp, "")]);
    }

    #[test]
    fn duplicate_keys_keep_order_and_last_wins() {
        let frame = decode_status("Temp:20;AlarmArmed:0;Temp:21");
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.get(StatusKey::Temp), Some("21"));
        assert_eq!(frame.fields()[0].raw_value(), "20");
    }

    #[test]
    fn frame_into_fields() {
        let fields = decode_status("AlarmTriggered:1").into_fields();
        assert_eq!(fields, vec![StatusField::new(StatusKey::AlarmTriggered, "1")]);
    }
}
