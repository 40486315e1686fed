// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Presentation of display updates as text and style.
//!
//! These are the labels and colors of the controller's web dashboard. Front
//! ends that draw their own widgets can ignore this module.

use super::ConnectionStatus;
use crate::status::StatusKey;

/// Connected status and the cleared alarm banner.
pub const GREEN: &str = "#4caf50";
/// Connection errors and the triggered alarm banner.
pub const RED: &str = "#f44336";
/// Armed alarm.
pub const ORANGE: &str = "#ff9800";
/// Disconnected status and disarmed alarm.
pub const GREY: &str = "#888";
/// Banner text.
pub const WHITE: &str = "#fff";

/// Every color [`render_connection`] and [`render_field`] use.
pub const PALETTE: [&str; 5] = [GREEN, RED, ORANGE, GREY, WHITE];

/// Visual style of a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Text color as a CSS hex string.
    pub color: Option<&'static str>,
    /// Background color as a CSS hex string.
    pub background: Option<&'static str>,
    /// Whether the text is bold.
    pub bold: bool,
}

/// Text and style for one dashboard element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The text to show.
    pub text: String,
    /// How to show it.
    pub style: Style,
}

impl Rendered {
    fn colored(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            style: Style {
                color: Some(color),
                ..Style::default()
            },
        }
    }
}

/// Renders the connection status line.
///
/// # Examples
///
/// ```
/// use webhouse_client::display::ConnectionStatus;
/// use webhouse_client::display::render::render_connection;
///
/// let line = render_connection(ConnectionStatus::Connected);
/// assert_eq!(line.text, "System connected");
/// assert_eq!(line.style.color, Some("#4caf50"));
/// ```
#[must_use]
pub fn render_connection(status: ConnectionStatus) -> Rendered {
    match status {
        ConnectionStatus::Connected => Rendered::colored("System connected", GREEN),
        ConnectionStatus::Error => Rendered::colored("Connection error", RED),
        ConnectionStatus::Disconnected => Rendered::colored("Disconnected", GREY),
    }
}

/// Renders one status field.
///
/// Alarm values other than `"1"` render as the cleared state.
///
/// # Examples
///
/// ```
/// use webhouse_client::display::render::render_field;
/// use webhouse_client::status::StatusKey;
///
/// assert_eq!(render_field(StatusKey::Temp, "22.5").text, "22.5 °C");
/// assert_eq!(render_field(StatusKey::AlarmTriggered, "1").text, "ALARM!");
/// ```
#[must_use]
pub fn render_field(key: StatusKey, raw_value: &str) -> Rendered {
    let set = raw_value == "1";
    match key {
        StatusKey::Temp => Rendered {
            text: format!("{raw_value} °C"),
            style: Style::default(),
        },
        StatusKey::AlarmArmed if set => Rendered {
            text: "ARMED".to_string(),
            style: Style {
                color: Some(ORANGE),
                background: None,
                bold: true,
            },
        },
        StatusKey::AlarmArmed => Rendered::colored("DISARMED", GREY),
        StatusKey::AlarmTriggered => Rendered {
            text: if set { "ALARM!" } else { "OK" }.to_string(),
            style: Style {
                color: Some(WHITE),
                background: Some(if set { RED } else { GREEN }),
                bold: false,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_palette_colors_are_used() {
        let mut rendered: Vec<Rendered> = [
            ConnectionStatus::Connected,
            ConnectionStatus::Error,
            ConnectionStatus::Disconnected,
        ]
        .into_iter()
        .map(render_connection)
        .collect();
        for key in StatusKey::ALL {
            rendered.push(render_field(key, "1"));
            rendered.push(render_field(key, "0"));
        }

        for r in rendered {
            for color in [r.style.color, r.style.background].into_iter().flatten() {
                assert!(PALETTE.contains(&color), "{color} missing from PALETTE");
            }
        }
    }

    #[test]
    fn connection_lines() {
        assert_eq!(render_connection(ConnectionStatus::Error).text, "Connection error");
        assert_eq!(render_connection(ConnectionStatus::Error).style.color, Some(RED));
        assert_eq!(render_connection(ConnectionStatus::Disconnected).text, "Disconnected");
        assert_eq!(
            render_connection(ConnectionStatus::Disconnected).style.color,
            Some(GREY)
        );
    }

    #[test]
    fn temperature_passes_raw_text() {
        let rendered = render_field(StatusKey::Temp, "19.0");
        assert_eq!(rendered.text, "19.0 °C");
        assert_eq!(rendered.style, Style::default());
    }

    #[test]
    fn alarm_armed_states() {
        let armed = render_field(StatusKey::AlarmArmed, "1");
        assert_eq!(armed.text, "ARMED");
        assert!(armed.style.bold);
        assert_eq!(armed.style.color, Some(ORANGE));

        let disarmed = render_field(StatusKey::AlarmArmed, "0");
        assert_eq!(disarmed.text, "DISARMED");
        assert!(!disarmed.style.bold);
    }

    #[test]
    fn alarm_triggered_states() {
        let alarm = render_field(StatusKey::AlarmTriggered, "1");
        assert_eq!(alarm.text, "ALARM!");
        assert_eq!(alarm.style.background, Some(RED));

        let ok = render_field(StatusKey::AlarmTriggered, "garbage");
        assert_eq!(ok.text, "OK");
        assert_eq!(ok.style.background, Some(GREEN));
        assert_eq!(ok.style.color, Some(WHITE));
    }
}
