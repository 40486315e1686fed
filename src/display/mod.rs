// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display sink interface and ready-made sinks.
//!
//! The connection layer never renders anything itself. It pushes update
//! instructions into a [`DisplaySink`] and never reads them back.
//!
//! # Sinks
//!
//! - [`SharedDisplay`] - keeps the last known [`DisplayState`] behind a lock
//! - `mpsc::UnboundedSender<DisplayUpdate>` - forwards every update as an event
//! - `Box<dyn DisplaySink>` - for choosing a sink at runtime
//!
//! [`render`] maps updates to the text and colors the dashboard shows.
//!
//! # Examples
//!
//! ```
//! use webhouse_client::display::{ConnectionStatus, DisplaySink, SharedDisplay};
//! use webhouse_client::status::StatusKey;
//!
//! let display = SharedDisplay::new();
//! let mut sink = display.clone();
//!
//! sink.set_connection_status(ConnectionStatus::Connected);
//! sink.set_field(StatusKey::Temp, "21.5");
//!
//! let state = display.snapshot();
//! assert_eq!(state.temperature(), Some("21.5"));
//! assert!(state.is_stale(StatusKey::AlarmArmed));
//! ```

pub mod render;
mod state;

pub use state::{DisplayState, SharedDisplay};

use std::fmt;

use tokio::sync::mpsc;

use crate::status::StatusKey;

/// Connection status shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    /// The connection to the controller is open.
    Connected,
    /// The connection failed or dropped abnormally.
    Error,
    /// The connection was closed.
    Disconnected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connected => "connected",
            Self::Error => "error",
            Self::Disconnected => "disconnected",
        };
        f.write_str(label)
    }
}

/// Receiver of display update instructions.
///
/// Implementations are called from the connection task, one update at a
/// time and in wire order. They must not block.
pub trait DisplaySink: Send + 'static {
    /// Shows a new connection status.
    fn set_connection_status(&mut self, status: ConnectionStatus);

    /// Shows a new raw value for one status field.
    fn set_field(&mut self, key: StatusKey, raw_value: &str);
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn set_connection_status(&mut self, status: ConnectionStatus) {
        (**self).set_connection_status(status);
    }

    fn set_field(&mut self, key: StatusKey, raw_value: &str) {
        (**self).set_field(key, raw_value);
    }
}

/// A single display update, as forwarded by a channel sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUpdate {
    /// The connection status changed.
    Connection(ConnectionStatus),
    /// A status field was received.
    Field {
        /// The field key.
        key: StatusKey,
        /// The value as received.
        raw_value: String,
    },
}

/// Forwards updates to a channel; updates are dropped once the receiver is gone.
impl DisplaySink for mpsc::UnboundedSender<DisplayUpdate> {
    fn set_connection_status(&mut self, status: ConnectionStatus) {
        let _ = self.send(DisplayUpdate::Connection(status));
    }

    fn set_field(&mut self, key: StatusKey, raw_value: &str) {
        let _ = self.send(DisplayUpdate::Field {
            key,
            raw_value: raw_value.to_string(),
        });
    }
}
