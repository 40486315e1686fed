// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection lifecycle state machine.

use std::fmt;

use crate::display::ConnectionStatus;

/// Lifecycle state of one transport instance.
///
/// ```text
/// Connecting ──opened──▶ Open
///     │                   │
///     ├──closed / failed──┴──▶ Closed | Errored   (terminal)
/// ```
///
/// Transitions are driven only by transport events. Closed and Errored are
/// terminal: a new connection is needed to talk to the controller again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// The transport is being established.
    #[default]
    Connecting,
    /// The transport is ready; commands can be sent.
    Open,
    /// The transport was closed gracefully.
    Closed,
    /// The transport failed or dropped abnormally.
    Errored,
}

/// An event reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportEvent {
    /// The transport became ready.
    Opened,
    /// The transport closed gracefully.
    Closed,
    /// The transport failed.
    Failed,
}

impl ConnectionState {
    /// Returns true if commands can be sent.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true for Closed and Errored.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }

    /// Returns the state reached by applying `event`, or `None` if the event
    /// does not change the state.
    ///
    /// # Examples
    ///
    /// ```
    /// use webhouse_client::connection::{ConnectionState, TransportEvent};
    ///
    /// let state = ConnectionState::Connecting;
    /// assert_eq!(state.transition(TransportEvent::Opened), Some(ConnectionState::Open));
    ///
    /// // Terminal states ignore further events
    /// let closed = ConnectionState::Closed;
    /// assert_eq!(closed.transition(TransportEvent::Failed), None);
    /// ```
    #[must_use]
    pub const fn transition(self, event: TransportEvent) -> Option<Self> {
        match (self, event) {
            (Self::Connecting, TransportEvent::Opened) => Some(Self::Open),
            (Self::Connecting | Self::Open, TransportEvent::Closed) => Some(Self::Closed),
            (Self::Connecting | Self::Open, TransportEvent::Failed) => Some(Self::Errored),
            (Self::Open, TransportEvent::Opened) | (Self::Closed | Self::Errored, _) => None,
        }
    }

    /// Returns the status to show when entering this state.
    ///
    /// Connecting has no notification of its own.
    #[must_use]
    pub const fn notification(&self) -> Option<ConnectionStatus> {
        match self {
            Self::Connecting => None,
            Self::Open => Some(ConnectionStatus::Connected),
            Self::Closed => Some(ConnectionStatus::Disconnected),
            Self::Errored => Some(ConnectionStatus::Error),
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Errored => "errored",
        };
        f.write_str(label)
    }
}
