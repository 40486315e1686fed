// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection to the webhouse controller.
//!
//! The lifecycle logic lives in [`ConnectionManager`], which is independent
//! of any socket. [`Connection`] wires a manager to a WebSocket and a poll
//! timer on a background task.
//!
//! # State machine
//!
//! ```text
//! Connecting ──opened──▶ Open
//! Connecting | Open ──closed──▶ Closed
//! Connecting | Open ──failed──▶ Errored
//! ```
//!
//! Closed and Errored are terminal. There is no automatic reconnection.

mod config;
mod manager;
mod session;
mod state;
mod websocket;

pub use config::ControllerConfig;
pub use manager::{CommandSender, ConnectionManager, DEFAULT_POLL_INTERVAL, Transport};
pub use state::{ConnectionState, TransportEvent};
pub use websocket::{ChannelTransport, Connection};
