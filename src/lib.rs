// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Webhouse Client - A Rust client for the webhouse home-automation controller.
//!
//! The controller is an embedded board that drives lamps, heating, a TV
//! socket and an alarm, and talks to its dashboard over a single WebSocket.
//! This crate is the dashboard side of that link.
//!
//! # Supported Features
//!
//! - **Commands**: Dimmer levels, target temperature, appliance switches
//! - **Status decoding**: Temperature and alarm state from status frames
//! - **Connection management**: Lifecycle tracking, send gating, periodic polling
//! - **Display sinks**: Shared state, event channels, text and color rendering
//!
//! # Quick Start
//!
//! ```no_run
//! use webhouse_client::{
//!     Appliance, Command, Connection, ControllerConfig, LampId, SharedDisplay, SwitchState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> webhouse_client::Result<()> {
//!     let config = ControllerConfig::new("192.168.1.40");
//!     let display = SharedDisplay::new();
//!
//!     let connection = Connection::open(&config, display.clone())?;
//!     if !connection.wait_until_settled().await.is_open() {
//!         eprintln!("controller unreachable");
//!         return Ok(());
//!     }
//!
//!     connection.send(&Command::set_dimmer(LampId::first(), 75))?;
//!     connection.send(&Command::switch(Appliance::Heating, SwitchState::On))?;
//!
//!     // Status frames arrive as replies and on every poll.
//!     tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//!     println!("{:?}", display.snapshot().temperature());
//!
//!     connection.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Without a socket
//!
//! [`ConnectionManager`] contains the whole state machine and can be driven
//! by hand with any [`Transport`], which is how the connection layer is
//! tested.

pub mod command;
pub mod connection;
pub mod display;
pub mod error;
pub mod status;
pub mod types;

pub use command::{
    Command, DimmerCommand, StatusCommand, SwitchCommand, TargetTempCommand, WireCommand,
    encode_command,
};
pub use connection::{
    CommandSender, Connection, ConnectionManager, ConnectionState, ControllerConfig, Transport,
};
pub use display::{ConnectionStatus, DisplaySink, DisplayState, DisplayUpdate, SharedDisplay};
pub use error::{ConfigError, Error, ProtocolError, Result, ValueError};
pub use status::{StatusField, StatusFrame, StatusKey, decode_status};
pub use types::{Appliance, LampId, SwitchState};
