// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the webhouse client.
//!
//! The hierarchy separates value validation, transport failures and
//! configuration problems. Decoding status frames never fails, so there is
//! no parse error for incoming data: malformed segments are simply dropped.

use thiserror::Error;

use crate::connection::ConnectionState;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred on the transport.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The controller configuration is unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A command was sent while the connection was not open.
    ///
    /// Carries the state the connection was in at the time of the attempt.
    #[error("not connected to the controller (connection is {0})")]
    NotConnected(ConnectionState),
}

impl Error {
    /// Returns true if this error was caused by sending while disconnected.
    #[must_use]
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Self::NotConnected(_))
    }
}

/// Errors related to value validation and user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A lamp identifier would break the `<Name:Arg>` token framing.
    #[error("invalid lamp identifier: {0:?}")]
    InvalidLampId(String),

    /// An appliance name was not recognized.
    #[error("unknown appliance: {0}")]
    UnknownAppliance(String),

    /// An invalid switch state string was provided.
    #[error("invalid switch state: {0}")]
    InvalidSwitchState(String),
}

/// Errors related to the WebSocket transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The WebSocket layer reported a failure.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Connection to the controller failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connecting timed out.
    #[error("connection timed out after {0} ms")]
    Timeout(u64),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for this schema.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration field holds an unusable value.
    #[error("invalid {field}: {message}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
