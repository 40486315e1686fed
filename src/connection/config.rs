// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller connection configuration.

use std::net::Ipv6Addr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for connecting to a webhouse controller.
///
/// Host and port are fixed for the lifetime of a connection; there is no
/// discovery.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use webhouse_client::connection::ControllerConfig;
///
/// // Controller on the default port
/// let config = ControllerConfig::new("192.168.1.40");
/// assert_eq!(config.url(), "ws://192.168.1.40:8000");
///
/// // With all options
/// let config = ControllerConfig::new("raspberrypi.local")
///     .with_port(9000)
///     .with_poll_interval(Duration::from_secs(5))
///     .with_connect_timeout(Duration::from_secs(2));
/// assert_eq!(config.poll_interval(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    host: String,
    port: u16,
    #[serde(rename = "poll_interval_ms", with = "millis")]
    poll_interval: Duration,
    #[serde(rename = "connect_timeout_ms", with = "millis")]
    connect_timeout: Duration,
}

impl ControllerConfig {
    /// Default controller host.
    pub const DEFAULT_HOST: &'static str = "localhost";
    /// Default controller port.
    pub const DEFAULT_PORT: u16 = 8000;
    /// Default interval between status polls.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
    /// Default time allowed for the WebSocket handshake.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration for the controller at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields take their default values. Durations are given in
    /// milliseconds:
    ///
    /// ```json
    /// { "host": "192.168.1.40", "port": 8000, "poll_interval_ms": 2000 }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, is not valid JSON,
    /// or holds an invalid value.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the interval between status polls.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the time allowed for establishing the connection.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Builds the WebSocket URL for this configuration.
    ///
    /// IPv6 literals are bracketed.
    #[must_use]
    pub fn url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("ws://[{}]:{}", self.host, self.port)
        } else {
            format!("ws://{}:{}", self.host, self.port)
        }
    }

    /// Checks that the configuration can be used to connect.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty or malformed host,
    /// port 0, or a zero poll interval or connect timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(invalid("host", "must not be empty"));
        }
        if self.host.contains(['/', ' ']) {
            return Err(invalid("host", format!("{:?} is not a host name", self.host)));
        }
        if self.host.contains(':') {
            let literal = self
                .host
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .unwrap_or(&self.host);
            if literal.parse::<Ipv6Addr>().is_err() {
                return Err(invalid(
                    "host",
                    format!("{:?} is neither a host name nor an IPv6 address", self.host),
                ));
            }
        }
        if self.port == 0 {
            return Err(invalid("port", "must not be 0"));
        }
        if self.poll_interval.is_zero() {
            return Err(invalid("poll_interval_ms", "must be greater than 0"));
        }
        if self.connect_timeout.is_zero() {
            return Err(invalid("connect_timeout_ms", "must be greater than 0"));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST)
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        message: message.into(),
    }
}

/// Serializes a `Duration` as whole milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
