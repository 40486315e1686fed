// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport-independent connection manager.
//!
//! [`ConnectionManager`] reconciles transport events with the connection
//! state, forwards decoded status fields to a display sink, and gates every
//! outgoing command on the connection being open. It performs no I/O of its
//! own: frames leave through a [`Transport`] and events come in through the
//! `handle_*` methods, which makes the whole state machine testable without
//! a socket.

use std::time::Duration;

use tokio::sync::watch;

use super::ConnectionState;
use super::state::TransportEvent;
use crate::command::{StatusCommand, WireCommand};
use crate::display::DisplaySink;
use crate::error::{Error, ProtocolError, Result};
use crate::status::decode_status;

/// Default interval between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Outgoing half of a connection.
///
/// Writes must not block: `send` is called from inside event handling and
/// may be called reentrantly from a display sink.
pub trait Transport {
    /// Queues one encoded command frame for transmission.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the frame cannot be queued.
    fn write(&self, frame: &str) -> std::result::Result<(), ProtocolError>;
}

/// Owns the lifecycle of one transport instance.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use webhouse_client::connection::{ConnectionManager, ConnectionState, Transport};
/// use webhouse_client::command::Command;
/// use webhouse_client::display::SharedDisplay;
/// use webhouse_client::error::ProtocolError;
/// use webhouse_client::status::StatusKey;
///
/// #[derive(Clone, Default)]
/// struct Recorder(Arc<Mutex<Vec<String>>>);
///
/// impl Transport for Recorder {
///     fn write(&self, frame: &str) -> Result<(), ProtocolError> {
///         self.0.lock().unwrap().push(frame.to_string());
///         Ok(())
///     }
/// }
///
/// let transport = Recorder::default();
/// let display = SharedDisplay::new();
/// let mut manager = ConnectionManager::new(transport.clone(), display.clone());
///
/// // Sending before the transport is open is refused
/// assert!(manager.send(&Command::GetStatus).is_err());
///
/// manager.handle_open();
/// manager.send(&Command::GetStatus).unwrap();
/// manager.handle_message("Temp:21.0;AlarmArmed:0");
///
/// assert_eq!(transport.0.lock().unwrap().as_slice(), ["<GetStatus>"]);
/// assert_eq!(display.snapshot().temperature(), Some("21.0"));
/// assert_eq!(manager.state(), ConnectionState::Open);
/// ```
#[derive(Debug)]
pub struct ConnectionManager<T, S> {
    transport: T,
    sink: S,
    state: watch::Sender<ConnectionState>,
    poll_interval: Duration,
}

impl<T: Transport, S: DisplaySink> ConnectionManager<T, S> {
    /// Creates a manager in the Connecting state with the default poll interval.
    #[must_use]
    pub fn new(transport: T, sink: S) -> Self {
        Self::with_poll_interval(transport, sink, DEFAULT_POLL_INTERVAL)
    }

    /// Creates a manager in the Connecting state with a custom poll interval.
    #[must_use]
    pub fn with_poll_interval(transport: T, sink: S, poll_interval: Duration) -> Self {
        let (state, _) = watch::channel(ConnectionState::Connecting);
        Self {
            transport,
            sink,
            state,
            poll_interval,
        }
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Returns a receiver that observes state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Returns the interval at which [`poll`](Self::poll) should be driven.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns a cloneable handle that sends through this manager's transport.
    #[must_use]
    pub fn sender(&self) -> CommandSender<T>
    where
        T: Clone,
    {
        CommandSender {
            transport: self.transport.clone(),
            state: self.state.subscribe(),
        }
    }

    /// Handles the transport becoming ready.
    ///
    /// Returns true if the state changed.
    pub fn handle_open(&mut self) -> bool {
        self.apply(TransportEvent::Opened)
    }

    /// Handles a graceful close.
    ///
    /// Returns true if the state changed.
    pub fn handle_close(&mut self) -> bool {
        self.apply(TransportEvent::Closed)
    }

    /// Handles a transport failure.
    ///
    /// Returns true if the state changed.
    pub fn handle_error(&mut self, error: &ProtocolError) -> bool {
        let changed = self.apply(TransportEvent::Failed);
        if changed {
            tracing::warn!(error = %error, "Controller connection failed");
        } else {
            tracing::debug!(error = %error, state = %self.state(), "Ignoring transport error");
        }
        changed
    }

    /// Handles one received payload.
    ///
    /// Every recognized field is forwarded to the display sink in wire
    /// order. Returns the number of fields forwarded.
    pub fn handle_message(&mut self, raw: &str) -> usize {
        let state = self.state();
        if state.is_terminal() {
            tracing::debug!(state = %state, "Ignoring message on finished connection");
            return 0;
        }

        tracing::debug!(payload = %raw, "Received status frame");
        let frame = decode_status(raw);
        for field in &frame {
            self.sink.set_field(field.key(), field.raw_value());
        }
        frame.len()
    }

    /// Encodes and writes a command.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` without writing anything if the
    /// connection is not open, or `Error::Protocol` if the transport
    /// rejects the frame.
    pub fn send<C: WireCommand + ?Sized>(&self, command: &C) -> Result<()> {
        dispatch(&self.transport, self.state(), command)
    }

    /// Sends a status request if the connection is open.
    ///
    /// This is a no-op in every other state. Returns true if a request was
    /// written.
    pub fn poll(&self) -> bool {
        if !self.state().is_open() {
            return false;
        }
        match self.send(&StatusCommand) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Status poll failed");
                false
            }
        }
    }

    fn apply(&mut self, event: TransportEvent) -> bool {
        let current = self.state();
        let Some(next) = current.transition(event) else {
            return false;
        };

        self.state.send_replace(next);
        tracing::info!(from = %current, to = %next, "Connection state changed");

        if let Some(status) = next.notification() {
            self.sink.set_connection_status(status);
        }
        true
    }
}

/// Cloneable handle for sending commands on a connection.
///
/// The handle reads the connection state shared with its manager, so it
/// refuses to send once the connection has closed. It can be used from
/// other tasks and from inside a display sink.
#[derive(Debug, Clone)]
pub struct CommandSender<T> {
    transport: T,
    state: watch::Receiver<ConnectionState>,
}

impl<T: Transport> CommandSender<T> {
    /// Returns the current connection state.
    ///
    /// Reports Closed once the manager is gone, whatever it last published.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        observe(&self.state)
    }

    /// Encodes and writes a command.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` if the connection is not open.
    pub fn send<C: WireCommand + ?Sized>(&self, command: &C) -> Result<()> {
        dispatch(&self.transport, self.state(), command)
    }
}

/// Reads a published state, treating a dropped manager as a finished connection.
pub(crate) fn observe(state: &watch::Receiver<ConnectionState>) -> ConnectionState {
    let current = *state.borrow();
    if state.has_changed().is_err() && !current.is_terminal() {
        ConnectionState::Closed
    } else {
        current
    }
}

fn dispatch<T: Transport, C: WireCommand + ?Sized>(
    transport: &T,
    state: ConnectionState,
    command: &C,
) -> Result<()> {
    if !state.is_open() {
        tracing::warn!(state = %state, command = %command.name(), "Refusing to send while not connected");
        return Err(Error::NotConnected(state));
    }

    let frame = command.encode();
    transport.write(&frame)?;
    tracing::debug!(frame = %frame, "Sent command");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::command::Command;
    use crate::display::{ConnectionStatus, DisplayUpdate};
    use crate::status::StatusKey;
    use crate::types::{Appliance, LampId, SwitchState};

    #[derive(Debug, Clone, Default)]
    struct RecordingTransport {
        frames: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingTransport {
        fn frames(&self) -> Vec<String> {
            self.frames.lock().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn write(&self, frame: &str) -> std::result::Result<(), ProtocolError> {
            self.frames.lock().push(frame.to_string());
            Ok(())
        }
    }

    struct BrokenTransport;

    impl Transport for BrokenTransport {
        fn write(&self, _frame: &str) -> std::result::Result<(), ProtocolError> {
            Err(ProtocolError::ChannelClosed("outbound frames".to_string()))
        }
    }

    type Updates = tokio::sync::mpsc::UnboundedReceiver<DisplayUpdate>;

    fn manager() -> (
        ConnectionManager<RecordingTransport, tokio::sync::mpsc::UnboundedSender<DisplayUpdate>>,
        RecordingTransport,
        Updates,
    ) {
        let transport = RecordingTransport::default();
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (ConnectionManager::new(transport.clone(), tx), transport, rx)
    }

    fn drain(rx: &mut Updates) -> Vec<DisplayUpdate> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn field(key: StatusKey, value: &str) -> DisplayUpdate {
        DisplayUpdate::Field {
            key,
            raw_value: value.to_string(),
        }
    }

    #[test]
    fn starts_connecting_with_default_interval() {
        let (manager, _, _) = manager();
        assert_eq!(manager.state(), ConnectionState::Connecting);
        assert_eq!(manager.poll_interval(), Duration::from_millis(2000));
    }

    #[test]
    fn send_refused_in_every_state_but_open() {
        let (mut manager, transport, _) = manager();

        let err = manager.send(&Command::GetStatus).unwrap_err();
        assert!(matches!(err, Error::NotConnected(ConnectionState::Connecting)));

        manager.handle_open();
        manager.handle_close();
        let err = manager.send(&Command::GetStatus).unwrap_err();
        assert!(matches!(err, Error::NotConnected(ConnectionState::Closed)));

        assert!(transport.frames().is_empty());
    }

    #[test]
    fn send_refused_after_error() {
        let (mut manager, transport, _) = manager();
        manager.handle_error(&ProtocolError::ConnectionFailed("refused".to_string()));

        assert!(matches!(
            manager.send(&Command::set_target_temp(21.0)),
            Err(Error::NotConnected(ConnectionState::Errored))
        ));
        assert!(transport.frames().is_empty());
    }

    #[test]
    fn send_writes_encoded_frames_when_open() {
        let (mut manager, transport, _) = manager();
        manager.handle_open();

        manager.send(&Command::set_dimmer(LampId::first(), 75)).unwrap();
        manager.send(&Command::set_target_temp(22.5)).unwrap();
        manager
            .send(&Command::switch(Appliance::Alarm, SwitchState::On))
            .unwrap();

        assert_eq!(
            transport.frames(),
            ["<Dim1:75>", "<SetTemp:22.5>", "<AlarmOn>"]
        );
    }

    #[test]
    fn transport_failure_is_reported() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut manager = ConnectionManager::new(BrokenTransport, tx);
        manager.handle_open();

        assert!(matches!(
            manager.send(&Command::GetStatus),
            Err(Error::Protocol(ProtocolError::ChannelClosed(_)))
        ));
        assert!(!manager.poll());
        // A failed write does not change the state; the transport reports that.
        assert_eq!(manager.state(), ConnectionState::Open);
    }

    #[test]
    fn notifications_follow_transitions() {
        let (mut manager, _, mut rx) = manager();

        assert!(manager.handle_open());
        assert!(!manager.handle_open());
        assert!(manager.handle_error(&ProtocolError::ConnectionFailed("reset".to_string())));
        assert!(!manager.handle_close());

        assert_eq!(
            drain(&mut rx),
            [
                DisplayUpdate::Connection(ConnectionStatus::Connected),
                DisplayUpdate::Connection(ConnectionStatus::Error),
            ]
        );
        assert_eq!(manager.state(), ConnectionState::Errored);
    }

    #[test]
    fn failed_connect_goes_straight_to_errored() {
        let (mut manager, _, mut rx) = manager();
        manager.handle_error(&ProtocolError::Timeout(5000));
        assert_eq!(manager.state(), ConnectionState::Errored);
        assert_eq!(
            drain(&mut rx),
            [DisplayUpdate::Connection(ConnectionStatus::Error)]
        );
    }

    #[test]
    fn messages_forward_fields_in_wire_order() {
        let (mut manager, _, mut rx) = manager();
        manager.handle_open();
        drain(&mut rx);

        let forwarded = manager.handle_message("AlarmTriggered:1;Temp:22.5;Foo:1;AlarmArmed:1");
        assert_eq!(forwarded, 3);
        assert_eq!(
            drain(&mut rx),
            [
                field(StatusKey::AlarmTriggered, "1"),
                field(StatusKey::Temp, "22.5"),
                field(StatusKey::AlarmArmed, "1"),
            ]
        );
    }

    #[test]
    fn duplicate_keys_are_forwarded_left_to_right() {
        let (mut manager, _, mut rx) = manager();
        manager.handle_open();
        drain(&mut rx);

        manager.handle_message("Temp:20;Temp:21");
        assert_eq!(
            drain(&mut rx),
            [field(StatusKey::Temp, "20"), field(StatusKey::Temp, "21")]
        );
    }

    #[test]
    fn messages_ignored_after_close() {
        let (mut manager, _, mut rx) = manager();
        manager.handle_open();
        manager.handle_close();
        drain(&mut rx);

        assert_eq!(manager.handle_message("Temp:20"), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn poll_only_when_open() {
        let (mut manager, transport, _) = manager();
        assert!(!manager.poll());

        manager.handle_open();
        assert!(manager.poll());
        assert!(manager.poll());

        manager.handle_close();
        assert!(!manager.poll());

        assert_eq!(transport.frames(), ["<GetStatus>", "<GetStatus>"]);
    }

    #[test]
    fn sender_follows_manager_state() {
        let (mut manager, transport, _) = manager();
        let sender = manager.sender();
        assert!(sender.send(&Command::GetStatus).is_err());

        manager.handle_open();
        assert_eq!(sender.state(), ConnectionState::Open);
        sender.send(&Command::set_dimmer(LampId::second(), 5)).unwrap();

        manager.handle_close();
        assert!(matches!(
            sender.send(&Command::GetStatus),
            Err(Error::NotConnected(ConnectionState::Closed))
        ));
        assert_eq!(transport.frames(), ["<Dim2:5>"]);
    }

    #[test]
    fn sender_refuses_once_manager_is_dropped() {
        let (mut manager, transport, _rx) = manager();
        let sender = manager.sender();
        manager.handle_open();
        drop(manager);

        assert_eq!(sender.state(), ConnectionState::Closed);
        assert!(matches!(
            sender.send(&Command::GetStatus),
            Err(Error::NotConnected(ConnectionState::Closed))
        ));
        assert!(transport.frames().is_empty());
    }

    #[test]
    fn dropped_manager_keeps_terminal_state() {
        let (mut manager, _transport, _rx) = manager();
        let sender = manager.sender();
        manager.handle_error(&ProtocolError::Timeout(50));
        drop(manager);

        assert_eq!(sender.state(), ConnectionState::Errored);
    }

    #[test]
    fn state_changes_are_observable() {
        let (mut manager, _, _) = manager();
        let mut rx = manager.subscribe();
        assert!(!rx.has_changed().unwrap());

        manager.handle_open();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ConnectionState::Open);
    }

    /// A sink that sends a command while a status update is being handled.
    struct EchoSink {
        sender: Arc<Mutex<Option<CommandSender<RecordingTransport>>>>,
    }

    impl DisplaySink for EchoSink {
        fn set_connection_status(&mut self, _status: ConnectionStatus) {}

        fn set_field(&mut self, key: StatusKey, raw_value: &str) {
            if key == StatusKey::AlarmTriggered
                && raw_value == "1"
                && let Some(sender) = self.sender.lock().as_ref()
            {
                sender
                    .send(&Command::switch(Appliance::Alarm, SwitchState::Off))
                    .unwrap();
            }
        }
    }

    #[test]
    fn send_is_reentrant_from_sink() {
        let transport = RecordingTransport::default();
        let slot = Arc::new(Mutex::new(None));
        let sink = EchoSink {
            sender: Arc::clone(&slot),
        };
        let mut manager = ConnectionManager::new(transport.clone(), sink);
        *slot.lock() = Some(manager.sender());

        manager.handle_open();
        manager.handle_message("Temp:20;AlarmTriggered:1");

        assert_eq!(transport.frames(), ["<AlarmOff>"]);
    }
}
