// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WebSocket connection to the controller.

use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::config::ControllerConfig;
use super::manager::{CommandSender, ConnectionManager, Transport, observe};
use super::session;
use super::ConnectionState;
use crate::command::WireCommand;
use crate::display::DisplaySink;
use crate::error::{ProtocolError, Result};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// How long a graceful close waits for the close frame to be flushed.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Transport that queues frames for the connection's writer task.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Message>,
}

impl Transport for ChannelTransport {
    fn write(&self, frame: &str) -> std::result::Result<(), ProtocolError> {
        self.tx
            .send(Message::text(frame))
            .map_err(|_| ProtocolError::ChannelClosed("outbound frames".to_string()))
    }
}

/// A live connection to a webhouse controller.
///
/// Opening returns immediately in the Connecting state; the handshake,
/// polling and message handling run on a background task that owns the
/// [`ConnectionManager`]. The connection never retries on its own: once it
/// is Closed or Errored, open a new one to reconnect.
///
/// Dropping the connection aborts its task, which also stops the poll timer.
///
/// # Examples
///
/// ```no_run
/// use webhouse_client::command::Command;
/// use webhouse_client::connection::{Connection, ControllerConfig};
/// use webhouse_client::display::SharedDisplay;
/// use webhouse_client::types::LampId;
///
/// # async fn example() -> webhouse_client::Result<()> {
/// let display = SharedDisplay::new();
/// let connection = Connection::open(&ControllerConfig::new("192.168.1.40"), display.clone())?;
///
/// if connection.wait_until_settled().await.is_open() {
///     connection.send(&Command::set_dimmer(LampId::first(), 75))?;
/// }
///
/// println!("temperature: {:?}", display.snapshot().temperature());
/// connection.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Connection {
    sender: CommandSender<ChannelTransport>,
    state: watch::Receiver<ConnectionState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Connection {
    /// Starts connecting to the controller.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn open<S: DisplaySink>(config: &ControllerConfig, sink: S) -> Result<Self> {
        config.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let frames = tx.clone();
        let transport = ChannelTransport { tx };
        let manager = ConnectionManager::with_poll_interval(transport, sink, config.poll_interval());
        let sender = manager.sender();
        let state = manager.subscribe();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let url = config.url();
        let connect_timeout = config.connect_timeout();
        let task = tokio::spawn(async move {
            run(manager, frames, rx, url, connect_timeout, shutdown_rx).await;
        });

        Ok(Self {
            sender,
            state,
            shutdown: Some(shutdown_tx),
            task,
        })
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        observe(&self.state)
    }

    /// Returns a receiver that observes state changes.
    #[must_use]
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Returns a cloneable handle for sending commands from other tasks.
    #[must_use]
    pub fn sender(&self) -> CommandSender<ChannelTransport> {
        self.sender.clone()
    }

    /// Encodes and sends a command without waiting for a reply.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` if the connection is not open.
    pub fn send<C: WireCommand + ?Sized>(&self, command: &C) -> Result<()> {
        self.sender.send(command)
    }

    /// Waits until the connection has left the Connecting state.
    ///
    /// Returns the state it settled in.
    pub async fn wait_until_settled(&self) -> ConnectionState {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|s| *s != ConnectionState::Connecting)
            .await
            .map(|s| *s);
        settled.unwrap_or_else(|_| observe(&state))
    }

    /// Waits until the connection has reached a terminal state.
    pub async fn closed(&self) -> ConnectionState {
        let mut state = self.state.clone();
        let finished = state.wait_for(|s| s.is_terminal()).await.map(|s| *s);
        finished.unwrap_or_else(|_| observe(&state))
    }

    /// Closes the connection and waits for its task to finish.
    ///
    /// Sends a close frame if the connection is open. The display sink
    /// receives `Disconnected` unless the connection had already ended.
    pub async fn close(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::debug!(error = %e, "Connection task ended abnormally");
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T, S>(
    mut manager: ConnectionManager<T, S>,
    frames: mpsc::UnboundedSender<Message>,
    outbound: mpsc::UnboundedReceiver<Message>,
    url: String,
    connect_timeout: Duration,
    shutdown: oneshot::Receiver<()>,
) where
    T: Transport,
    S: DisplaySink,
{
    let shutdown = async move {
        let _ = shutdown.await;
    };
    let mut shutdown = std::pin::pin!(shutdown);

    tracing::info!(url = %url, "Connecting to controller");
    let connect = time::timeout(connect_timeout, connect_async(url.as_str()));

    let ws = tokio::select! {
        result = connect => match result {
            Ok(Ok((ws, _response))) => ws,
            Ok(Err(e)) => {
                manager.handle_error(&ProtocolError::WebSocket(e));
                return;
            }
            Err(_) => {
                let ms = u64::try_from(connect_timeout.as_millis()).unwrap_or(u64::MAX);
                manager.handle_error(&ProtocolError::Timeout(ms));
                return;
            }
        },
        () = &mut shutdown => {
            manager.handle_close();
            return;
        }
    };

    let (ws_tx, ws_rx) = ws.split();
    let writer = tokio::spawn(write_frames(ws_tx, outbound));
    let _writer_guard = AbortOnDrop(writer.abort_handle());

    manager.handle_open();
    session::drive(&mut manager, ws_rx, shutdown).await;

    if manager.state() == ConnectionState::Closed
        && frames.send(Message::Close(None)).is_ok()
        && time::timeout(CLOSE_TIMEOUT, writer).await.is_err()
    {
        tracing::debug!("Close handshake timed out");
    }
    tracing::info!(url = %url, state = %manager.state(), "Controller connection finished");
}

/// Aborts the writer task when the session ends, including when the
/// session task itself is aborted.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn write_frames(mut ws_tx: WsSink, mut outbound: mpsc::UnboundedReceiver<Message>) {
    while let Some(message) = outbound.recv().await {
        let closing = message.is_close();
        if let Err(e) = ws_tx.send(message).await {
            tracing::debug!(error = %e, "WebSocket write failed");
            break;
        }
        if closing {
            if let Err(e) = ws_tx.close().await {
                tracing::debug!(error = %e, "WebSocket close failed");
            }
            break;
        }
    }
}
