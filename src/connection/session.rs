// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event loop for an open connection.

use std::future::Future;

use futures_util::{Stream, StreamExt};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::{self, Message};

use super::manager::{ConnectionManager, Transport};
use crate::display::DisplaySink;
use crate::error::ProtocolError;

/// Runs an open connection until it reaches a terminal state.
///
/// Incoming frames, poll ticks and the shutdown signal are handled one at a
/// time, so the manager is never accessed concurrently. The first poll fires
/// one interval after this is called; missed ticks are delayed, not
/// replayed in a burst. The poll timer is dropped when this returns.
pub(crate) async fn drive<T, S, St, F>(
    manager: &mut ConnectionManager<T, S>,
    mut incoming: St,
    shutdown: F,
) where
    T: Transport,
    S: DisplaySink,
    St: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    F: Future<Output = ()>,
{
    let period = manager.poll_interval();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    while manager.state().is_open() {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::debug!("Closing connection on request");
                manager.handle_close();
            }
            message = incoming.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    manager.handle_message(text.as_str());
                }
                Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(text) => {
                        manager.handle_message(text);
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, len = bytes.len(), "Dropping non-UTF-8 frame");
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "Controller closed the connection");
                    manager.handle_close();
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    manager.handle_error(&ProtocolError::WebSocket(e));
                }
                None => {
                    manager.handle_close();
                }
            },
            _ = ticker.tick() => {
                manager.poll();
            }
        }
    }
}
