// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Realtime notification streaming over WebSocket.
//!
//! A connected client receives its own notifications as they are
//! dispatched. The connection also registers the user in the presence
//! directory, which is what routes notifications to this stream instead
//! of push delivery.
//!
//! # Architecture
//!
//! - Each connection subscribes to the shared notification broadcast and
//!   filters for its own user
//! - Presence is registered on connect and cleared on disconnect, so a
//!   dropped socket falls back to push delivery
//! - No commands are executed over WebSocket connections

use axum::{
    extract::{
        Query, State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use tasklink_domain::UserId;
use tasklink_notify::Notification;

use crate::AppState;

/// Query parameters for the live stream endpoint.
#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    /// The user the stream belongs to.
    pub user_id: i64,
}

/// Events delivered over a live connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
    /// A notification addressed to the connected user.
    Notification {
        /// Human-readable message text.
        message: String,
    },
}

/// Handles WebSocket upgrade requests for the notification stream.
pub async fn live_stream_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<LiveQuery>,
    AxumState(state): AxumState<AppState>,
) -> Response {
    let user: UserId = UserId::new(params.user_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, user))
}

/// Handles an individual WebSocket connection.
///
/// Registers presence, sends a connection confirmation, then streams the
/// user's notifications until the client disconnects or an error occurs.
/// Presence is cleared on every exit path.
async fn handle_socket(socket: WebSocket, state: AppState, user: UserId) {
    info!(user_id = user.value(), "Client connected to live stream");
    state.presence.connect(user);

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<Notification> = state.broadcaster.subscribe();

    // Send connection confirmation
    let connected_event = StreamEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        state.presence.disconnect(user);
        return;
    }

    // Task for sending the user's notifications to the client
    let mut send_task = tokio::spawn(async move {
        while let Ok(notification) = rx.recv().await {
            if notification.recipient != user {
                continue;
            }
            let event = StreamEvent::Notification {
                message: notification.message,
            };
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize stream event");
                }
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    // We don't process commands over WebSocket
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    state.presence.disconnect(user);
    info!(user_id = user.value(), "Client disconnected from live stream");
}
