// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Realtime notification fan-out.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use tasklink_domain::UserId;

/// Maximum number of notifications to buffer in the broadcast channel.
/// If clients cannot keep up, older notifications will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The user the notification is for.
    pub recipient: UserId,
    /// Human-readable message text.
    pub message: String,
}

/// Broadcaster for realtime notifications.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that
/// allows multiple realtime connections to receive notifications. Each
/// connection filters for its own user.
#[derive(Clone)]
pub struct NotificationBroadcaster {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBroadcaster {
    /// Creates a new notification broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Publishes a notification to all connected clients.
    ///
    /// If no clients are connected, the notification is silently dropped.
    /// This is non-blocking and never waits for receivers.
    pub fn publish(&self, notification: &Notification) {
        match self.tx.send(notification.clone()) {
            Ok(count) => {
                debug!(
                    recipient = notification.recipient.value(),
                    receivers = count,
                    "Published notification"
                );
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(
                    recipient = notification.recipient.value(),
                    "No receivers for notification"
                );
            }
        }
    }

    /// Subscribes to the notification stream.
    ///
    /// Returns a receiver that will receive all future notifications.
    /// Notifications sent before subscription are not received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
