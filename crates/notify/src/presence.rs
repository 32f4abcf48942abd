// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process registry of users with live realtime connections.

use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

use tasklink_domain::UserId;

/// Tracks which users currently hold at least one realtime connection.
///
/// A user may be connected from several devices, so the directory counts
/// connections per user and only reports them offline when the count
/// reaches zero.
#[derive(Debug, Default)]
pub struct PresenceDirectory {
    connections: RwLock<HashMap<i64, usize>>,
}

impl PresenceDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection for a user.
    pub fn connect(&self, user: UserId) {
        let mut connections = self
            .connections
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let count = connections.entry(user.value()).or_insert(0);
        *count += 1;
        debug!(user_id = user.value(), connections = *count, "User connected");
    }

    /// Removes one connection for a user.
    pub fn disconnect(&self, user: UserId) {
        let mut connections = self
            .connections
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(count) = connections.get_mut(&user.value()) {
            *count -= 1;
            if *count == 0 {
                connections.remove(&user.value());
            }
        }
        debug!(user_id = user.value(), "User disconnected");
    }

    /// Returns true if the user holds at least one live connection.
    #[must_use]
    pub fn is_online(&self, user: UserId) -> bool {
        let connections = self
            .connections
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        connections.contains_key(&user.value())
    }

    /// Number of distinct users currently online.
    #[must_use]
    pub fn online_count(&self) -> usize {
        let connections = self
            .connections
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        connections.len()
    }
}
