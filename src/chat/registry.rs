//! Chat connection registry
//!
//! Holds the live set of chat sockets and fans rendered fragments out to
//! them. Each entry is the sending half of a per-connection channel drained
//! by that connection's writer task. Dropping the entry closes the channel,
//! which ends the writer and closes the socket.

use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Outbound channel for one connection
pub type ChatSender = mpsc::UnboundedSender<String>;

/// Unique connection identifier, never reused
pub type ConnectionId = u64;

/// Registry view of a connection. An upgrade that fails never gets an id,
/// so only `Open` and the terminal `Closed` are observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Outcome of one broadcast
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Recipients a write was attempted on
    pub attempted: usize,
    /// Recipients whose channel accepted the fragment
    pub delivered: usize,
    /// Recipients removed because the write failed
    pub dropped: Vec<ConnectionId>,
}

/// Thread-safe registry of open chat connections.
///
/// Constructed once at server start and shared through `AppState`.
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ChatSender>,
    next_conn_id: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            next_conn_id: AtomicU64::new(1),
        }
    }

    /// Register a freshly upgraded connection and return its identity.
    pub fn register(&self, tx: ChatSender) -> ConnectionId {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(conn_id, tx);

        tracing::info!(
            conn_id,
            live_connections = self.connections.len(),
            "Chat connection registered"
        );

        conn_id
    }

    /// Remove a connection. Returns `false` if it was already gone.
    pub fn unregister(&self, conn_id: ConnectionId) -> bool {
        match self.connections.remove(&conn_id) {
            Some(_) => {
                tracing::info!(
                    conn_id,
                    live_connections = self.connections.len(),
                    "Chat connection unregistered"
                );
                true
            }
            None => false,
        }
    }

    /// Write `payload` to every live connection except `exclude`.
    ///
    /// A closed channel means the writer ended on a socket error: that
    /// recipient is unregistered and delivery continues with the rest.
    /// Failed entries are removed after iteration so no shard lock is held
    /// twice.
    pub fn broadcast(&self, payload: &str, exclude: Option<ConnectionId>) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for entry in self.connections.iter() {
            let conn_id = *entry.key();
            if Some(conn_id) == exclude {
                continue;
            }
            report.attempted += 1;

            if entry.value().send(payload.to_owned()).is_ok() {
                report.delivered += 1;
            } else {
                tracing::warn!(conn_id, "Chat recipient closed, dropping connection");
                report.dropped.push(conn_id);
            }
        }

        for conn_id in &report.dropped {
            self.unregister(*conn_id);
        }

        tracing::debug!(
            attempted = report.attempted,
            delivered = report.delivered,
            dropped = report.dropped.len(),
            "Chat broadcast complete"
        );

        report
    }

    /// State of a connection as seen by the registry. `None` if the id was
    /// never issued.
    pub fn state(&self, conn_id: ConnectionId) -> Option<ConnectionState> {
        if self.connections.contains_key(&conn_id) {
            Some(ConnectionState::Open)
        } else if conn_id != 0 && conn_id < self.next_conn_id.load(Ordering::Relaxed) {
            Some(ConnectionState::Closed)
        } else {
            None
        }
    }

    pub fn contains(&self, conn_id: ConnectionId) -> bool {
        self.connections.contains_key(&conn_id)
    }

    /// Number of live connections
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
