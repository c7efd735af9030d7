use crate::realtime::ServerEvent;
use dashmap::DashMap;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use uuid::Uuid;

/// Outbound queue for a single connection
pub type Outbox = mpsc::Sender<ServerEvent>;

/// Opaque per-connection token, unique for the lifetime of the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tracked state for one live connection
#[derive(Debug, Clone)]
pub struct ConnectionRecord {
    /// Monotonic time of accept or of the most recent liveness signal
    pub last_active: Instant,
    pub outbox: Outbox,
}

/// In-memory map of live connections.
///
/// Backed by a sharded `DashMap`, so reads from the broadcast timer never see a
/// half-applied removal from the sweeper. Callers must not hold a reference
/// from one call while making another; every method returns owned data.
#[derive(Default)]
pub struct ClientRegistry {
    records: DashMap<ConnectionId, ConnectionRecord>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn insert(&self, id: ConnectionId, record: ConnectionRecord) {
        self.records.insert(id, record);
    }

    /// Set `last_active = now` for a tracked id and return its outbox.
    /// Untracked ids are left untracked.
    pub fn refresh(&self, id: &ConnectionId, now: Instant) -> Option<Outbox> {
        self.records.get_mut(id).map(|mut record| {
            record.last_active = now;
            record.outbox.clone()
        })
    }

    pub fn remove(&self, id: &ConnectionId) -> Option<ConnectionRecord> {
        self.records.remove(id).map(|(_, record)| record)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.records.contains_key(id)
    }

    pub fn last_active(&self, id: &ConnectionId) -> Option<Instant> {
        self.records.get(id).map(|record| record.last_active)
    }

    pub fn ids(&self) -> Vec<ConnectionId> {
        self.records.iter().map(|entry| *entry.key()).collect()
    }

    /// Owned copy of every outbox, taken so delivery happens outside shard locks
    pub fn outboxes(&self) -> Vec<(ConnectionId, Outbox)> {
        self.records
            .iter()
            .map(|entry| (*entry.key(), entry.value().outbox.clone()))
            .collect()
    }

    /// Remove every record idle for strictly longer than `threshold`.
    pub fn remove_stale(&self, now: Instant, threshold: Duration) -> Vec<ConnectionId> {
        let mut removed = Vec::new();
        self.records.retain(|id, record| {
            let keep = now.duration_since(record.last_active) <= threshold;
            if !keep {
                removed.push(*id);
            }
            keep
        });
        removed
    }

    pub fn clear(&self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
