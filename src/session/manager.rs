use crate::realtime::ServerEvent;
use crate::session::registry::{ClientRegistry, ConnectionId, ConnectionRecord, Outbox};
use crate::telemetry::SampleSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one fan-out pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Connections the event was queued for
    pub delivered: usize,
    /// Connections whose queue was full; they miss this event only
    pub lagged: usize,
    /// Connections whose transport had gone away; now disconnected
    pub failed: Vec<ConnectionId>,
}

/// Owns the client registry: accept, liveness, disconnect and eviction.
pub struct SessionManager {
    registry: ClientRegistry,
    source: Arc<dyn SampleSource>,
    /// Set by `close_all`; no connection is accepted afterwards
    closing: AtomicBool,
}

impl SessionManager {
    pub fn new(source: Arc<dyn SampleSource>) -> Self {
        Self {
            registry: ClientRegistry::new(),
            source,
            closing: AtomicBool::new(false),
        }
    }

    /// Register a connection and send it one reading straight away, so a new
    /// client has state before the next broadcast tick.
    ///
    /// Returns false once shutdown has begun; the outbox is dropped unregistered.
    pub fn accept(&self, id: ConnectionId, outbox: Outbox) -> bool {
        if self.closing.load(Ordering::SeqCst) {
            debug!(connection_id = %id, "Rejecting connection during shutdown");
            return false;
        }

        let initial = ServerEvent::EmissionsUpdate(self.source.next_sample());
        if let Err(e) = outbox.try_send(initial) {
            warn!(connection_id = %id, error = %e, "Failed to queue initial reading");
        }

        self.registry.insert(
            id,
            ConnectionRecord {
                last_active: Instant::now(),
                outbox,
            },
        );

        // close_all may have cleared the registry between the check and the insert
        if self.closing.load(Ordering::SeqCst) {
            self.registry.remove(&id);
            debug!(connection_id = %id, "Rejecting connection during shutdown");
            return false;
        }

        info!(connection_id = %id, clients = self.registry.len(), "Client connected");
        true
    }

    /// Record a liveness signal and acknowledge it with `pong`.
    ///
    /// Returns false (and does nothing) when `id` is not tracked, e.g. after
    /// eviction or disconnect.
    pub fn touch(&self, id: &ConnectionId) -> bool {
        let Some(outbox) = self.registry.refresh(id, Instant::now()) else {
            debug!(connection_id = %id, "Ignoring ping from untracked connection");
            return false;
        };

        if let Err(e) = outbox.try_send(ServerEvent::Pong) {
            warn!(connection_id = %id, error = %e, "Failed to queue pong");
        }
        true
    }

    /// Record liveness without an application-level acknowledgement
    /// (WebSocket ping frames are answered by the transport).
    pub fn refresh(&self, id: &ConnectionId) -> bool {
        self.registry.refresh(id, Instant::now()).is_some()
    }

    /// Stop tracking a connection. Terminal: a reconnect gets a fresh id.
    pub fn disconnect(&self, id: &ConnectionId, reason: &str) -> bool {
        let removed = self.registry.remove(id).is_some();
        if removed {
            info!(
                connection_id = %id,
                reason = %reason,
                clients = self.registry.len(),
                "Client disconnected"
            );
        } else {
            debug!(connection_id = %id, reason = %reason, "Disconnect for untracked connection");
        }
        removed
    }

    pub fn members(&self) -> Vec<ConnectionId> {
        self.registry.ids()
    }

    pub fn is_member(&self, id: &ConnectionId) -> bool {
        self.registry.contains(id)
    }

    pub fn last_active(&self, id: &ConnectionId) -> Option<Instant> {
        self.registry.last_active(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Queue `event` for every tracked connection.
    ///
    /// Best effort: a full queue skips that connection for this event, a closed
    /// queue disconnects it. Neither affects delivery to the others.
    pub fn fan_out(&self, event: &ServerEvent) -> FanOutReport {
        let mut report = FanOutReport::default();

        for (id, outbox) in self.registry.outboxes() {
            match outbox.try_send(event.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(connection_id = %id, "Outbound queue full, dropping update");
                    report.lagged += 1;
                }
                Err(TrySendError::Closed(_)) => report.failed.push(id),
            }
        }

        // Removal happens after the pass so the enumeration above is never
        // interleaved with our own writes.
        for id in &report.failed {
            self.disconnect(id, "transport closed during delivery");
        }

        report
    }

    /// Drop every connection idle for longer than `threshold`.
    ///
    /// Dropping a record drops its outbox, which tells the connection task to
    /// close the socket.
    pub fn evict_stale(&self, threshold: Duration) -> Vec<ConnectionId> {
        let evicted = self.registry.remove_stale(Instant::now(), threshold);
        for id in &evicted {
            info!(connection_id = %id, "Removed inactive client");
        }
        evicted
    }

    /// Forget every connection and refuse new ones; used on shutdown.
    pub fn close_all(&self) -> usize {
        self.closing.store(true, Ordering::SeqCst);
        let closed = self.registry.clear();
        info!(closed = closed, "Closed all client connections");
        closed
    }
}
