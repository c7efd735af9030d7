use crate::session::{ConnectionId, SessionManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// One sweep: evict every connection silent for longer than `stale_after`.
pub fn sweep(sessions: &SessionManager, stale_after: Duration) -> Vec<ConnectionId> {
    sessions.evict_stale(stale_after)
}

/// Background task that periodically reclaims abandoned connections
/// (e.g. a network partition without a clean close).
pub async fn run_eviction_sweeper(
    sessions: Arc<SessionManager>,
    period: Duration,
    stale_after: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let evicted = sweep(&sessions, stale_after);
        debug!(
            evicted = evicted.len(),
            remaining = sessions.len(),
            "Eviction sweep complete"
        );
    }
}
