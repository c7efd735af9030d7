use crate::realtime::ServerEvent;
use crate::session::{FanOutReport, SessionManager};
use crate::telemetry::SampleSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// One broadcast tick.
///
/// With no tracked connections nothing is generated and `None` is returned.
/// Otherwise a single reading goes to every member, so all clients see the
/// same values for a tick.
pub fn broadcast_tick(sessions: &SessionManager, source: &dyn SampleSource) -> Option<FanOutReport> {
    if sessions.is_empty() {
        return None;
    }

    let sample = source.next_sample();
    Some(sessions.fan_out(&ServerEvent::EmissionsUpdate(sample)))
}

/// Periodically generate a reading and fan it out to all connections.
///
/// First tick fires one `period` after start. Missed ticks are skipped, there
/// is no backfill.
pub async fn run_broadcast_scheduler(
    sessions: Arc<SessionManager>,
    source: Arc<dyn SampleSource>,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        if let Some(report) = broadcast_tick(&sessions, source.as_ref()) {
            if !report.failed.is_empty() || report.lagged > 0 {
                warn!(
                    delivered = report.delivered,
                    lagged = report.lagged,
                    failed = report.failed.len(),
                    "Emissions broadcast partially delivered"
                );
            } else {
                debug!(delivered = report.delivered, "Emissions broadcast");
            }
        }
    }
}
