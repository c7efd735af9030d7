// Periodic timers: emissions broadcast and idle-connection sweep

pub mod broadcast;
pub mod sweeper;

pub use broadcast::{broadcast_tick, run_broadcast_scheduler};
pub use sweeper::{run_eviction_sweeper, sweep};

use crate::config::RealtimeConfig;
use crate::session::SessionManager;
use crate::telemetry::SampleSource;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Handle over both timer tasks. Dropping it does not stop them; call
/// [`SchedulerHandle::shutdown`].
pub struct SchedulerHandle {
    broadcast: JoinHandle<()>,
    sweeper: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Spawn the broadcast scheduler and eviction sweeper.
    pub fn start(
        sessions: Arc<SessionManager>,
        source: Arc<dyn SampleSource>,
        config: &RealtimeConfig,
    ) -> Self {
        let broadcast = tokio::spawn(run_broadcast_scheduler(
            Arc::clone(&sessions),
            source,
            config.broadcast_interval(),
        ));
        let sweeper = tokio::spawn(run_eviction_sweeper(
            sessions,
            config.sweep_interval(),
            config.stale_after(),
        ));

        info!(
            broadcast_interval_seconds = config.broadcast_interval_seconds,
            sweep_interval_seconds = config.sweep_interval_seconds,
            stale_after_seconds = config.stale_after_seconds,
            "Realtime timers started"
        );

        Self { broadcast, sweeper }
    }

    pub fn is_running(&self) -> bool {
        !self.broadcast.is_finished() || !self.sweeper.is_finished()
    }

    /// Cancel both timers and wait until they have stopped.
    ///
    /// Ticks never await, so cancellation always lands between ticks.
    pub async fn shutdown(self) {
        self.broadcast.abort();
        self.sweeper.abort();
        let _ = self.broadcast.await;
        let _ = self.sweeper.await;
        info!("Realtime timers stopped");
    }
}
