// Synthetic emissions readings
pub mod telemetry;

// Connection registry, liveness and eviction
pub mod session;

// Broadcast and sweep timers
pub mod scheduler;

// WebSocket protocol and per-connection task
pub mod realtime;

// Static dashboard data and data-entry helpers
pub mod dashboard;

// HTTP and WebSocket APIs
pub mod api;

// Configuration
pub mod config;

#[cfg(test)]
mod testing;
