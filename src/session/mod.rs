// Connection tracking: registry, liveness and eviction

mod manager;
mod registry;

pub use manager::{FanOutReport, SessionManager};
pub use registry::{ClientRegistry, ConnectionId, ConnectionRecord, Outbox};
