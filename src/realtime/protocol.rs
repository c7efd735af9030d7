use crate::telemetry::EmissionsSample;
use serde::{Deserialize, Serialize};

/// Client → Server events
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Liveness signal, refreshes the connection's last-active time
    Ping,
}

/// Server → Client events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Latest simulated reading
    EmissionsUpdate(EmissionsSample),
    /// Acknowledges a `ping`
    Pong,
}

impl ServerEvent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
