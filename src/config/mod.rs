use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "GREENPULSE_CONFIG";

/// Config file used when `GREENPULSE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "greenpulse.toml";

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Browser origins allowed for CORS and the WebSocket upgrade
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    3001
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Timer and liveness settings for the real-time channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// How often a reading is fanned out to connected clients (seconds)
    #[serde(default = "default_broadcast_interval")]
    pub broadcast_interval_seconds: u64,
    /// How often idle connections are swept (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Silence after which a connection is evicted (seconds).
    /// Roughly 2.3x the client ping interval, so one missed ping is tolerated.
    #[serde(default = "default_stale_after")]
    pub stale_after_seconds: u64,
    /// Per-connection outbound queue depth
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,
}

fn default_broadcast_interval() -> u64 {
    3
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_stale_after() -> u64 {
    70
}

fn default_outbox_capacity() -> usize {
    32
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            broadcast_interval_seconds: default_broadcast_interval(),
            sweep_interval_seconds: default_sweep_interval(),
            stale_after_seconds: default_stale_after(),
            outbox_capacity: default_outbox_capacity(),
        }
    }
}

impl RealtimeConfig {
    /// Timer periods are at least one second; tokio intervals reject zero.
    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_secs(self.broadcast_interval_seconds.max(1))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_seconds)
    }
}

impl DashboardConfig {
    /// Apply overrides from the process environment (`PORT`).
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", port))?;
        }
        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<DashboardConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: DashboardConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Load configuration from `path`, or defaults if the file does not exist
pub fn load_or_default(path: impl AsRef<Path>) -> Result<DashboardConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        Ok(DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.realtime.broadcast_interval_seconds, 3);
        assert_eq!(config.realtime.sweep_interval_seconds, 30);
        assert_eq!(config.realtime.stale_after_seconds, 70);
        assert_eq!(config.realtime.stale_after(), Duration::from_secs(70));
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
            [server]
            port = 8080
            allowed_origins = ["https://dash.example.com", "http://localhost:5173"]

            [realtime]
            broadcast_interval_seconds = 1
            sweep_interval_seconds = 10
            stale_after_seconds = 25
            outbox_capacity = 8
        "#;

        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.allowed_origins.len(), 2);
        assert_eq!(config.realtime.broadcast_interval(), Duration::from_secs(1));
        assert_eq!(config.realtime.sweep_interval(), Duration::from_secs(10));
        assert_eq!(config.realtime.stale_after_seconds, 25);
        assert_eq!(config.realtime.outbox_capacity, 8);
    }

    #[test]
    fn test_partial_config() {
        // Missing sections and fields use defaults
        let toml = r#"
            [realtime]
            stale_after_seconds = 90
        "#;

        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.realtime.stale_after_seconds, 90);
        assert_eq!(config.realtime.broadcast_interval_seconds, 3); // Default
        assert_eq!(config.server.port, 3001); // Default
    }

    #[test]
    fn test_port_override() {
        let mut config = DashboardConfig::default();
        config
            .apply_overrides_from(|key| (key == "PORT").then(|| "4100".to_string()))
            .unwrap();
        assert_eq!(config.server.port, 4100);
    }

    #[test]
    fn test_no_override_keeps_port() {
        let mut config = DashboardConfig::default();
        config.apply_overrides_from(|_| None).unwrap();
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_invalid_port_override_is_error() {
        let mut config = DashboardConfig::default();
        let result = config.apply_overrides_from(|_| Some("not-a-port".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.realtime.sweep_interval_seconds, 30);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(load_config(file.path()).is_err());
    }
}
