use anyhow::{Context, Result};
use greenpulse::api::{create_app, WsAppState};
use greenpulse::config::{load_or_default, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use greenpulse::scheduler::SchedulerHandle;
use greenpulse::session::SessionManager;
use greenpulse::telemetry::{RandomSampleSource, SampleSource};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenpulse=info".into()),
        )
        .init();

    info!("Greenpulse starting...");

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_or_default(&config_path)?;
    config.apply_env_overrides()?;

    info!(
        config_path = %config_path,
        port = config.server.port,
        allowed_origins = ?config.server.allowed_origins,
        "Configuration loaded"
    );

    // Registry starts empty on every start
    let source: Arc<dyn SampleSource> = Arc::new(RandomSampleSource);
    let sessions = Arc::new(SessionManager::new(Arc::clone(&source)));

    let timers = SchedulerHandle::start(Arc::clone(&sessions), source, &config.realtime);

    let ws_state = Arc::new(WsAppState {
        sessions: Arc::clone(&sessions),
        allowed_origins: config.server.allowed_origins.clone(),
        realtime: config.realtime.clone(),
    });
    let app = create_app(ws_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.server.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.server.port))?;
    info!(port = config.server.port, "WebSocket server running");

    let shutdown_sessions = Arc::clone(&sessions);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!(error = %e, "Failed to listen for ctrl_c signal, shutting down"),
            }

            // Stop generation first, then release every connection
            timers.shutdown().await;
            shutdown_sessions.close_all();
        })
        .await
        .context("HTTP server error")?;

    info!("Greenpulse stopped");
    Ok(())
}
