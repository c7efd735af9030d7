use crate::config::RealtimeConfig;
use crate::realtime::handle_connection;
use crate::session::SessionManager;
use axum::{
    extract::{ws::WebSocketUpgrade, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state for the real-time channel
#[derive(Clone)]
pub struct WsAppState {
    pub sessions: Arc<SessionManager>,
    /// Browser origins allowed to open the channel
    pub allowed_origins: Vec<String>,
    pub realtime: RealtimeConfig,
}

/// Origin check: runs before upgrade extraction so 403 is returned cleanly.
///
/// Requests without an Origin header (non-browser clients) pass.
async fn ws_origin(
    State(state): State<Arc<WsAppState>>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|o| state.allowed_origins.iter().any(|a| a == o))
            .unwrap_or(false);
        if !allowed {
            warn!(origin = ?origin, "Rejected WebSocket upgrade from disallowed origin");
            return (StatusCode::FORBIDDEN, "Origin not allowed").into_response();
        }
    }
    next.run(req).await
}

/// GET /api/ws - WebSocket upgrade handler (origin handled by ws_origin middleware)
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsAppState>>) -> Response {
    info!("WebSocket upgrade request received");
    let sessions = Arc::clone(&state.sessions);
    let outbox_capacity = state.realtime.outbox_capacity;
    ws.on_upgrade(move |socket| handle_connection(socket, sessions, outbox_capacity))
}

/// Real-time channel status
#[derive(Serialize)]
pub struct StatusResponse {
    pub connections: usize,
    pub broadcast_interval_seconds: u64,
    pub sweep_interval_seconds: u64,
    pub stale_after_seconds: u64,
}

/// GET /api/realtime/status
async fn realtime_status(State(state): State<Arc<WsAppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        connections: state.sessions.len(),
        broadcast_interval_seconds: state.realtime.broadcast_interval_seconds,
        sweep_interval_seconds: state.realtime.sweep_interval_seconds,
        stale_after_seconds: state.realtime.stale_after_seconds,
    })
}

/// Create WebSocket router; the origin check guards only the upgrade route
pub fn create_ws_router(state: Arc<WsAppState>) -> Router {
    Router::new()
        .route("/api/ws", get(ws_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), ws_origin))
        .route("/api/realtime/status", get(realtime_status))
        .with_state(state)
}
