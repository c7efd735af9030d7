// HTTP and WebSocket APIs

mod error;
pub mod input;
pub mod metrics;
pub mod websocket;

pub use error::AppError;
pub use input::create_input_router;
pub use metrics::create_metrics_router;
pub use websocket::{create_ws_router, ws_handler, WsAppState};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// CORS for the dashboard front end: listed origins, GET and POST only
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid allowed origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Full application router
pub fn create_app(ws_state: Arc<WsAppState>) -> Router {
    let cors = cors_layer(&ws_state.allowed_origins);

    Router::new()
        .merge(create_metrics_router())
        .merge(create_input_router())
        .merge(create_ws_router(ws_state))
        .layer(cors)
}
