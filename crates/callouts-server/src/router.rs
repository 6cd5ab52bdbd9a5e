//! Axum router setup for the callouts server

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::{
    assets::static_handler,
    handlers::{get_session_diagram, get_summary, health_check, list_sessions},
    websocket::ws_handler,
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // WebSocket endpoint for interactive sessions
        .route("/ws", get(ws_handler))
        // REST API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(get_summary))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session/diagram", get(get_session_diagram))
        // Static file serving
        .route("/", get(static_handler))
        .route("/*path", get(static_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
