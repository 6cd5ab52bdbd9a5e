//! REST API handlers for the callouts server

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use callouts_core::{
    format_date_de, session_headline, ColumnLayout, CurrentDiagram, Diagram, Error, PartyPalette,
    SessionId, Summary,
};
use serde::Serialize;

use crate::ServerState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One entry of the session selector
#[derive(Debug, Serialize, PartialEq)]
pub struct SessionEntry {
    pub session: SessionId,
    pub date: Option<String>,
    pub headline: String,
}

/// A built diagram plus what the client needs to draw it
#[derive(Debug, Clone, Serialize)]
pub struct DiagramPayload {
    pub generation: u64,
    pub headline: String,
    pub diagram: Diagram,
    /// Party color per node, in node order.
    pub colors: Vec<String>,
}

impl DiagramPayload {
    pub fn new(current: &CurrentDiagram, palette: &PartyPalette) -> Self {
        let colors = current
            .view
            .nodes
            .iter()
            .map(|n| palette.color(&n.party).to_string())
            .collect();
        DiagramPayload {
            generation: current.generation,
            headline: current.headline.clone(),
            diagram: current.diagram.clone(),
            colors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, err: &Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Dataset-wide summary
pub async fn get_summary(State(state): State<Arc<ServerState>>) -> Json<Summary> {
    Json(state.summary.clone())
}

/// Distinct sessions in dataset order
pub async fn list_sessions(State(state): State<Arc<ServerState>>) -> Json<Vec<SessionEntry>> {
    let entries = state
        .store
        .session_dates()
        .iter()
        .map(|&(session, date)| SessionEntry {
            session,
            date: Some(format_date_de(date)),
            headline: session_headline(session, Some(date)),
        })
        .collect();
    Json(entries)
}

/// Positioned diagram for one session. A selector that is not a session
/// number is a client error; an unknown session yields an empty diagram.
pub async fn get_session_diagram(
    State(state): State<Arc<ServerState>>,
    Path(selector): Path<String>,
) -> Result<Json<DiagramPayload>, (StatusCode, Json<ErrorResponse>)> {
    let session: SessionId = selector
        .parse()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;

    let current = CurrentDiagram::build(
        &state.store,
        session,
        &ColumnLayout,
        state.config.layout.params(),
        0,
    )
    .map_err(|e| {
        tracing::error!("Failed to build diagram for session {}: {}", session, e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, &e)
    })?;

    Ok(Json(DiagramPayload::new(&current, &state.config.palette)))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}
