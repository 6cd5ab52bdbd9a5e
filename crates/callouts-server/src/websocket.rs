//! WebSocket handling for session selection and hover interaction

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use callouts_core::{DiagramController, Emphasis, Highlight, ParticipantId, PartyPalette};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::handlers::DiagramPayload;
use crate::ServerState;

/// Messages sent by the client
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The session selector changed
    SelectSession { session: String },
    /// Pointer entered a node
    Focus { node: ParticipantId },
    /// Pointer left a node
    Unfocus,
    /// Entrance animation of the given diagram finished
    AnimationComplete { generation: u64 },
    Ping,
}

/// Messages sent by the server
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A freshly built diagram; interaction is disabled until the client
    /// reports the animation as complete
    Diagram { payload: DiagramPayload },
    /// Counts and link emphasis for the focused node
    Highlight { highlight: Highlight },
    /// Focus cleared
    Cleared { links: Vec<Emphasis> },
    Pong,
    Error { message: String },
}

/// Handle WebSocket upgrade requests
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection. Each connection owns its own
/// diagram context and processes messages strictly in order.
async fn handle_socket(socket: WebSocket, state: Arc<ServerState>) {
    info!("New WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();
    let mut controller = state.controller();

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                debug!("Received WebSocket message: {}", text);

                let reply = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        handle_client_message(client_msg, &mut controller, &state.config.palette)
                    }
                    Err(e) => {
                        warn!("Failed to parse WebSocket message: {}", e);
                        Some(ServerMessage::Error {
                            message: format!("unrecognized message: {}", e),
                        })
                    }
                };

                let Some(reply) = reply else {
                    continue;
                };
                match serde_json::to_string(&reply) {
                    Ok(json) => {
                        if sender.send(Message::Text(json)).await.is_err() {
                            debug!("Failed to send message to WebSocket client");
                            break;
                        }
                    }
                    Err(e) => warn!("Failed to serialize reply: {}", e),
                }
            }
            Message::Close(_) => {
                debug!("WebSocket client disconnected");
                break;
            }
            _ => {}
        }
    }

    info!("WebSocket connection closed");
}

/// Apply one client message to the connection's diagram context. Hover
/// events that arrive before the entrance animation finished produce no
/// reply.
pub fn handle_client_message(
    msg: ClientMessage,
    controller: &mut DiagramController,
    palette: &PartyPalette,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::SelectSession { session } => {
            match controller.on_session_selected(&session) {
                Ok(current) => Some(ServerMessage::Diagram {
                    payload: DiagramPayload::new(current, palette),
                }),
                Err(e) => Some(ServerMessage::Error {
                    message: e.to_string(),
                }),
            }
        }
        ClientMessage::Focus { node } => controller
            .on_node_focused(&node)
            .map(|highlight| ServerMessage::Highlight { highlight }),
        ClientMessage::Unfocus => controller
            .on_node_unfocused()
            .map(|links| ServerMessage::Cleared { links }),
        ClientMessage::AnimationComplete { generation } => {
            debug!("Animation complete for generation {}", generation);
            controller.on_animation_complete(generation);
            None
        }
        ClientMessage::Ping => Some(ServerMessage::Pong),
    }
}
