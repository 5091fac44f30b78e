//! WebSocket connection handler

use std::sync::Arc;
use axum::{
    extract::{ws::{Message, WebSocket, WebSocketUpgrade}, State},
    response::Response,
};

use super::state::AppState;
use crate::chat::{ClientMessage, ServerMessage};
use crate::types::ConnectionId;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let (id, mut inbox) = state.registry.connect();

    // Welcome goes out before anything queued in the inbox
    if send_frame(&mut socket, &ServerMessage::Connected { id }).await.is_err() {
        state.registry.disconnect(&id);
        return; // Client disconnected immediately
    }

    loop {
        tokio::select! {
            // Queued broadcasts, acks and replies
            frame = inbox.recv() => {
                match frame {
                    Some(frame) => {
                        if send_frame(&mut socket, &frame).await.is_err() {
                            break; // Client disconnected
                        }
                    }
                    None => break,
                }
            }

            // Handle client messages
            result = socket.recv() => {
                match result {
                    Some(Ok(msg)) => {
                        if !handle_client_message(msg, id, &state).await {
                            break; // Client requested close
                        }
                    }
                    Some(Err(e)) => {
                        log::debug!("WebSocket error on {}: {}", id, e);
                        break;
                    }
                    None => break, // Client disconnected
                }
            }
        }
    }

    state.registry.disconnect(&id);
}

async fn send_frame(socket: &mut WebSocket, frame: &ServerMessage) -> Result<(), axum::Error> {
    match serde_json::to_string(frame) {
        Ok(json) => socket.send(Message::Text(json)).await,
        Err(e) => {
            log::error!("Failed to encode frame: {}", e);
            Ok(())
        }
    }
}

/// Handle a message from the client
/// Returns false if the connection should be closed
async fn handle_client_message(
    msg: Message,
    id: ConnectionId,
    state: &AppState,
) -> bool {
    match msg {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::ChatMessage { data, ack }) => {
                    let delivery = state.engine.handle_incoming(id, data.into_text()).await;

                    // Queued behind the sender's own echo
                    if let Some(ack_id) = ack {
                        state.registry.send_to(
                            &id,
                            ServerMessage::Ack {
                                id: ack_id,
                                data: delivery.ack(),
                            },
                        );
                    }
                }
                Ok(ClientMessage::Ping) => {
                    state.registry.send_to(&id, ServerMessage::Pong);
                }
                Err(e) => {
                    log::debug!("Unreadable frame from {}: {}", id, e);
                    state
                        .registry
                        .send_to(&id, ServerMessage::bad_request(e.to_string()));
                }
            }
            true
        }
        Message::Binary(_) => true, // Ignore binary messages
        // Pongs are queued by the socket itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => false, // Client requested close
    }
}
