//! Notification push over WebSocket

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::notify::{ClientMessage, Delivery, LaggedMessage, PongMessage, WelcomeMessage};

#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// Only forward notifications addressed to this user
    pub username: Option<String>,
}

/// GET /ws - Upgrade to a notification stream
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let username = params
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    ws.on_upgrade(move |socket| stream_notifications(socket, state, username))
}

/// Serialize `payload` and send it as a text frame; false once the peer is gone
async fn send_json<T: Serialize>(socket: &mut WebSocket, payload: &T) -> bool {
    match serde_json::to_string(payload) {
        Ok(text) => socket.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode websocket frame");
            true
        }
    }
}

async fn stream_notifications(mut socket: WebSocket, state: Arc<AppState>, username: Option<String>) {
    // Subscribe before the welcome so nothing recorded in between is missed
    let mut listener = state.notifier.listen(username);
    tracing::debug!(username = ?listener.username(), "websocket listener connected");

    let welcome = WelcomeMessage::new(
        state.notifier.current_sequence_id(),
        listener.username().map(str::to_string),
    );
    let mut open = send_json(&mut socket, &welcome).await;

    while open {
        open = tokio::select! {
            delivery = listener.next() => match delivery {
                Some(Delivery::Notification(msg)) => send_json(&mut socket, &msg).await,
                Some(Delivery::Lagged(missed)) => {
                    tracing::warn!(missed, username = ?listener.username(), "websocket listener lagged");
                    send_json(&mut socket, &LaggedMessage::new(missed)).await
                }
                None => false,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(frame)) => reply_to(frame, &mut socket).await,
                Some(Err(_)) | None => false,
            },
        };
    }

    tracing::debug!(username = ?listener.username(), "websocket listener disconnected");
}

/// Answer heartbeats; false when the client closed the connection
async fn reply_to(frame: Message, socket: &mut WebSocket) -> bool {
    match frame {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(ClientMessage::Ping) => send_json(socket, &PongMessage::default()).await,
            Err(_) => true,
        },
        Message::Ping(payload) => socket.send(Message::Pong(payload)).await.is_ok(),
        Message::Binary(_) | Message::Pong(_) => true,
        Message::Close(_) => false,
    }
}
