//! WebSocket route handler
//!
//! Handles WebSocket upgrade and adapts the axum socket to the
//! tungstenite message types the connection loop works with.

use axum::{
    body::Bytes,
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{future, SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::{self, protocol::CloseFrame as TungsteniteCloseFrame};
use tracing::info;

use crate::AppState;

/// Create WebSocket routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}

/// WebSocket upgrade handler
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    info!("WebSocket upgrade request received");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (sender, receiver) = socket.split();

    let sender = sender.with(|msg: tungstenite::Message| future::ready(to_axum(msg)));
    let receiver = receiver.map(|result| result.map(from_axum));

    state.ws_state.handle_connection(sender, receiver).await;
}

/// Convert an outgoing tungstenite message for the axum socket
fn to_axum(msg: tungstenite::Message) -> Result<Message, axum::Error> {
    let converted = match msg {
        tungstenite::Message::Text(text) => Message::Text(text.to_string().into()),
        tungstenite::Message::Binary(data) => Message::Binary(Bytes::from(data.to_vec())),
        tungstenite::Message::Ping(data) => Message::Ping(Bytes::from(data.to_vec())),
        tungstenite::Message::Pong(data) => Message::Pong(Bytes::from(data.to_vec())),
        tungstenite::Message::Close(frame) => Message::Close(frame.map(|f| CloseFrame {
            code: f.code.into(),
            reason: f.reason.as_str().to_owned().into(),
        })),
        tungstenite::Message::Frame(_) => {
            return Err(axum::Error::new("raw frames cannot be sent"));
        }
    };

    Ok(converted)
}

/// Convert an incoming axum message for the connection loop
fn from_axum(msg: Message) -> tungstenite::Message {
    match msg {
        Message::Text(text) => tungstenite::Message::Text(text.to_string().into()),
        Message::Binary(data) => tungstenite::Message::Binary(data.to_vec().into()),
        Message::Ping(data) => tungstenite::Message::Ping(data.to_vec().into()),
        Message::Pong(data) => tungstenite::Message::Pong(data.to_vec().into()),
        Message::Close(frame) => tungstenite::Message::Close(frame.map(|f| TungsteniteCloseFrame {
            code: f.code.into(),
            reason: f.reason.as_str().to_owned().into(),
        })),
    }
}
