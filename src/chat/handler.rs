//! Chat socket handler
//!
//! Handles the upgrade, then runs a reader loop and a writer task per
//! connection. Whichever ends first tears down the other and unregisters.

use axum::extract::ws::{Message, WebSocket};
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use futures::stream::{SplitSink, SplitStream};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::ChatHub;
use super::registry::{ConnectionId, ConnectionState};
use crate::server::state::AppState;

/// WebSocket upgrade handler
///
/// Endpoint: GET /chat/ws
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    let hub = state.chat.clone();

    ws.on_failed_upgrade(|e| {
        tracing::warn!(error = %e, "Chat upgrade failed, connection abandoned");
    })
    .on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Connection lifecycle: register, pump both directions, unregister.
async fn handle_socket(socket: WebSocket, hub: Arc<ChatHub>) {
    let (sender, receiver) = socket.split();
    let (conn_id, rx) = hub.join();
    tracing::debug!(conn_id, state = %ConnectionState::Open, "Chat connection state");

    let mut send_task = tokio::spawn(write_loop(sender, rx, conn_id));
    let recv_hub = hub.clone();
    let mut recv_task = tokio::spawn(async move { read_loop(receiver, recv_hub, conn_id).await });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    hub.leave(conn_id);
    tracing::debug!(conn_id, state = %ConnectionState::Closed, "Chat connection state");
}

/// Drain the outbound channel into the socket. Ends when the registry drops
/// the sender or a write fails.
async fn write_loop(
    mut sender: SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<String>,
    conn_id: ConnectionId,
) {
    while let Some(html) = rx.recv().await {
        if let Err(e) = sender.send(Message::Text(html.into())).await {
            tracing::debug!(conn_id, error = %e, "Chat write failed");
            return;
        }
    }
    let _ = sender.close().await;
}

/// Read frames until the peer closes or the read fails. A bad payload is
/// logged and skipped.
async fn read_loop(mut receiver: SplitStream<WebSocket>, hub: Arc<ChatHub>, conn_id: ConnectionId) {
    while let Some(frame) = receiver.next().await {
        let msg = match frame {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(conn_id, error = %e, "Chat read failed");
                return;
            }
        };

        let result = match msg {
            Message::Text(text) => hub.relay_text(conn_id, text.as_str()),
            Message::Binary(bytes) => hub.relay_bytes(conn_id, &bytes),
            Message::Close(_) => return,
            // Transport answers pings itself
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        match result {
            Ok(report) => tracing::debug!(
                conn_id,
                delivered = report.delivered,
                dropped = report.dropped.len(),
                "Chat message relayed"
            ),
            Err(e) => tracing::warn!(conn_id, error = %e, "Ignoring chat frame"),
        }
    }
}
