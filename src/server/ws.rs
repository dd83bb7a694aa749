use crate::state::{AppState, WsMessage};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// GET /ws -- live payoff chart feed
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| chart_feed(socket, state))
}

/// Serialize one update onto the socket. Err means the client is gone.
async fn push_update(
    sink: &mut SplitSink<WebSocket, Message>,
    msg: &WsMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(json) => sink.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::warn!(error = %e, "portfolio update not serializable");
            Ok(())
        }
    }
}

async fn chart_feed(socket: WebSocket, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();
    // Subscribe before reading the portfolio so no mutation falls in between.
    let mut updates = state.ws_tx.subscribe();

    let current = state.update_message(&state.portfolio());
    if push_update(&mut sink, &current).await.is_err() {
        return;
    }

    let forward = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(msg) => {
                    if push_update(&mut sink, &msg).await.is_err() {
                        break;
                    }
                }
                // Each update carries the whole portfolio; skipped ones are superseded.
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "chart client lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // The dashboard never sends anything meaningful; watch for disconnect only.
    let disconnect = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            if matches!(frame, Ok(Message::Close(_)) | Err(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = forward => {},
        _ = disconnect => {},
    }
}
