//! Viewer WebSocket sessions.
//!
//! Each connection is one subscription: the session task forwards every
//! snapshot it receives from the engine as one JSON text message and tears
//! itself down on close, transport error, send timeout, or end-of-stream
//! (engine stopped, or this viewer was dropped at the broadcaster for
//! lagging). A reconnect is a fresh subscription with no backfill.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// `GET /ws` — upgrade and stream snapshots until either side ends it.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| viewer_session(socket, state))
}

async fn viewer_session(socket: WebSocket, state: AppState) {
    let Ok(mut subscription) = state.engine.subscribe().await else {
        debug!("engine not running, closing viewer connection");
        return;
    };
    let viewer = subscription.id();
    info!(%viewer, "viewer connected");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            snapshot = subscription.recv() => {
                let Some(snapshot) = snapshot else {
                    debug!(%viewer, "snapshot stream ended");
                    break;
                };
                let payload = match serde_json::to_string(&*snapshot) {
                    Ok(payload) => payload,
                    Err(err) => {
                        error!(%viewer, %err, "snapshot serialization failed");
                        break;
                    }
                };
                match timeout(state.ws_send_timeout, sender.send(Message::Text(payload.into()))).await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        debug!(%viewer, %err, "send failed, viewer gone");
                        break;
                    }
                    Err(_) => {
                        warn!(%viewer, "viewer not ready within grace period, dropping it");
                        break;
                    }
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%viewer, "viewer closed the connection");
                        break;
                    }
                    // The stream is server-initiated; anything the client
                    // sends besides close is ignored.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        debug!(%viewer, %err, "transport error");
                        break;
                    }
                }
            }
        }
    }

    state.engine.unsubscribe(viewer).await;
    info!(%viewer, "viewer disconnected");
}
