use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::state::SharedState;

/// Push every published snapshot to a viewer WebSocket as a text frame.
///
/// Inbound frames are ignored apart from close; the session ends when either
/// side goes away or the viewer is dropped from the fan-out.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let mut subscription = state.broadcaster().subscribe().await;
    let viewer = subscription.id();
    info!(subscriber = %viewer, "viewer websocket connected");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            payload = subscription.recv() => {
                let Some(payload) = payload else {
                    debug!(subscriber = %viewer, "viewer removed from fan-out");
                    break;
                };
                if sender.send(Message::Text((&*payload).into())).await.is_err() {
                    break;
                }
            }
            inbound = receiver.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(subscriber = %viewer, error = %err, "websocket error");
                    break;
                }
            }
        }
    }

    let _ = sender.close().await;
    info!(subscriber = %viewer, "viewer websocket disconnected");
}
