//! Chat relay - a stateless WebSocket fan-out broadcaster.
//!
//! Every text frame received from any client is rebroadcast verbatim to all
//! connected clients, including the sender. Payloads are opaque strings (the
//! dashboard encrypts client-side), there is no persistence or delivery
//! guarantee, and receivers that fall behind the broadcast buffer are
//! disconnected rather than buffered without bound.

use crate::api::AppState;
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Messages a slow client may fall behind before being dropped
const RELAY_BUFFER: usize = 64;

/// Broadcast hub shared by all relay connections.
///
/// Constructed once at startup and handed to [`AppState`]; cloning shares the
/// same underlying channel.
#[derive(Debug, Clone)]
pub struct RelayHub {
    tx: broadcast::Sender<String>,
}

impl RelayHub {
    /// Creates a hub with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(RELAY_BUFFER);
        Self { tx }
    }

    /// Subscribes a new client to the broadcast stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    /// Broadcasts a message to every subscriber, returning how many clients
    /// will receive it. Zero subscribers is not an error.
    pub fn publish(&self, message: String) -> usize {
        self.tx.send(message).unwrap_or(0)
    }
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades the request and attaches the socket to the relay hub.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| client_loop(socket, state.relay))
}

/// Pumps one client: incoming text frames fan out through the hub, hub
/// messages fan in to the socket.
async fn client_loop(mut socket: WebSocket, hub: RelayHub) {
    let mut rx = hub.subscribe();

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    hub.publish(text);
                }
                Some(Ok(Message::Close(_))) | None => break,
                // Pings are answered by axum; binary frames are not part of
                // the relay protocol and are dropped.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Relay socket error: {e}");
                    break;
                }
            },
            outgoing = rx.recv() => match outgoing {
                Ok(text) => {
                    if socket.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Relay client lagged by {skipped} messages, disconnecting");
                    break;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let hub = RelayHub::new();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        assert_eq!(hub.publish("ciphertext".to_string()), 2);
        assert_eq!(rx1.recv().await.unwrap(), "ciphertext");
        assert_eq!(rx2.recv().await.unwrap(), "ciphertext");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_not_an_error() {
        let hub = RelayHub::new();
        assert_eq!(hub.publish("dropped".to_string()), 0);
    }

    #[tokio::test]
    async fn test_clones_share_one_channel() {
        let hub = RelayHub::new();
        let clone = hub.clone();
        let mut rx = hub.subscribe();

        clone.publish("via clone".to_string());
        assert_eq!(rx.recv().await.unwrap(), "via clone");
    }
}
