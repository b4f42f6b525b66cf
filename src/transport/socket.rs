use super::messages::{ClientMessage, ServerMessage};
use super::{Transport, TransportEvent};
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

/// Derive the websocket URL for a namespace from the HTTP server URL
pub fn websocket_url(server_url: &str, namespace: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let ws = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };

    format!("{}/{}", ws, namespace)
}

/// WebSocket transport to the participant namespace.
///
/// A supervisor task owns the connection and retries forever on a fixed
/// backoff. `join`/`leave` enqueue frames for the current connection;
/// frames queued while disconnected are discarded on reconnect, since the
/// session controller replays whatever membership still matters.
pub struct SocketTransport {
    outbound: mpsc::Sender<ClientMessage>,
    shutdown: watch::Sender<bool>,
}

impl SocketTransport {
    /// Open the transport. Returns the handle and the inbound event stream.
    pub fn connect(
        url: String,
        reconnect_delay: Duration,
    ) -> (Self, mpsc::Receiver<TransportEvent>) {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (out_tx, out_rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(supervise(url, reconnect_delay, event_tx, out_rx, shutdown_rx));

        (
            Self {
                outbound: out_tx,
                shutdown: shutdown_tx,
            },
            event_rx,
        )
    }
}

#[async_trait::async_trait]
impl Transport for SocketTransport {
    async fn join(&self, room: &str) -> Result<()> {
        self.outbound
            .send(ClientMessage::Join {
                room: room.to_string(),
            })
            .await
            .context("Transport is closed")
    }

    async fn leave(&self, room: &str) -> Result<()> {
        self.outbound
            .send(ClientMessage::Leave {
                room: room.to_string(),
            })
            .await
            .context("Transport is closed")
    }

    async fn close(&self) -> Result<()> {
        // The supervisor flushes pending leaves, sends a close frame and
        // exits without scheduling another reconnect.
        let _ = self.shutdown.send(true);
        Ok(())
    }
}

enum ConnectionEnd {
    Lost,
    Stopped,
}

async fn supervise(
    url: String,
    reconnect_delay: Duration,
    events: mpsc::Sender<TransportEvent>,
    mut outbound: mpsc::Receiver<ClientMessage>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }

        // Frames queued while down targeted the previous connection
        while outbound.try_recv().is_ok() {}

        if events.send(TransportEvent::Connecting).await.is_err() {
            break;
        }

        info!("Connecting to {}", url);

        let stream = tokio::select! {
            res = connect_async(&url) => match res {
                Ok((stream, _)) => stream,
                Err(e) => {
                    warn!("Connection to {} failed: {}", url, e);
                    if events.send(TransportEvent::Disconnected).await.is_err() {
                        break;
                    }
                    tokio::select! {
                        _ = tokio::time::sleep(reconnect_delay) => continue,
                        _ = shutdown.changed() => break,
                    }
                }
            },
            _ = shutdown.changed() => break,
        };

        match pump(stream, &events, &mut outbound, &mut shutdown).await {
            ConnectionEnd::Stopped => break,
            ConnectionEnd::Lost => {
                if events.send(TransportEvent::Disconnected).await.is_err() {
                    break;
                }
                tokio::select! {
                    _ = tokio::time::sleep(reconnect_delay) => {}
                    _ = shutdown.changed() => break,
                }
            }
        }
    }

    info!("Transport supervisor stopped");
}

/// Drive one live connection until it drops or the transport is closed
async fn pump(
    stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    events: &mpsc::Sender<TransportEvent>,
    outbound: &mut mpsc::Receiver<ClientMessage>,
    shutdown: &mut watch::Receiver<bool>,
) -> ConnectionEnd {
    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            inbound = source.next() => match inbound {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<ServerMessage>(&text) {
                    Ok(message) => {
                        let event = match message {
                            ServerMessage::Connected { sid, recovered } => {
                                info!("{} connected to the socket (recovered={})", sid, recovered);
                                TransportEvent::Connected { recovered }
                            }
                            ServerMessage::Transcript { data } => TransportEvent::Transcript(data),
                            ServerMessage::Translation { data } => TransportEvent::Translation(data),
                            ServerMessage::Status { data } => TransportEvent::Status {
                                active: data.active,
                                livestream: data.livestream,
                            },
                        };
                        if events.send(event).await.is_err() {
                            return ConnectionEnd::Stopped;
                        }
                    }
                    Err(e) => warn!("Failed to parse server message: {}", e),
                },
                Some(Ok(Message::Close(_))) | None => return ConnectionEnd::Lost,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Socket error: {}", e);
                    return ConnectionEnd::Lost;
                }
            },
            frame = outbound.recv() => match frame {
                Some(message) => {
                    let payload = match serde_json::to_string(&message) {
                        Ok(payload) => payload,
                        Err(e) => {
                            warn!("Failed to encode client message: {}", e);
                            continue;
                        }
                    };
                    if let Err(e) = sink.send(Message::Text(payload)).await {
                        warn!("Failed to send client message: {}", e);
                        return ConnectionEnd::Lost;
                    }
                }
                // Transport handle dropped
                None => return ConnectionEnd::Stopped,
            },
            _ = shutdown.changed() => {
                // Flush leaves issued right before close, then say goodbye
                while let Ok(message) = outbound.try_recv() {
                    if let Ok(payload) = serde_json::to_string(&message) {
                        let _ = sink.send(Message::Text(payload)).await;
                    }
                }
                let _ = sink.send(Message::Close(None)).await;
                return ConnectionEnd::Stopped;
            }
        }
    }
}
