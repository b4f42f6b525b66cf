//! Realtime transport to the participant namespace
//!
//! The transport is a persistent bidirectional channel with two client
//! primitives, `join` and `leave`, and a stream of inbound events:
//! - `connected` acknowledgment (with the server's recovery flag)
//! - `transcript` / `translation` text for joined rooms
//! - service status delivered on the heartbeat room
//!
//! The WebSocket implementation reconnects forever on a fixed backoff;
//! what to rejoin after a drop is the session controller's decision, not
//! the transport's.

mod messages;
mod socket;

pub use messages::{ClientMessage, ServerMessage, ServiceStatusMessage};
pub use socket::{websocket_url, SocketTransport};

use anyhow::Result;

/// Inbound transport events delivered to the session controller
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A connection attempt is starting
    Connecting,
    /// The server acknowledged the connection. `recovered` is true when the
    /// server resumed the previous session (room memberships survived).
    Connected { recovered: bool },
    /// The connection dropped; the transport will retry on its own
    Disconnected,
    /// Source-language text for the shared transcript room
    Transcript(String),
    /// Translated text for the joined language room
    Translation(String),
    /// Service status from the heartbeat room
    Status {
        active: bool,
        livestream: Option<String>,
    },
}

/// Room join/leave primitives, injected into the session controller so
/// tests can substitute a recording fake.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Request membership of a room
    async fn join(&self, room: &str) -> Result<()>;

    /// Drop membership of a room
    async fn leave(&self, room: &str) -> Result<()>;

    /// Tear the connection down; no further reconnect attempts
    async fn close(&self) -> Result<()>;
}
