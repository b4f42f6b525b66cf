use serde::{Deserialize, Serialize};

/// Client-to-server frames
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ClientMessage {
    Join { room: String },
    Leave { room: String },
}

/// Service status payload delivered on the heartbeat room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceStatusMessage {
    /// Whether the service is actively being operated and accepts joins
    pub active: bool,

    /// Livestream state ("ON"/"OFF"), when the tenant runs one
    #[serde(default)]
    pub livestream: Option<String>,
}

/// Server-to-client frames
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Connection acknowledgment. `recovered` means the server resumed the
    /// prior session and room memberships are intact.
    Connected { sid: String, recovered: bool },
    Transcript { data: String },
    Translation { data: String },
    Status { data: ServiceStatusMessage },
}
