//! Inbound and outbound WebSocket message type definitions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A serialized outbound message, shared by every queue it is delivered to.
pub type Payload = Arc<str>;

/// Messages sent by the server to every participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// A chat line relayed from one participant.
    Chat {
        /// Display name of the sender.
        username: String,
        /// Text exactly as the sender wrote it.
        content: String,
    },
    /// The current presence snapshot.
    Users {
        /// Display names of every registered connection.
        users: Vec<String>,
    },
}

/// What a single inbound text frame means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Application-level `{"type":"ping"}`; liveness only, never relayed.
    Heartbeat,
    /// Anything else is chat content, relayed verbatim.
    Chat(String),
}
