//! Transport-neutral WebSocket frames.

/// One WebSocket frame as seen by the connection loops.
///
/// The HTTP layer converts its socket's message type to and from this enum,
/// so the loops never depend on a particular WebSocket implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 data frame.
    Text(String),
    /// Binary data frame.
    Binary(Vec<u8>),
    /// Transport-level ping.
    Ping(Vec<u8>),
    /// Transport-level pong (heartbeat response).
    Pong(Vec<u8>),
    /// Close frame.
    Close,
}
