//! Reasons a connection's loops stop.

use std::time::Duration;

use thiserror::Error;

use chathub_core::error::AppError;

/// Why a connection ended. Always resolved locally by deregistering the
/// connection; never propagated to other connections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The transport failed while reading or writing.
    #[error("transport error: {0}")]
    Transport(String),
    /// No inbound frame arrived within the inactivity window.
    #[error("no inbound activity for {0:?}")]
    ReadTimeout(Duration),
    /// A write batch or ping did not complete within the deadline.
    #[error("write did not complete within {0:?}")]
    WriteTimeout(Duration),
    /// The peer sent a close frame or ended the stream.
    #[error("connection closed by peer")]
    Closed,
    /// The hub closed this connection's outbound queue.
    #[error("outbound queue closed by hub")]
    QueueClosed,
    /// The hub control loop is gone.
    #[error("hub control loop is not running")]
    HubUnavailable,
}

/// The hub control loop has stopped and no longer accepts commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("hub control loop is not running")]
pub struct HubUnavailable;

impl From<HubUnavailable> for ConnectionError {
    fn from(_: HubUnavailable) -> Self {
        Self::HubUnavailable
    }
}

impl From<HubUnavailable> for AppError {
    fn from(err: HubUnavailable) -> Self {
        AppError::service_unavailable(err.to_string())
    }
}
