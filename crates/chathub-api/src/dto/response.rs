//! Response DTOs.

use serde::{Deserialize, Serialize};

use chathub_realtime::metrics::MetricsSnapshot;

/// Identity behind the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Display name.
    pub username: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Whether the hub control loop accepts commands.
    pub hub: String,
    /// Registered connections.
    pub members: usize,
    /// Display names of registered connections.
    pub users: Vec<String>,
    /// Engine counters.
    pub metrics: MetricsSnapshot,
}
