//! Real-time hub configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Real-time (WebSocket) hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Capacity of each connection's outbound queue.
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer_size: usize,
    /// Capacity of the hub control loop's inbound event channel.
    #[serde(default = "default_hub_buffer")]
    pub hub_buffer_size: usize,
    /// Interval between server pings, in seconds.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
    /// Inbound inactivity window before a connection is dropped, in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
    /// Deadline for a single write batch or ping, in seconds.
    #[serde(default = "default_write_timeout")]
    pub write_timeout_seconds: u64,
    /// Largest inbound message accepted from a peer, in bytes.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
    /// Maximum number of queued payloads flushed in one write batch.
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            outbound_buffer_size: default_outbound_buffer(),
            hub_buffer_size: default_hub_buffer(),
            ping_interval_seconds: default_ping_interval(),
            read_timeout_seconds: default_read_timeout(),
            write_timeout_seconds: default_write_timeout(),
            max_message_bytes: default_max_message_bytes(),
            max_batch: default_max_batch(),
        }
    }
}

impl RealtimeConfig {
    /// Checks buffer sizes and the heartbeat asymmetry.
    ///
    /// The ping interval must be strictly shorter than the read timeout,
    /// otherwise healthy peers would be dropped between two pings.
    pub fn validate(&self) -> AppResult<()> {
        if self.outbound_buffer_size == 0 || self.hub_buffer_size == 0 || self.max_batch == 0 {
            return Err(AppError::configuration(
                "realtime buffer sizes and max_batch must be greater than zero",
            ));
        }
        if self.ping_interval_seconds == 0 || self.write_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "realtime ping interval and write timeout must be greater than zero",
            ));
        }
        if self.ping_interval_seconds >= self.read_timeout_seconds {
            return Err(AppError::configuration(format!(
                "realtime.ping_interval_seconds ({}) must be shorter than read_timeout_seconds ({})",
                self.ping_interval_seconds, self.read_timeout_seconds
            )));
        }
        Ok(())
    }

    /// Ping interval as a [`Duration`].
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_seconds)
    }

    /// Read inactivity window as a [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    /// Write deadline as a [`Duration`].
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_seconds)
    }
}

fn default_outbound_buffer() -> usize {
    256
}

fn default_hub_buffer() -> usize {
    1024
}

fn default_ping_interval() -> u64 {
    5
}

fn default_read_timeout() -> u64 {
    15
}

fn default_write_timeout() -> u64 {
    10
}

fn default_max_message_bytes() -> usize {
    64 * 1024
}

fn default_max_batch() -> usize {
    64
}
