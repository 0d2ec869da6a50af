//! Ping/pong heartbeat timing for WebSocket keepalive.

use std::time::Duration;

use tokio::time::{self, Interval, MissedTickBehavior};

use chathub_core::config::RealtimeConfig;

/// Heartbeat configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Interval between pings
    pub ping_interval: Duration,
    /// Inbound inactivity window before the connection is considered dead
    pub read_timeout: Duration,
    /// Deadline for a single write batch or ping
    pub write_timeout: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self::from(&RealtimeConfig::default())
    }
}

impl From<&RealtimeConfig> for HeartbeatConfig {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: config.ping_interval(),
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
        }
    }
}

impl HeartbeatConfig {
    /// Builds the ping ticker. The first tick fires one interval from now,
    /// not immediately, and late ticks are delayed rather than bunched.
    pub fn ping_ticker(&self) -> Interval {
        let mut ticker = time::interval_at(
            time::Instant::now() + self.ping_interval,
            self.ping_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }
}
