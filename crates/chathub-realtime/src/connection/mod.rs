//! WebSocket connection lifecycle: handle, heartbeat, read and write loops, auth.

pub mod authenticator;
pub mod frame;
pub mod handle;
pub mod heartbeat;
mod reader;
mod writer;

use std::fmt::Display;

use futures::{Sink, Stream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use chathub_core::config::RealtimeConfig;

use crate::error::{ConnectionError, HubUnavailable};
use crate::hub::HubHandle;
use crate::message::types::Payload;

pub use frame::Frame;
pub use handle::{ConnectionHandle, ConnectionId};
pub use heartbeat::HeartbeatConfig;

/// Per-connection tuning shared by every connection of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Ping cadence and read/write deadlines.
    pub heartbeat: HeartbeatConfig,
    /// Capacity of the outbound queue.
    pub queue_capacity: usize,
    /// Maximum payloads flushed in one write batch.
    pub max_batch: usize,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self::from(&RealtimeConfig::default())
    }
}

impl From<&RealtimeConfig> for ConnectionOptions {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            heartbeat: HeartbeatConfig::from(config),
            queue_capacity: config.outbound_buffer_size,
            max_batch: config.max_batch,
        }
    }
}

/// An authenticated connection that the hub already knows about.
#[derive(Debug)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Display name
    pub username: String,
    /// Receiving end of the outbound queue
    queue: mpsc::Receiver<Payload>,
}

impl Connection {
    /// Registers a new connection for `username` with the hub.
    ///
    /// Registration is submitted before any frame is read, so the hub always
    /// sees it ahead of the matching deregistration.
    pub async fn open(
        username: impl Into<String>,
        hub: &HubHandle,
        options: &ConnectionOptions,
    ) -> Result<Self, HubUnavailable> {
        let (handle, queue) = ConnectionHandle::new(username, options.queue_capacity);
        let id = handle.id;
        let username = handle.username.clone();

        hub.register(handle).await?;

        Ok(Self {
            id,
            username,
            queue,
        })
    }

    /// Drives the connection until either loop stops, then deregisters it.
    ///
    /// The write loop runs on its own task. When it ends it wakes the read
    /// loop, and when the read loop ends the deregistration closes the queue,
    /// which ends the write loop. Returns why the connection ended.
    pub async fn run<S, K, E>(
        self,
        stream: S,
        sink: K,
        hub: HubHandle,
        options: &ConnectionOptions,
    ) -> ConnectionError
    where
        S: Stream<Item = Result<Frame, E>> + Unpin,
        E: Display,
        K: Sink<Frame> + Unpin + Send + 'static,
        K::Error: Display + Send,
    {
        let Self {
            id,
            username,
            queue,
        } = self;

        let (done_tx, done_rx) = oneshot::channel();
        let writer = tokio::spawn(writer::write_loop(
            queue,
            sink,
            options.heartbeat,
            options.max_batch,
            id,
            done_tx,
        ));

        let reason = reader::read_loop(
            stream,
            &hub,
            id,
            &username,
            options.heartbeat.read_timeout,
            done_rx,
        )
        .await;

        match &reason {
            ConnectionError::ReadTimeout(_) | ConnectionError::WriteTimeout(_) => {
                warn!(conn_id = %id, username = %username, reason = %reason, "Heartbeat lost");
            }
            _ => debug!(conn_id = %id, reason = %reason, "Read loop finished"),
        }

        if hub.deregister(id).await.is_err() {
            debug!(conn_id = %id, "Hub already stopped");
        }
        if let Err(e) = writer.await {
            warn!(conn_id = %id, error = %e, "Write loop task failed");
        }

        info!(conn_id = %id, username = %username, reason = %reason, "WebSocket connection closed");
        reason
    }
}
