//! Top-level real-time engine that ties together the hub and its connections.

use std::fmt::Display;
use std::sync::Arc;

use futures::{Sink, Stream};
use tracing::{info, warn};

use chathub_auth::Identity;
use chathub_core::config::RealtimeConfig;

use crate::connection::{Connection, ConnectionOptions, Frame};
use crate::error::{ConnectionError, HubUnavailable};
use crate::hub::{Hub, HubHandle};
use crate::metrics::{EngineMetrics, MetricsSnapshot};
use crate::presence::PresenceSnapshot;

/// Central real-time engine: owns the hub control loop and serves
/// authenticated connections against it.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Handle to the hub control loop.
    hub: HubHandle,
    /// Metrics collector.
    metrics: Arc<EngineMetrics>,
    /// Options applied to every connection.
    options: ConnectionOptions,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine")
            .field("options", &self.options)
            .finish()
    }
}

impl RealtimeEngine {
    /// Creates the engine and spawns the hub control loop.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &RealtimeConfig) -> Self {
        let metrics = Arc::new(EngineMetrics::new());
        let hub = Hub::spawn(config.hub_buffer_size, metrics.clone());

        info!(
            queue_capacity = config.outbound_buffer_size,
            ping_interval_seconds = config.ping_interval_seconds,
            read_timeout_seconds = config.read_timeout_seconds,
            "Real-time engine initialized"
        );

        Self {
            hub,
            metrics,
            options: ConnectionOptions::from(config),
        }
    }

    /// Serves one upgraded connection for `identity` until it ends.
    pub async fn serve<S, K, E>(&self, identity: Identity, stream: S, sink: K) -> ConnectionError
    where
        S: Stream<Item = Result<Frame, E>> + Unpin,
        E: Display,
        K: Sink<Frame> + Unpin + Send + 'static,
        K::Error: Display + Send,
    {
        let connection = match Connection::open(identity.username, &self.hub, &self.options).await
        {
            Ok(connection) => connection,
            Err(e) => {
                warn!(user_id = %identity.user_id, "Rejecting connection, hub is not running");
                return e.into();
            }
        };

        info!(
            conn_id = %connection.id,
            user_id = %identity.user_id,
            username = %connection.username,
            "WebSocket connection established"
        );

        connection
            .run(stream, sink, self.hub.clone(), &self.options)
            .await
    }

    /// Current membership in registration order.
    pub async fn members(&self) -> Result<PresenceSnapshot, HubUnavailable> {
        self.hub.members().await
    }

    /// Current metric counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Deregisters every connection and stops the control loop.
    pub async fn shutdown(&self) {
        info!("Shutting down real-time engine");

        if self.hub.shutdown().await.is_err() {
            info!("Hub control loop already stopped");
            return;
        }

        info!("Real-time engine shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::channel::mpsc as fmpsc;
    use futures::StreamExt;

    fn identity(name: &str) -> Identity {
        Identity {
            user_id: format!("id-{name}"),
            username: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_serve_registers_and_counts() {
        let engine = RealtimeEngine::new(&RealtimeConfig::default());
        let (inbound_tx, inbound_rx) = fmpsc::unbounded::<Result<Frame, String>>();
        let (outbound_tx, mut outbound_rx) = fmpsc::unbounded::<Frame>();

        let served = engine.clone();
        let task = tokio::spawn(async move {
            served
                .serve(identity("alice"), inbound_rx, outbound_tx)
                .await
        });

        assert_eq!(
            outbound_rx.next().await,
            Some(Frame::Text(r#"{"type":"users","users":["alice"]}"#.into()))
        );
        assert_eq!(engine.members().await.unwrap().users, vec!["alice".to_string()]);

        drop(inbound_tx);
        assert_eq!(task.await.unwrap(), ConnectionError::Closed);

        let metrics = engine.metrics();
        assert_eq!(metrics.connections_total, 1);
        assert_eq!(metrics.connections_active, 0);
        assert_eq!(metrics.presence_published, 2);
    }

    #[tokio::test]
    async fn test_serve_after_shutdown_fails_fast() {
        let engine = RealtimeEngine::new(&RealtimeConfig::default());
        engine.shutdown().await;
        // Second shutdown is harmless.
        engine.shutdown().await;

        let (_inbound_tx, inbound_rx) = fmpsc::unbounded::<Result<Frame, String>>();
        let (outbound_tx, _outbound_rx) = fmpsc::unbounded::<Frame>();
        let reason = engine.serve(identity("late"), inbound_rx, outbound_tx).await;

        assert_eq!(reason, ConnectionError::HubUnavailable);
        assert!(engine.members().await.is_err());
    }
}
