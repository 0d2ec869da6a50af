//! Hub control loop: sole owner and mutator of the connection set.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::connection::handle::{ConnectionHandle, ConnectionId, Delivery};
use crate::message::serializer::serialize_outbound;
use crate::message::types::{OutboundMessage, Payload};
use crate::metrics::EngineMetrics;
use crate::presence::snapshot::PresenceSnapshot;

use super::command::HubCommand;
use super::handle::HubHandle;

/// Result of offering one payload to every member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FanOut {
    delivered: u64,
    removed: usize,
}

/// The registry of live connections and the loop that mutates it.
///
/// Commands are applied strictly in arrival order by a single task, so
/// membership changes never race with iteration over the members.
#[derive(Debug)]
pub struct Hub {
    /// Registered connections in registration order.
    members: Vec<ConnectionHandle>,
    /// Ordered inbound events.
    commands: mpsc::Receiver<HubCommand>,
    /// Shared counters.
    metrics: Arc<EngineMetrics>,
}

impl Hub {
    /// Creates a hub and the handle used to reach it.
    pub fn new(buffer: usize, metrics: Arc<EngineMetrics>) -> (Self, HubHandle) {
        let (tx, commands) = mpsc::channel(buffer);
        let hub = Self {
            members: Vec::new(),
            commands,
            metrics,
        };
        (hub, HubHandle::new(tx))
    }

    /// Creates a hub and runs its control loop on a new task.
    pub fn spawn(buffer: usize, metrics: Arc<EngineMetrics>) -> HubHandle {
        let (hub, handle) = Self::new(buffer, metrics);
        tokio::spawn(hub.run());
        handle
    }

    /// Runs the control loop until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        info!("Hub control loop started");

        while let Some(command) = self.commands.recv().await {
            if self.apply(command).is_break() {
                break;
            }
        }

        self.close_all();
        info!("Hub control loop stopped");
    }

    fn apply(&mut self, command: HubCommand) -> ControlFlow<()> {
        match command {
            HubCommand::Register(handle) => self.register(handle),
            HubCommand::Deregister(id) => {
                self.deregister(&id);
            }
            HubCommand::Broadcast(message) => self.broadcast(&message),
            HubCommand::Members(reply) => {
                let _ = reply.send(self.snapshot());
            }
            HubCommand::Shutdown(reply) => {
                self.close_all();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn register(&mut self, handle: ConnectionHandle) {
        info!(
            conn_id = %handle.id,
            username = %handle.username,
            members = self.members.len() + 1,
            "Connection registered"
        );
        self.members.push(handle);
        self.metrics.record_register();
        self.publish_presence();
    }

    /// Removes a connection. Its handle is dropped after the presence update,
    /// which closes the outbound queue.
    fn deregister(&mut self, id: &ConnectionId) -> bool {
        let Some(position) = self.members.iter().position(|m| m.id == *id) else {
            debug!(conn_id = %id, "Deregister for unknown connection ignored");
            return false;
        };

        let handle = self.members.remove(position);
        self.metrics.record_deregister();
        info!(
            conn_id = %handle.id,
            username = %handle.username,
            members = self.members.len(),
            "Connection deregistered"
        );

        self.publish_presence();
        drop(handle);
        true
    }

    fn broadcast(&mut self, message: &OutboundMessage) {
        let Some(payload) = encode(message) else {
            return;
        };

        let outcome = self.fan_out(&payload);
        self.metrics.record_broadcast(outcome.delivered);

        if outcome.removed > 0 {
            self.publish_presence();
        }
    }

    /// Sends the current snapshot to everyone. Evictions during the send
    /// change membership, so a corrected snapshot follows until one goes out
    /// with no evictions.
    fn publish_presence(&mut self) {
        loop {
            let snapshot = self.snapshot();
            let Some(payload) = encode(&snapshot.to_message()) else {
                return;
            };

            let outcome = self.fan_out(&payload);
            self.metrics.record_presence(outcome.delivered);
            debug!(members = snapshot.len(), "Presence published");

            if outcome.removed == 0 {
                return;
            }
        }
    }

    /// Offers `payload` to every member without waiting. A member whose queue
    /// is full or closed is removed on the spot.
    fn fan_out(&mut self, payload: &Payload) -> FanOut {
        let mut outcome = FanOut::default();
        let mut evicted = 0u64;

        self.members.retain(|member| match member.try_deliver(payload) {
            Delivery::Queued => {
                outcome.delivered += 1;
                true
            }
            Delivery::Full => {
                warn!(
                    conn_id = %member.id,
                    username = %member.username,
                    "Outbound queue full, evicting slow receiver"
                );
                evicted += 1;
                outcome.removed += 1;
                false
            }
            Delivery::Closed => {
                debug!(
                    conn_id = %member.id,
                    username = %member.username,
                    "Write loop gone, dropping connection"
                );
                outcome.removed += 1;
                false
            }
        });

        for _ in 0..outcome.removed {
            self.metrics.record_deregister();
        }
        for _ in 0..evicted {
            self.metrics.record_eviction();
        }

        outcome
    }

    fn snapshot(&self) -> PresenceSnapshot {
        PresenceSnapshot::from_names(self.members.iter().map(|m| m.username.as_str()))
    }

    fn close_all(&mut self) {
        if self.members.is_empty() {
            return;
        }
        info!(count = self.members.len(), "Closing all connections");
        for _ in self.members.drain(..) {
            self.metrics.record_deregister();
        }
    }
}

fn encode(message: &OutboundMessage) -> Option<Payload> {
    match serialize_outbound(message) {
        Ok(payload) => Some(payload),
        Err(e) => {
            error!(error = %e, "Failed to serialize outbound message");
            None
        }
    }
}
