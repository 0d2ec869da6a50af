//! Cloneable sender side of the hub control loop.

use tokio::sync::{mpsc, oneshot};

use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::error::HubUnavailable;
use crate::message::types::OutboundMessage;
use crate::presence::snapshot::PresenceSnapshot;

use super::command::HubCommand;

/// Submits events to the hub control loop.
///
/// Sending waits only for room on the hub's own channel, never on any
/// connection's queue.
#[derive(Debug, Clone)]
pub struct HubHandle {
    tx: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    pub(crate) fn new(tx: mpsc::Sender<HubCommand>) -> Self {
        Self { tx }
    }

    /// Hands a connection to the hub.
    pub async fn register(&self, handle: ConnectionHandle) -> Result<(), HubUnavailable> {
        self.send(HubCommand::Register(handle)).await
    }

    /// Asks the hub to drop a connection.
    pub async fn deregister(&self, id: ConnectionId) -> Result<(), HubUnavailable> {
        self.send(HubCommand::Deregister(id)).await
    }

    /// Relays a message to every registered connection.
    pub async fn broadcast(&self, message: OutboundMessage) -> Result<(), HubUnavailable> {
        self.send(HubCommand::Broadcast(message)).await
    }

    /// Returns the current membership as seen by the control loop.
    pub async fn members(&self) -> Result<PresenceSnapshot, HubUnavailable> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Members(reply)).await?;
        rx.await.map_err(|_| HubUnavailable)
    }

    /// Stops the control loop after closing every connection's queue.
    pub async fn shutdown(&self) -> Result<(), HubUnavailable> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Shutdown(reply)).await?;
        rx.await.map_err(|_| HubUnavailable)
    }

    async fn send(&self, command: HubCommand) -> Result<(), HubUnavailable> {
        self.tx.send(command).await.map_err(|_| HubUnavailable)
    }
}
