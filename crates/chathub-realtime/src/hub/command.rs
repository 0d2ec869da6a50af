//! Events accepted by the hub control loop.

use tokio::sync::oneshot;

use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::message::types::OutboundMessage;
use crate::presence::snapshot::PresenceSnapshot;

/// One event on the hub's ordered inbound channel.
#[derive(Debug)]
pub enum HubCommand {
    /// Add a connection and publish presence.
    Register(ConnectionHandle),
    /// Remove a connection if present and publish presence. Idempotent.
    Deregister(ConnectionId),
    /// Fan a message out to every registered connection.
    Broadcast(OutboundMessage),
    /// Report current membership.
    Members(oneshot::Sender<PresenceSnapshot>),
    /// Drop every connection and stop the loop.
    Shutdown(oneshot::Sender<()>),
}
