//! The hub's view of a single connection.

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::message::types::Payload;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// Outcome of a non-blocking enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The payload is queued.
    Queued,
    /// The queue is at capacity; the receiver is not keeping up.
    Full,
    /// The write loop is gone.
    Closed,
}

/// A registered connection as held by the hub.
///
/// Owns the only sender of the connection's outbound queue, so dropping the
/// handle closes the queue and lets the write loop finish.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Display name, fixed at upgrade time
    pub username: String,
    /// Sender side of the outbound queue
    sender: mpsc::Sender<Payload>,
}

impl ConnectionHandle {
    /// Creates a handle plus the receiving end of its bounded outbound queue.
    pub fn new(username: impl Into<String>, capacity: usize) -> (Self, mpsc::Receiver<Payload>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let handle = Self {
            id: Uuid::new_v4(),
            username: username.into(),
            sender,
        };
        (handle, receiver)
    }

    /// Enqueues a payload without waiting.
    pub fn try_deliver(&self, payload: &Payload) -> Delivery {
        match self.sender.try_send(payload.clone()) {
            Ok(()) => Delivery::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => Delivery::Full,
            Err(mpsc::error::TrySendError::Closed(_)) => Delivery::Closed,
        }
    }
}
