//! Presence snapshot: the list of display names currently connected.

use serde::{Deserialize, Serialize};

use crate::message::types::OutboundMessage;

/// Display names of every registered connection at one point in time.
///
/// Duplicate names are kept: two logins with the same name are two
/// participants. Never stored; recomputed on each membership change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// Display names in registration order.
    pub users: Vec<String>,
}

impl PresenceSnapshot {
    /// Builds a snapshot from member display names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            users: names.into_iter().map(str::to_string).collect(),
        }
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Wire form of this snapshot.
    pub fn to_message(&self) -> OutboundMessage {
        OutboundMessage::Users {
            users: self.users.clone(),
        }
    }
}
