//! Presence snapshots derived from hub membership.

pub mod snapshot;

pub use snapshot::PresenceSnapshot;
