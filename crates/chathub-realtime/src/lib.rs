//! # chathub-realtime
//!
//! Real-time fan-out hub for ChatHub. Provides:
//!
//! - A single control loop owning the registry of live connections
//! - Per-connection read and write loops with ping/pong liveness
//! - Presence snapshots published on every membership change
//! - Bounded, non-blocking fan-out that evicts slow receivers
//!
//! The loops speak the transport-neutral [`connection::Frame`], so any
//! WebSocket implementation can be adapted at the edge.

pub mod connection;
pub mod error;
pub mod hub;
pub mod message;
pub mod metrics;
pub mod presence;
pub mod server;

pub use connection::{Connection, Frame};
pub use error::{ConnectionError, HubUnavailable};
pub use hub::{Hub, HubHandle};
pub use server::RealtimeEngine;
