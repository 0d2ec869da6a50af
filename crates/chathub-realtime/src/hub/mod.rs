//! The hub: single authoritative registry of live connections.
//!
//! All membership changes and fan-out run inside one control loop
//! ([`Hub::run`]); every other task talks to it through a [`HubHandle`].

pub mod command;
pub mod handle;
pub mod registry;

pub use command::HubCommand;
pub use handle::HubHandle;
pub use registry::Hub;
