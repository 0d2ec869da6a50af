//! Data transfer objects for response bodies.

pub mod response;
