//! # chathub-api
//!
//! HTTP layer for ChatHub built on Axum.
//!
//! Provides the WebSocket upgrade endpoint (identity verified before the
//! upgrade), session lookup and logout, health endpoints, CORS, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod transport;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
