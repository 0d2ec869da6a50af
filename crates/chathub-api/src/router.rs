//! Route definitions for the ChatHub HTTP API.
//!
//! The chat client lives under `/app/chat`; operational endpoints under `/api`.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route bound to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(chat_routes())
        .nest("/api", health_routes())
        .with_state(state)
}

/// WebSocket upgrade, session lookup, logout
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/app/chat/ws", get(handlers::ws::ws_handler))
        .route("/app/chat/api/session", get(handlers::session::session))
        .route("/app/chat/api/logout", post(handlers::session::logout))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
