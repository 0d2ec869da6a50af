//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chathub_auth::{IdentityVerifier, JwtDecoder};
use chathub_core::config::AppConfig;
use chathub_realtime::RealtimeEngine;
use chathub_realtime::connection::authenticator::WsAuthenticator;

/// Shared application state passed to all Axum handlers via `State`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token verification for the upgrade and session endpoints.
    pub authenticator: WsAuthenticator,
    /// Real-time engine.
    pub realtime: Arc<RealtimeEngine>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}

impl AppState {
    /// Builds state around an explicit verifier and spawns the hub.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: AppConfig, verifier: Arc<dyn IdentityVerifier>) -> Self {
        let realtime = Arc::new(RealtimeEngine::new(&config.realtime));
        Self {
            config: Arc::new(config),
            authenticator: WsAuthenticator::new(verifier),
            realtime,
        }
    }

    /// Builds state that verifies HS256 tokens signed with `auth.jwt_secret`.
    pub fn with_jwt(config: AppConfig) -> Self {
        let verifier = Arc::new(JwtDecoder::new(&config.auth));
        Self::new(config, verifier)
    }
}
