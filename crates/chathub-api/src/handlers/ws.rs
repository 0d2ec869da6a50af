//! WebSocket upgrade handler.

use std::collections::HashMap;

use axum::extract::ws::WebSocket;
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use chathub_auth::Identity;

use crate::error::ApiError;
use crate::state::AppState;
use crate::transport::split_frames;

/// GET /app/chat/ws?token={jwt}: WebSocket upgrade
///
/// The token comes from the query string, or from the session cookie when
/// the query token is missing or invalid. Unauthenticated upgrade requests
/// get a 401 and are never upgraded.
///
/// The 401 applies to well-formed upgrade requests only. A plain GET is
/// rejected by the `WebSocketUpgrade` extractor (400 or 426) before the
/// token is looked at.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    jar: CookieJar,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let auth = &state.config.auth;
    let query_token = params.get(&auth.query_param).map(String::as_str);
    let cookie_token = jar.get(&auth.cookie_name).map(|c| c.value().to_owned());

    let identity = state
        .authenticator
        .authenticate(query_token, cookie_token.as_deref())
        .await
        .inspect_err(|e| warn!(error = %e, "Rejected WebSocket upgrade"))?;

    debug!(username = %identity.username, "Upgrading WebSocket connection");

    let max_message_bytes = state.config.realtime.max_message_bytes;
    Ok(ws
        .max_message_size(max_message_bytes)
        .on_upgrade(move |socket| handle_ws_connection(state, identity, socket)))
}

/// Serves an established WebSocket connection until it ends.
async fn handle_ws_connection(state: AppState, identity: Identity, socket: WebSocket) {
    let (stream, sink) = split_frames(socket);
    state.realtime.serve(identity, stream, sink).await;
}
