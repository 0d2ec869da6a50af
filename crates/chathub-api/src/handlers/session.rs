//! Session lookup and logout for the browser client.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;

use crate::dto::response::{MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Path the credential cookie is scoped to.
pub const COOKIE_PATH: &str = "/app/chat/";

const NO_STORE: &str = "no-store, no-cache, must-revalidate";

/// GET /app/chat/api/session: who the session cookie belongs to.
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = jar
        .get(&state.config.auth.cookie_name)
        .map(|c| c.value().to_owned());

    let result = state
        .authenticator
        .authenticate(None, token.as_deref())
        .await
        .map(|identity| {
            Json(SessionResponse {
                username: identity.username,
            })
        })
        .map_err(ApiError::from);

    ([(header::CACHE_CONTROL, NO_STORE)], result)
}

/// POST /app/chat/api/logout: clears the credential cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let removal = Cookie::build((state.config.auth.cookie_name.clone(), ""))
        .path(COOKIE_PATH)
        .http_only(true);

    (
        jar.remove(removal),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
