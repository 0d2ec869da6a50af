//! WebSocket authentication: resolves the credential token from the query
//! string or the session cookie before the upgrade is accepted.

use std::sync::Arc;

use tracing::debug;

use chathub_auth::{Identity, IdentityVerifier};
use chathub_core::error::AppError;

/// Authenticates upgrade requests against an [`IdentityVerifier`].
#[derive(Clone)]
pub struct WsAuthenticator {
    /// Verifier the tokens are checked with.
    verifier: Arc<dyn IdentityVerifier>,
}

impl std::fmt::Debug for WsAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsAuthenticator").finish()
    }
}

impl WsAuthenticator {
    /// Creates a new WebSocket authenticator.
    pub fn new(verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { verifier }
    }

    /// Verifies the query-string token first, then the cookie token.
    ///
    /// A query token that fails verification does not end the attempt; the
    /// cookie is still tried. The error from the last token tried is returned
    /// when neither verifies.
    pub async fn authenticate(
        &self,
        query_token: Option<&str>,
        cookie_token: Option<&str>,
    ) -> Result<Identity, AppError> {
        let mut last_error = None;

        for (source, token) in [("query", query_token), ("cookie", cookie_token)] {
            let Some(token) = token.filter(|t| !t.is_empty()) else {
                continue;
            };
            match self.verifier.verify(token).await {
                Ok(identity) => return Ok(identity),
                Err(e) => {
                    debug!(source, error = %e, "Credential token rejected");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::authentication("Missing credential token")))
    }
}
