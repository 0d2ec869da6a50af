//! Credential token configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Credential token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Lifetime of tokens minted by the CLI, in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Clock-skew leeway applied to expiry checks, in seconds.
    #[serde(default)]
    pub leeway_seconds: u64,
    /// Name of the cookie carrying the credential token.
    #[serde(default = "default_token_name")]
    pub cookie_name: String,
    /// Name of the query parameter carrying the credential token.
    #[serde(default = "default_token_name")]
    pub query_param: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            leeway_seconds: 0,
            cookie_name: default_token_name(),
            query_param: default_token_name(),
        }
    }
}

impl AuthConfig {
    /// Rejects an empty signing secret.
    pub fn validate(&self) -> AppResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        Ok(())
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    24
}

fn default_token_name() -> String {
    "token".to_string()
}
