//! JWT claims carried by a credential token.

use serde::{Deserialize, Serialize};

use crate::verifier::Identity;

/// JWT claims payload embedded in every credential token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    #[serde(alias = "user_id")]
    pub sub: String,
    /// Display name of the user.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}
