//! The identity verification contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chathub_core::error::AppError;

/// A verified participant identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable account identifier from the token subject.
    pub user_id: String,
    /// Display name shown to other participants.
    pub username: String,
}

/// Turns an opaque credential token into a verified identity.
///
/// Implementations must reject expired and signature-invalid tokens with an
/// authentication error.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + std::fmt::Debug {
    /// Verifies `token` and returns the identity it was issued for.
    async fn verify(&self, token: &str) -> Result<Identity, AppError>;
}
