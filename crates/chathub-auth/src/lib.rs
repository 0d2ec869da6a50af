//! # chathub-auth
//!
//! Identity verification for the ChatHub upgrade endpoint.
//!
//! ## Modules
//!
//! - `verifier`: the `IdentityVerifier` contract consumed by the acceptor
//! - `jwt`: HS256 credential tokens (claims, verification and issuance)

pub mod jwt;
pub mod verifier;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use verifier::{Identity, IdentityVerifier};
