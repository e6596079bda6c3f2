//! Error types for the authentication core

use thiserror::Error;

/// Token verification and issuance failures
///
/// Expiry is kept apart from every other verification failure; clients are
/// expected to log in again when they see it.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("failed to issue token: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),
}

/// Credential store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint (username or email) rejected the insert
    #[error("user already exists")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced to callers of [`crate::service::AuthService`]
///
/// Messages are deliberately generic; the underlying cause is only logged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("signup failed")]
    SignupFailed,

    #[error("invalid email or password")]
    InvalidCredentials,
}
