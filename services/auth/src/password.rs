//! Password hashing and verification
//!
//! Passwords are salted with the server-wide secret, digested with SHA-256
//! and hex-encoded before bcrypt sees them. bcrypt only reads the first 72
//! bytes of its input; the fixed 64-character digest keeps every byte of
//! long passwords significant.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::error;

use crate::config::AuthConfig;

/// Salted SHA-256 + bcrypt password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    salt: Arc<str>,
    cost: u32,
}

impl PasswordHasher {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            salt: Arc::from(config.password_salt.as_str()),
            cost: config.bcrypt_cost,
        }
    }

    /// Hash a password for storage
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(self.prehash(password), self.cost)
    }

    /// Check a password against a stored hash
    ///
    /// A malformed stored hash is logged and reported as a mismatch.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match bcrypt::verify(self.prehash(password), stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                error!("Stored password hash could not be checked: {}", e);
                false
            }
        }
    }

    fn prehash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }
}
