//! JWT service for session token issuance and verification
//!
//! Tokens are HMAC-signed with the configured secret and carry only the user
//! id and an absolute expiry. Verification is stateless: there is no
//! revocation list, so a token stays valid until it expires.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::TokenError;

/// Validity window of a session token (24 hours)
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub user_id: i32,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        // Only the HMAC family is accepted; anything else in the header is
        // rejected before the signature is checked.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for a user, valid for [`TOKEN_TTL_SECS`]
    pub fn issue(&self, user_id: i32) -> Result<String, TokenError> {
        let now = unix_now();
        let claims = Claims {
            user_id,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        self.sign(&claims)
    }

    /// Verify a token and return the embedded user id
    pub fn verify(&self, token: &str) -> Result<i32, TokenError> {
        self.decode_claims(token).map(|claims| claims.user_id)
    }

    /// Verify a token and return its full claim set
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    debug!("Token rejected: {}", e);
                    TokenError::Invalid
                }
            })
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(TokenError::Issue)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
