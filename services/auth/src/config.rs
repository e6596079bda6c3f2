//! Secrets and cost parameters for password hashing and token signing

use thiserror::Error;

/// Work factor used for stored password hashes
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Cost bounds accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Raised when the authentication configuration is incomplete
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Authentication configuration, built once at startup and injected into
/// [`crate::password::PasswordHasher`] and [`crate::jwt::JwtService`]
#[derive(Clone)]
pub struct AuthConfig {
    /// Server-wide secret mixed into every password before hashing
    pub password_salt: String,
    /// Symmetric key for HMAC-signed session tokens
    pub jwt_secret: String,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(password_salt: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            password_salt: password_salt.into(),
            jwt_secret: jwt_secret.into(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Override the bcrypt cost factor
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PASSWORD_SALT`: secret salt for password hashing (required)
    /// - `JWT_SECRET`: HMAC signing secret (required)
    /// - `PASSWORD_BCRYPT_COST`: bcrypt cost factor, 4..=31 (default: 12)
    pub fn from_env() -> Result<Self, ConfigError> {
        let password_salt = required_var("PASSWORD_SALT")?;
        let jwt_secret = required_var("JWT_SECRET")?;

        let bcrypt_cost = match std::env::var("PASSWORD_BCRYPT_COST") {
            Ok(raw) => {
                let cost: u32 = raw.parse().map_err(|_| ConfigError::Invalid {
                    name: "PASSWORD_BCRYPT_COST",
                    reason: format!("'{}' is not a number", raw),
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                    return Err(ConfigError::Invalid {
                        name: "PASSWORD_BCRYPT_COST",
                        reason: format!(
                            "must be between {} and {}",
                            MIN_BCRYPT_COST, MAX_BCRYPT_COST
                        ),
                    });
                }
                cost
            }
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        Ok(Self {
            password_salt,
            jwt_secret,
            bcrypt_cost,
        })
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("password_salt", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("PASSWORD_SALT");
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("PASSWORD_BCRYPT_COST");
        }
    }

    #[test]
    #[serial]
    fn test_auth_config_from_env() {
        clear_env();
        unsafe {
            std::env::set_var("PASSWORD_SALT", "salt");
            std::env::set_var("JWT_SECRET", "secret");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.password_salt, "salt");
        assert_eq!(config.jwt_secret, "secret");
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_auth_config_requires_salt() {
        clear_env();
        unsafe {
            std::env::set_var("JWT_SECRET", "secret");
        }

        assert_eq!(
            AuthConfig::from_env().unwrap_err(),
            ConfigError::Missing("PASSWORD_SALT")
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_auth_config_treats_empty_secret_as_missing() {
        clear_env();
        unsafe {
            std::env::set_var("PASSWORD_SALT", "salt");
            std::env::set_var("JWT_SECRET", "");
        }

        assert_eq!(
            AuthConfig::from_env().unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_auth_config_rejects_out_of_range_cost() {
        clear_env();
        unsafe {
            std::env::set_var("PASSWORD_SALT", "salt");
            std::env::set_var("JWT_SECRET", "secret");
            std::env::set_var("PASSWORD_BCRYPT_COST", "2");
        }

        assert!(matches!(
            AuthConfig::from_env(),
            Err(ConfigError::Invalid {
                name: "PASSWORD_BCRYPT_COST",
                ..
            })
        ));

        clear_env();
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new("pepper", "hunter2");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("pepper"));
        assert!(!printed.contains("hunter2"));
    }
}
