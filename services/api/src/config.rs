//! Server configuration assembled from the environment at startup

use auth::AuthConfig;
use common::database::DatabaseConfig;
use std::env;
use thiserror::Error;

/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8080;

/// Variables the server refuses to start without
const REQUIRED_VARS: [&str; 3] = ["ENV", "PASSWORD_SALT", "JWT_SECRET"];

/// Startup configuration failures
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment name (`ENV`)
    pub env: String,
    /// Listening port
    pub port: u16,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// Every missing required variable is reported in a single error.
    ///
    /// # Environment Variables
    /// - `ENV`, `PASSWORD_SALT`, `JWT_SECRET`: required
    /// - `PORT`: listening port (default: 8080)
    /// - `PASSWORD_BCRYPT_COST` and the `DATABASE_*` variables, see
    ///   [`AuthConfig::from_env`] and [`DatabaseConfig::from_env`]
    pub fn from_env() -> Result<Self, AppConfigError> {
        let missing: Vec<&'static str> = REQUIRED_VARS
            .into_iter()
            .filter(|name| env::var(name).map(|v| v.is_empty()).unwrap_or(true))
            .collect();
        if !missing.is_empty() {
            return Err(AppConfigError::Missing(missing));
        }

        let env_name = env::var("ENV").map_err(|e| AppConfigError::Invalid(e.to_string()))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppConfigError::Invalid(format!("PORT '{}' is not a port", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        let auth = AuthConfig::from_env().map_err(|e| AppConfigError::Invalid(e.to_string()))?;
        let database =
            DatabaseConfig::from_env().map_err(|e| AppConfigError::Invalid(e.to_string()))?;

        Ok(Self {
            env: env_name,
            port,
            auth,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            env::remove_var("ENV");
            env::remove_var("PASSWORD_SALT");
            env::remove_var("JWT_SECRET");
            env::remove_var("PORT");
            env::remove_var("PASSWORD_BCRYPT_COST");
        }
    }

    #[test]
    #[serial]
    fn test_all_missing_variables_are_reported_together() {
        clear_env();
        unsafe {
            env::set_var("PASSWORD_SALT", "salt");
        }

        match AppConfig::from_env() {
            Err(AppConfigError::Missing(names)) => {
                assert_eq!(names, vec!["ENV", "JWT_SECRET"]);
            }
            other => panic!("expected missing variables, got {:?}", other),
        }

        clear_env();
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        unsafe {
            env::set_var("ENV", "development");
            env::set_var("PASSWORD_SALT", "salt");
            env::set_var("JWT_SECRET", "secret");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.env, "development");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.auth.jwt_secret, "secret");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port() {
        clear_env();
        unsafe {
            env::set_var("ENV", "production");
            env::set_var("PASSWORD_SALT", "salt");
            env::set_var("JWT_SECRET", "secret");
            env::set_var("PORT", "eighty");
        }

        assert!(matches!(
            AppConfig::from_env(),
            Err(AppConfigError::Invalid(_))
        ));

        unsafe {
            env::set_var("PORT", "3000");
        }
        assert_eq!(AppConfig::from_env().unwrap().port, 3000);

        clear_env();
    }
}
