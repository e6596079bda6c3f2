//! Authentication core for the Polimoney backend
//!
//! Password hashing, session tokens, the credential store abstraction and
//! the signup/login flow built on top of them. The HTTP binary in
//! `services/api` wires these into routes.

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod service;
pub mod validation;

pub use config::{AuthConfig, ConfigError};
pub use error::{AuthError, StoreError, TokenError};
pub use jwt::JwtService;
pub use middleware::{AuthRejection, auth_middleware};
pub use password::PasswordHasher;
pub use repositories::{CredentialStore, InMemoryUserStore, UserRepository};
pub use service::AuthService;
