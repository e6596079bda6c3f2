//! Credential store boundary
//!
//! The authentication service only talks to [`CredentialStore`]; the
//! PostgreSQL [`UserRepository`] backs it in production and
//! [`InMemoryUserStore`] in tests and local experiments.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewUser, User, UserWithRole};

pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::UserRepository;

/// Persistence capability required by the authentication flow
///
/// `create` is atomic and reports uniqueness violations as
/// [`StoreError::Conflict`]. Lookups return `Ok(None)` when nothing matches.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create(&self, new_user: &NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// Load a user joined with its role
    async fn find_with_role(&self, id: i32) -> Result<Option<UserWithRole>, StoreError>;

    /// All users with their roles, newest first
    async fn list_with_roles(&self) -> Result<Vec<UserWithRole>, StoreError>;
}
