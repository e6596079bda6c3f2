//! Signup and login orchestration

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::{AuthError, StoreError};
use crate::jwt::JwtService;
use crate::models::{NewUser, User};
use crate::password::PasswordHasher;
use crate::repositories::CredentialStore;

/// Authentication service
///
/// Holds no mutable state of its own, so clones can be handed to every
/// request.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: JwtService,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: JwtService,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Register a new account with the default role
    ///
    /// Persistence failures, including duplicate usernames or emails, all
    /// come back as [`AuthError::SignupFailed`].
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                error!("Password hashing task failed: {}", e);
                AuthError::SignupFailed
            })?
            .map_err(|e| {
                error!("Failed to hash password: {}", e);
                AuthError::SignupFailed
            })?;

        let new_user =
            NewUser::with_default_role(username.to_owned(), email.to_owned(), password_hash);

        match self.store.create(&new_user).await {
            Ok(user) => {
                info!("Created user {} ({})", user.id, user.username);
                Ok(user)
            }
            Err(StoreError::Conflict) => {
                warn!(
                    "Signup rejected: username '{}' or email '{}' already registered",
                    username, email
                );
                Err(AuthError::SignupFailed)
            }
            Err(e) => {
                error!("Failed to create user '{}': {}", username, e);
                Err(AuthError::SignupFailed)
            }
        }
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown email, wrong password, inactive account and internal failures
    /// are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        match self.authenticate(email, password).await {
            Ok(user) => {
                let token = self.tokens.issue(user.id).map_err(|e| {
                    error!("Failed to issue token for user {}: {}", user.id, e);
                    AuthError::InvalidCredentials
                })?;
                info!("User {} logged in", user.id);
                Ok((user, token))
            }
            Err(reason) => {
                warn!("Login failed for {}: {}", email, reason);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Resolve and check a user; the error string is for server logs only
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, String> {
        let user = self
            .store
            .find_by_email(email)
            .await
            .map_err(|e| format!("user lookup failed: {}", e))?
            .ok_or_else(|| "no such user".to_string())?;

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| format!("password check task failed: {}", e))?;

        if !matches {
            return Err("password mismatch".to_string());
        }
        if !user.is_active {
            return Err("account is inactive".to_string());
        }

        Ok(user)
    }

    /// Access to the token verifier shared with the HTTP middleware
    pub fn tokens(&self) -> &JwtService {
        &self.tokens
    }

    /// Access to the credential store
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, MIN_BCRYPT_COST};
    use crate::models::{DEFAULT_ROLE_ID, UserWithRole};
    use crate::repositories::InMemoryUserStore;
    use async_trait::async_trait;
    use tokio_test::{assert_err, assert_ok};

    fn config() -> AuthConfig {
        AuthConfig::new("test-salt", "test-secret").with_bcrypt_cost(MIN_BCRYPT_COST)
    }

    fn service_with(store: Arc<dyn CredentialStore>) -> AuthService {
        let config = config();
        AuthService::new(store, PasswordHasher::new(&config), JwtService::new(&config))
    }

    fn service() -> (AuthService, InMemoryUserStore) {
        let store = InMemoryUserStore::new();
        (service_with(Arc::new(store.clone())), store)
    }

    /// Store whose every call fails like a broken database connection
    struct FailingStore;

    #[async_trait]
    impl CredentialStore for FailingStore {
        async fn create(&self, _: &NewUser) -> Result<User, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_email(&self, _: &str) -> Result<Option<User>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_id(&self, _: i32) -> Result<Option<User>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn find_with_role(&self, _: i32) -> Result<Option<UserWithRole>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn list_with_roles(&self) -> Result<Vec<UserWithRole>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_signup_then_login_scenario() {
        let (auth, _) = service();

        let alice = assert_ok!(auth.signup("alice", "alice@example.com", "pw123").await);
        assert!(alice.id > 0);
        assert_eq!(alice.role_id, DEFAULT_ROLE_ID);
        assert_ne!(alice.password_hash, "pw123");
        assert!(!alice.password_hash.is_empty());

        let (user, token) = assert_ok!(auth.login("alice@example.com", "pw123").await);
        assert_eq!(user.id, alice.id);
        assert_eq!(auth.tokens().verify(&token).unwrap(), alice.id);

        let wrong_password = assert_err!(auth.login("alice@example.com", "wrongpw").await);
        let unknown_user = assert_err!(auth.login("bob@example.com", "x").await);
        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_user, AuthError::InvalidCredentials);
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_duplicate_signup_fails_generically() {
        let (auth, _) = service();
        auth.signup("alice", "alice@example.com", "pw123")
            .await
            .unwrap();

        let same_email = auth.signup("alice2", "alice@example.com", "pw").await;
        let same_name = auth.signup("alice", "alice2@example.com", "pw").await;

        assert_eq!(same_email.unwrap_err(), AuthError::SignupFailed);
        assert_eq!(same_name.unwrap_err(), AuthError::SignupFailed);
    }

    #[tokio::test]
    async fn test_store_failures_are_hidden() {
        let auth = service_with(Arc::new(FailingStore));

        assert_eq!(
            auth.signup("alice", "alice@example.com", "pw").await.unwrap_err(),
            AuthError::SignupFailed
        );
        assert_eq!(
            auth.login("alice@example.com", "pw").await.unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_inactive_account_cannot_log_in() {
        let (auth, store) = service();
        let alice = auth
            .signup("alice", "alice@example.com", "pw123")
            .await
            .unwrap();
        assert!(store.set_active(alice.id, false).await);

        assert_eq!(
            auth.login("alice@example.com", "pw123").await.unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_repeated_failures_never_lock_out_the_owner() {
        let (auth, _) = service();
        let alice = auth
            .signup("alice", "alice@example.com", "pw123")
            .await
            .unwrap();

        for _ in 0..10 {
            let wrong_password = assert_err!(auth.login("alice@example.com", "guess").await);
            let unknown_user = assert_err!(auth.login("ghost@example.com", "guess").await);
            assert_eq!(wrong_password, AuthError::InvalidCredentials);
            assert_eq!(unknown_user, AuthError::InvalidCredentials);
        }

        let (user, _) = assert_ok!(auth.login("alice@example.com", "pw123").await);
        assert_eq!(user.id, alice.id);
    }
}
