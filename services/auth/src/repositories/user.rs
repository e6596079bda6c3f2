//! PostgreSQL-backed credential store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::CredentialStore;
use crate::error::StoreError;
use crate::models::{NewUser, User, UserWithRole};

const USER_COLUMNS: &str = "id, username, email, password_hash, role_id, is_active, \
     email_verified, last_login, created_at, updated_at";

const USER_WITH_ROLE_SELECT: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.role_id, u.is_active,
           u.email_verified, u.last_login, u.created_at, u.updated_at,
           r.name AS role_name, r.description AS role_description
    FROM users u
    JOIN roles r ON u.role_id = r.id
"#;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, StoreError> {
        info!("Creating new user: {}", new_user.username);

        let query = format!(
            r#"
            INSERT INTO users (username, email, password_hash, role_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(new_user.role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
                other => StoreError::Database(other),
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_with_role(&self, id: i32) -> Result<Option<UserWithRole>, StoreError> {
        let query = format!("{USER_WITH_ROLE_SELECT} WHERE u.id = $1");

        let user = sqlx::query_as::<_, UserWithRole>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list_with_roles(&self) -> Result<Vec<UserWithRole>, StoreError> {
        let query = format!("{USER_WITH_ROLE_SELECT} ORDER BY u.created_at DESC, u.id DESC");

        let users = sqlx::query_as::<_, UserWithRole>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}
