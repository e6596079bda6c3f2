//! In-memory credential store

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::CredentialStore;
use crate::error::StoreError;
use crate::models::{ADMIN_ROLE_ID, DEFAULT_ROLE_ID, NewUser, Role, User, UserWithRole};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    roles: HashMap<i32, Role>,
}

/// Credential store kept in process memory
///
/// Enforces the same uniqueness rules as the `users` table and is seeded
/// with the same two roles.
#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    tables: Arc<RwLock<Tables>>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        let now = Utc::now();
        let roles = [
            (ADMIN_ROLE_ID, "admin", "Administrator"),
            (DEFAULT_ROLE_ID, "user", "Regular user"),
        ]
        .into_iter()
        .map(|(id, name, description)| {
            (
                id,
                Role {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                    created_at: now,
                },
            )
        })
        .collect();

        Self {
            tables: Arc::new(RwLock::new(Tables {
                users: Vec::new(),
                roles,
            })),
        }
    }

    /// Move an existing user to another role
    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> bool {
        let mut tables = self.tables.write().await;
        if !tables.roles.contains_key(&role_id) {
            return false;
        }
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.role_id = role_id;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Flip the `is_active` flag of an existing user
    pub async fn set_active(&self, user_id: i32, active: bool) -> bool {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

fn join_role(tables: &Tables, user: &User) -> Option<UserWithRole> {
    tables.roles.get(&user.role_id).map(|role| UserWithRole {
        user: user.clone(),
        role_name: role.name.clone(),
        role_description: role.description.clone(),
    })
}

#[async_trait]
impl CredentialStore for InMemoryUserStore {
    async fn create(&self, new_user: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if taken {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let user = User {
            id: tables.users.len() as i32 + 1,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            role_id: new_user.role_id,
            is_active: true,
            email_verified: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_with_role(&self, id: i32) -> Result<Option<UserWithRole>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id)
            .and_then(|u| join_role(&tables, u)))
    }

    async fn list_with_roles(&self) -> Result<Vec<UserWithRole>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .rev()
            .filter_map(|u| join_role(&tables, u))
            .collect())
    }
}
