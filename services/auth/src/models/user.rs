//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::{ADMIN_ROLE, DEFAULT_ROLE_ID};

/// User entity
///
/// `password_hash` never leaves the server: it is skipped on serialization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role_id: i32,
    pub is_active: bool,
    pub email_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User joined with its role
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct UserWithRole {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub user: User,
    pub role_name: String,
    pub role_description: String,
}

impl UserWithRole {
    pub fn is_admin(&self) -> bool {
        self.role_name == ADMIN_ROLE
    }
}

/// New user creation payload, with the password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i32,
}

impl NewUser {
    /// A new account with the non-privileged default role
    pub fn with_default_role(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            role_id: DEFAULT_ROLE_ID,
        }
    }
}

/// Minimal public view returned after signup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Identity attached to a request by the bearer-token middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            role_id: DEFAULT_ROLE_ID,
            is_active: true,
            email_verified: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role_id"], DEFAULT_ROLE_ID);
    }

    #[test]
    fn test_user_with_role_serializes_flat() {
        let with_role = UserWithRole {
            user: sample_user(),
            role_name: "user".to_string(),
            role_description: "Regular user".to_string(),
        };
        let json = serde_json::to_value(&with_role).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["role_name"], "user");
        assert!(json.get("password_hash").is_none());
        assert!(!with_role.is_admin());
    }
}
