//! Role model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Name of the privileged role
pub const ADMIN_ROLE: &str = "admin";

/// Seeded id of the `admin` role
pub const ADMIN_ROLE_ID: i32 = 1;

/// Seeded id of the non-privileged `user` role assigned at signup
pub const DEFAULT_ROLE_ID: i32 = 2;

/// Role entity
///
/// Roles are seeded by migration; nothing creates them at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
