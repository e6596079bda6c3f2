//! Authentication models

pub mod role;
pub mod user;

// Re-export for convenience
pub use role::{ADMIN_ROLE, ADMIN_ROLE_ID, DEFAULT_ROLE_ID, Role};
pub use user::{AuthUser, NewUser, PublicUser, User, UserWithRole};
