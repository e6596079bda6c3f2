//! Common library for the Polimoney services
//!
//! Shared PostgreSQL plumbing: pool configuration, health probing,
//! migrations and the associated error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     health_check(&pool).await?;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
