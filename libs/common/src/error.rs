//! Error types shared by the Polimoney services

use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Errors raised while setting up or talking to PostgreSQL
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not establish a connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query failed while executing
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Applying the embedded migrations failed
    #[error("Database migration error: {0}")]
    Migration(#[source] MigrateError),

    /// The configuration could not be turned into connect options
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
