//! Application state shared across handlers

use auth::{AuthService, CredentialStore, JwtService};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::repositories::{ElectionFundsRepository, PoliticalFundsRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
    pub users: Arc<dyn CredentialStore>,
    pub political_funds: PoliticalFundsRepository,
    pub election_funds: ElectionFundsRepository,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire the state around an already-built auth service
    ///
    /// The token verifier and credential store are shared with the service.
    pub fn new(db_pool: PgPool, auth_service: AuthService) -> Self {
        Self {
            jwt_service: auth_service.tokens().clone(),
            users: auth_service.store().clone(),
            political_funds: PoliticalFundsRepository::new(db_pool.clone()),
            election_funds: ElectionFundsRepository::new(db_pool.clone()),
            db_pool,
            auth_service,
            started_at: Utc::now(),
        }
    }
}
