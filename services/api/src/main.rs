use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod repositories;
mod routes;
mod state;
mod validation;

use auth::{AuthService, JwtService, PasswordHasher, UserRepository};
use common::database::{health_check, init_pool, run_migrations};

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!("Starting API service in {} environment", config.env);

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;
    health_check(&pool)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await?;

    let auth_service = AuthService::new(
        Arc::new(UserRepository::new(pool.clone())),
        PasswordHasher::new(&config.auth),
        JwtService::new(&config.auth),
    );

    // Start the web server
    let app = routes::create_router(AppState::new(pool, auth_service));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
