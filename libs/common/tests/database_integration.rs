//! Integration tests against a live PostgreSQL instance
//!
//! Run with `cargo test -- --ignored` once `DATABASE_URL` points at a
//! disposable database.

use common::database::{DatabaseConfig, health_check, init_pool, pool_stats, run_migrations};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_migrations_seed_roles() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    health_check(&pool).await?;
    run_migrations(&pool).await?;

    let rows = sqlx::query("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await?;

    let roles: Vec<(i32, String)> = rows
        .iter()
        .map(|row| (row.get("id"), row.get("name")))
        .collect();
    assert_eq!(
        roles,
        vec![(1, "admin".to_string()), (2, "user".to_string())],
        "seeded roles do not match"
    );

    let stats = pool_stats(&pool);
    assert!(stats.open_connections >= 1);
    assert_eq!(stats.max_connections, db_config.max_connections);

    Ok(())
}
