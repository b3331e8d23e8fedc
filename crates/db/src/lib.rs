//! Persistence layer: sqlx/Postgres models and repositories.
//!
//! Repositories are stateless unit structs with async functions. Simple
//! reads take a pool; anything that must participate in a caller-owned
//! transaction takes `&mut PgConnection` so the orchestration layer can
//! commit a logical operation atomically.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await?;
    tracing::debug!(max_connections = 20, "Created database connection pool");
    Ok(pool)
}
