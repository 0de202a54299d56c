//! PostgreSQL persistence layer: pool construction, migrations, and the
//! category/todo repositories.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default connection-pool size when `DB_MAX_CONNECTIONS` is not set.
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    create_pool_with(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a connection pool with an explicit size.
pub async fn create_pool_with(
    database_url: &str,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Connect using environment configuration and verify the connection.
///
/// Loads `.env` if present, then reads:
///
/// | Env Var              | Default  |
/// |----------------------|----------|
/// | `DATABASE_URL`       | required |
/// | `DB_MAX_CONNECTIONS` | `20`     |
///
/// Migrations are left to the caller ([`run_migrations`]) so embedding
/// layers can decide when schema changes are applied.
pub async fn connect_from_env() -> Result<DbPool, sqlx::Error> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    let max_connections: u32 = match std::env::var("DB_MAX_CONNECTIONS") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| sqlx::Error::Configuration("DB_MAX_CONNECTIONS must be a u32".into()))?,
        Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let pool = create_pool_with(&database_url, max_connections).await?;
    health_check(&pool).await?;
    tracing::info!(max_connections, "Database connection pool created");

    Ok(pool)
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`. Idempotent.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
