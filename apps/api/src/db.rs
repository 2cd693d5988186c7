use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

/// Creates a PostgreSQL connection pool.
///
/// An unreachable server is logged and answered with a lazy pool, so the
/// service still starts and serves CSV-backed views until the database returns.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let options = PgPoolOptions::new().max_connections(10);
    match options.clone().connect(database_url).await {
        Ok(pool) => {
            info!("PostgreSQL connection pool established");
            Ok(pool)
        }
        Err(e) => {
            error!("PostgreSQL unavailable ({e}); continuing in degraded mode");
            options
                .connect_lazy(database_url)
                .context("DATABASE_URL is not a valid PostgreSQL URL")
        }
    }
}

/// Applies the SQL migrations bundled with the binary.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");
    Ok(())
}
