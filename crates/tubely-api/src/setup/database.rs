use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tubely_core::Config;

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Open the `videos` pool and bring the schema up to date.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let options: PgConnectOptions = config
        .database_url()
        .parse()
        .context("DATABASE_URL is not a valid PostgreSQL URL")?;
    let host = options.get_host().to_string();

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to database at {}", host))?;

    tracing::info!(
        host = %host,
        max_connections = config.db_max_connections(),
        "Database pool ready"
    );

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}
