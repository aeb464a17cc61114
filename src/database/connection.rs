use crate::config::DatabaseSettings;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::time::Duration;
use tracing::info;

pub type DbPool = PgPool;

/// Transaction handle that account writes go through.
pub type DbTransaction = Transaction<'static, Postgres>;

pub async fn create_pool(settings: &DatabaseSettings) -> Result<DbPool, sqlx::Error> {
    info!(
        "Connecting to database with up to {} connections",
        settings.max_connections
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&settings.url)
        .await
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await
}
