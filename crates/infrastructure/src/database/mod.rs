use hermes_dns_domain::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

fn connect_options(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs)))
}

/// Pool used by the resolution path. Connections are opened in
/// `query_only` mode; nothing on the query path writes.
pub async fn create_read_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url, cfg)?.pragma("query_only", "ON");

    SqlitePoolOptions::new()
        .max_connections(cfg.read_pool_max_connections)
        .min_connections(cfg.effective_min_connections())
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .connect_with(options)
        .await
}

/// Single-connection pool for schema migrations.
pub async fn create_write_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url, cfg)?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!(migrations = MIGRATOR.iter().count(), "Database schema up to date");
    Ok(())
}
