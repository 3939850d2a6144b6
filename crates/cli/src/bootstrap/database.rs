use hermes_dns_domain::DatabaseConfig;
use hermes_dns_infrastructure::database::{create_read_pool, create_write_pool, run_migrations};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Applies migrations through a short-lived write pool, then opens the
/// read-only pool the resolver queries through.
pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let database_url = cfg.url();
    info!("Initializing database: {}", database_url);

    if cfg.run_migrations {
        let write_pool = create_write_pool(&database_url, cfg).await.map_err(|e| {
            error!("Failed to initialize write pool: {}", e);
            anyhow::anyhow!(e)
        })?;

        run_migrations(&write_pool).await.map_err(|e| {
            error!("Failed to apply migrations: {}", e);
            anyhow::anyhow!(e)
        })?;

        write_pool.close().await;
    }

    let read_pool = create_read_pool(&database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize read pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "Database initialized successfully (read_pool max={}, min={})",
        cfg.read_pool_max_connections,
        cfg.effective_min_connections(),
    );

    Ok(read_pool)
}
