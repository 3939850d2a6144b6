use hermes_dns_domain::DomainError;
use hermes_dns_infrastructure::repositories::{SqliteStore, SqliteZoneCatalog};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Repositories {
    pub store: Arc<SqliteStore>,
    pub zones: Arc<SqliteZoneCatalog>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            store: Arc::new(SqliteStore::new(pool.clone())),
            zones: Arc::new(SqliteZoneCatalog::new(pool)),
        }
    }

    pub async fn log_zone_inventory(&self) -> Result<(), DomainError> {
        let zones = self.zones.get_active_zones().await?;
        if zones.is_empty() {
            warn!("No active zones configured; every query will get NXDOMAIN");
            return Ok(());
        }

        for zone in &zones {
            info!(zone = %zone.name, serial = zone.serial, "Serving zone");
        }
        info!(count = zones.len(), "Active zones loaded");
        Ok(())
    }
}
