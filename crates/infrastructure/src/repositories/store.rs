use super::{ReadHandle, SqliteRecordQueryRepository, SqliteZoneCatalog};
use async_trait::async_trait;
use hermes_dns_application::ports::{SnapshotProvider, StoreSnapshot};
use hermes_dns_domain::DomainError;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, instrument};

/// Opens one read transaction per resolution.
///
/// SQLite fixes the snapshot at the first read of the transaction; it is
/// rolled back when the last repository sharing it is dropped.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotProvider for SqliteStore {
    #[instrument(skip(self))]
    async fn open(&self) -> Result<StoreSnapshot, DomainError> {
        let tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to open read snapshot");
            DomainError::DatabaseError(e.to_string())
        })?;

        let handle = ReadHandle::Snapshot(Arc::new(Mutex::new(tx)));
        Ok(StoreSnapshot {
            catalog: Arc::new(SqliteZoneCatalog::new(handle.clone())),
            records: Arc::new(SqliteRecordQueryRepository::new(handle)),
        })
    }
}
