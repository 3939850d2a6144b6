use async_trait::async_trait;
use hermes_dns_domain::DomainError;
use std::sync::Arc;

use super::{RecordQueryPort, ZoneCatalog};

/// Read view used by a single resolution.
///
/// Both handles see the same state of the store for as long as the view
/// is alive. Dropping the last clone releases it.
#[derive(Clone)]
pub struct StoreSnapshot {
    pub catalog: Arc<dyn ZoneCatalog>,
    pub records: Arc<dyn RecordQueryPort>,
}

#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn open(&self) -> Result<StoreSnapshot, DomainError>;
}
