mod record_query;
mod store_snapshot;
mod zone_catalog;

pub use record_query::RecordQueryPort;
pub use store_snapshot::{SnapshotProvider, StoreSnapshot};
pub use zone_catalog::ZoneCatalog;

// Re-export for convenience
pub use hermes_dns_domain::DnsQuery;
