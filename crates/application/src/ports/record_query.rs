use async_trait::async_trait;
use hermes_dns_domain::{
    ARow, AaaaRow, CaaRow, CnameRow, DomainError, MxRow, NsRow, SoaRow, SrvRow, TxtRow,
};

/// Read-only access to typed records, keyed by zone apex and owner name.
///
/// Owner names are relative to the zone (`www`, `@` for the apex). Only rows
/// whose record and zone are both active are returned. An empty `Vec` means
/// no rows matched; errors are reserved for failed reads.
///
/// MX rows come back ordered by priority ascending, SRV rows by priority
/// ascending then weight descending. Other types are in a stable but
/// unspecified order.
#[async_trait]
pub trait RecordQueryPort: Send + Sync {
    async fn query_a(&self, zone: &str, name: &str) -> Result<Vec<ARow>, DomainError>;

    async fn query_aaaa(&self, zone: &str, name: &str) -> Result<Vec<AaaaRow>, DomainError>;

    async fn query_cname(&self, zone: &str, name: &str) -> Result<Vec<CnameRow>, DomainError>;

    async fn query_mx(&self, zone: &str, name: &str) -> Result<Vec<MxRow>, DomainError>;

    async fn query_txt(&self, zone: &str, name: &str) -> Result<Vec<TxtRow>, DomainError>;

    async fn query_ns(&self, zone: &str, name: &str) -> Result<Vec<NsRow>, DomainError>;

    async fn query_srv(&self, zone: &str, name: &str) -> Result<Vec<SrvRow>, DomainError>;

    async fn query_caa(&self, zone: &str, name: &str) -> Result<Vec<CaaRow>, DomainError>;

    /// The zone's single SOA, or [`DomainError::NotFound`] when it has none.
    async fn query_soa(&self, zone: &str) -> Result<SoaRow, DomainError>;
}
