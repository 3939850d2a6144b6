use async_trait::async_trait;
use hermes_dns_domain::DomainError;

#[async_trait]
pub trait ZoneCatalog: Send + Sync {
    /// Whether `name` (FQDN, any case) is an active zone.
    async fn zone_exists(&self, name: &str) -> Result<bool, DomainError>;

    async fn list_active_zone_names(&self) -> Result<Vec<String>, DomainError>;
}
