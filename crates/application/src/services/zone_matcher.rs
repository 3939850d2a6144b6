use hermes_dns_domain::dns_name::{candidate_zones, ensure_fqdn, label_count, normalize_fqdn};
use hermes_dns_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::ResolveContext;
use crate::ports::ZoneCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMatch {
    /// Active zone apex, normalized.
    pub zone: String,
    /// Query name, normalized.
    pub query_name: String,
    /// Query name as asked, fully qualified. Used as the answer owner.
    pub owner: String,
}

/// Finds the most specific active zone owning a query name.
///
/// Candidates are tried longest suffix first against the catalog, so a zone
/// delegated below the second level wins over its parent.
pub struct ZoneMatcher {
    catalog: Arc<dyn ZoneCatalog>,
}

impl ZoneMatcher {
    pub fn new(catalog: Arc<dyn ZoneCatalog>) -> Self {
        Self { catalog }
    }

    #[instrument(skip(self, ctx))]
    pub async fn find_zone(
        &self,
        ctx: &ResolveContext,
        query_name: &str,
    ) -> Result<ZoneMatch, DomainError> {
        let fqdn = normalize_fqdn(query_name)?;
        if label_count(&fqdn) < 2 {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' has fewer than two labels",
                query_name
            )));
        }

        for candidate in candidate_zones(&fqdn) {
            if ctx.run(self.catalog.zone_exists(&candidate)).await? {
                debug!(query = %fqdn, zone = %candidate, "Zone matched");
                return Ok(ZoneMatch {
                    zone: candidate,
                    query_name: fqdn,
                    owner: ensure_fqdn(query_name.trim()),
                });
            }
        }

        debug!(query = %fqdn, "No active zone owns query name");
        Err(DomainError::ZoneNotFound(fqdn))
    }
}
