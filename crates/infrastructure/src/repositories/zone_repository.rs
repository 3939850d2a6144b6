use super::name_forms::zone_forms;
use super::read_handle::{with_executor, ReadHandle};
use async_trait::async_trait;
use hermes_dns_application::ports::ZoneCatalog;
use hermes_dns_domain::dns_name::ensure_fqdn;
use hermes_dns_domain::{DomainError, Zone};
use std::sync::Arc;
use tracing::{error, instrument};

type ZoneRow = (i64, String, i64, Option<String>, i64);

pub struct SqliteZoneCatalog {
    handle: ReadHandle,
}

impl SqliteZoneCatalog {
    pub fn new(handle: impl Into<ReadHandle>) -> Self {
        Self {
            handle: handle.into(),
        }
    }

    fn row_to_zone(row: ZoneRow) -> Result<Zone, DomainError> {
        let (id, name, serial, description, is_active) = row;

        let serial = u32::try_from(serial).map_err(|_| {
            error!(zone = %name, serial, "Zone serial out of range");
            DomainError::DatabaseError(format!("zone {} serial out of range: {}", name, serial))
        })?;

        Ok(Zone {
            id: Some(id),
            name: Arc::from(ensure_fqdn(&name.to_ascii_lowercase())),
            serial,
            description: description.map(|s| Arc::from(s.as_str())),
            active: is_active != 0,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_active_zones(&self) -> Result<Vec<Zone>, DomainError> {
        let rows = with_executor!(&self.handle, |exec| {
            sqlx::query_as::<_, ZoneRow>(
                "SELECT id, name, serial, description, is_active
                 FROM zone WHERE is_active = 1 ORDER BY name",
            )
            .fetch_all(exec)
            .await
        })
        .map_err(|e| {
            error!(error = %e, "Failed to list active zones");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Self::row_to_zone).collect()
    }
}

#[async_trait]
impl ZoneCatalog for SqliteZoneCatalog {
    #[instrument(skip(self))]
    async fn zone_exists(&self, name: &str) -> Result<bool, DomainError> {
        let [with_dot, bare] = zone_forms(name);

        let row = with_executor!(&self.handle, |exec| {
            sqlx::query_as::<_, (i64,)>(
                "SELECT id FROM zone WHERE is_active = 1 AND name IN (?, ?) LIMIT 1",
            )
            .bind(with_dot)
            .bind(bare)
            .fetch_optional(exec)
            .await
        })
        .map_err(|e| {
            error!(error = %e, zone = name, "Failed to look up zone");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.is_some())
    }

    async fn list_active_zone_names(&self) -> Result<Vec<String>, DomainError> {
        Ok(self
            .get_active_zones()
            .await?
            .into_iter()
            .map(|zone| zone.name.to_string())
            .collect())
    }
}
