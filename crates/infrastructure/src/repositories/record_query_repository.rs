use super::name_forms::{owner_forms, zone_forms};
use super::read_handle::{with_executor, ReadHandle};
use async_trait::async_trait;
use hermes_dns_application::ports::RecordQueryPort;
use hermes_dns_domain::dns_name::APEX;
use hermes_dns_domain::{
    ARow, AaaaRow, CaaRow, CnameRow, DomainError, MxRow, NsRow, SoaRow, SrvRow, TxtRow,
};
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::{error, instrument};

/// Joined select over one typed table, restricted to active zones and
/// records. Binds: two zone spellings, then three owner spellings.
macro_rules! typed_select {
    ($columns:literal, $table:literal, $order:literal) => {
        typed_select!($columns, $table, $order, "")
    };
    ($columns:literal, $table:literal, $order:literal, $suffix:literal) => {
        concat!(
            "SELECT ",
            $columns,
            ", r.ttl FROM ",
            $table,
            " t JOIN record r ON r.id = t.record_id",
            " JOIN zone z ON z.id = r.zone_id",
            " WHERE z.is_active = 1 AND r.is_active = 1",
            " AND z.name IN (?, ?)",
            " AND r.name IN (?, ?, ?)",
            " ORDER BY ",
            $order,
            $suffix
        )
    };
}

const SELECT_A: &str = typed_select!("t.ip", "record_a", "t.id");
const SELECT_AAAA: &str = typed_select!("t.ip", "record_aaaa", "t.id");
const SELECT_CNAME: &str = typed_select!("t.target", "record_cname", "t.id");
const SELECT_MX: &str = typed_select!("t.host, t.priority", "record_mx", "t.priority ASC, t.id");
const SELECT_TXT: &str = typed_select!("t.text", "record_txt", "t.id");
const SELECT_NS: &str = typed_select!("t.name_server", "record_ns", "t.id");
const SELECT_SRV: &str = typed_select!(
    "t.priority, t.weight, t.port, t.target",
    "record_srv",
    "t.priority ASC, t.weight DESC, t.id"
);
const SELECT_CAA: &str = typed_select!("t.flag, t.tag, t.value", "record_caa", "t.id");
const SELECT_SOA: &str = typed_select!(
    "t.primary_ns, t.mail_box, t.serial, t.refresh, t.retry, t.expire, t.min_ttl",
    "record_soa",
    "t.id",
    " LIMIT 1"
);

type AddrRow = (String, i64);
type TargetRow = (String, i64);
type MxTuple = (String, i64, i64);
type SrvTuple = (i64, i64, i64, String, i64);
type CaaTuple = (i64, String, String, i64);
type SoaTuple = (String, String, i64, i64, i64, i64, i64, i64);

pub struct SqliteRecordQueryRepository {
    handle: ReadHandle,
}

impl SqliteRecordQueryRepository {
    pub fn new(handle: impl Into<ReadHandle>) -> Self {
        Self {
            handle: handle.into(),
        }
    }

    async fn fetch<T>(
        &self,
        sql: &'static str,
        record_type: &'static str,
        zone: &str,
        name: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let [zone_dot, zone_bare] = zone_forms(zone);
        let [relative, absolute, absolute_bare] = owner_forms(zone, name);

        with_executor!(&self.handle, |exec| {
            sqlx::query_as::<_, T>(sql)
                .bind(zone_dot)
                .bind(zone_bare)
                .bind(relative)
                .bind(absolute)
                .bind(absolute_bare)
                .fetch_all(exec)
                .await
        })
        .map_err(|e| {
            error!(error = %e, record_type, zone, name, "Failed to query records");
            DomainError::DatabaseError(e.to_string())
        })
    }
}

fn column<T: TryFrom<i64>>(value: i64, field: &str) -> Result<T, DomainError> {
    T::try_from(value).map_err(|_| {
        error!(field, value, "Stored value out of range");
        DomainError::DatabaseError(format!("{} out of range: {}", field, value))
    })
}

fn parse_addr<T: std::str::FromStr>(value: &str, field: &str) -> Result<T, DomainError> {
    value.trim().parse().map_err(|_| {
        error!(field, value, "Stored address does not parse");
        DomainError::DatabaseError(format!("invalid {} address: {}", field, value))
    })
}

#[async_trait]
impl RecordQueryPort for SqliteRecordQueryRepository {
    #[instrument(skip(self))]
    async fn query_a(&self, zone: &str, name: &str) -> Result<Vec<ARow>, DomainError> {
        self.fetch::<AddrRow>(SELECT_A, "A", zone, name)
            .await?
            .into_iter()
            .map(|(ip, ttl)| {
                Ok(ARow {
                    address: parse_addr::<Ipv4Addr>(&ip, "A")?,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_aaaa(&self, zone: &str, name: &str) -> Result<Vec<AaaaRow>, DomainError> {
        self.fetch::<AddrRow>(SELECT_AAAA, "AAAA", zone, name)
            .await?
            .into_iter()
            .map(|(ip, ttl)| {
                Ok(AaaaRow {
                    address: parse_addr::<Ipv6Addr>(&ip, "AAAA")?,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_cname(&self, zone: &str, name: &str) -> Result<Vec<CnameRow>, DomainError> {
        self.fetch::<TargetRow>(SELECT_CNAME, "CNAME", zone, name)
            .await?
            .into_iter()
            .map(|(target, ttl)| {
                Ok(CnameRow {
                    target,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_mx(&self, zone: &str, name: &str) -> Result<Vec<MxRow>, DomainError> {
        self.fetch::<MxTuple>(SELECT_MX, "MX", zone, name)
            .await?
            .into_iter()
            .map(|(host, priority, ttl)| {
                Ok(MxRow {
                    host,
                    priority: column(priority, "priority")?,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_txt(&self, zone: &str, name: &str) -> Result<Vec<TxtRow>, DomainError> {
        self.fetch::<TargetRow>(SELECT_TXT, "TXT", zone, name)
            .await?
            .into_iter()
            .map(|(text, ttl)| {
                Ok(TxtRow {
                    text,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_ns(&self, zone: &str, name: &str) -> Result<Vec<NsRow>, DomainError> {
        self.fetch::<TargetRow>(SELECT_NS, "NS", zone, name)
            .await?
            .into_iter()
            .map(|(name_server, ttl)| {
                Ok(NsRow {
                    name_server,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_srv(&self, zone: &str, name: &str) -> Result<Vec<SrvRow>, DomainError> {
        self.fetch::<SrvTuple>(SELECT_SRV, "SRV", zone, name)
            .await?
            .into_iter()
            .map(|(priority, weight, port, target, ttl)| {
                Ok(SrvRow {
                    priority: column(priority, "priority")?,
                    weight: column(weight, "weight")?,
                    port: column(port, "port")?,
                    target,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_caa(&self, zone: &str, name: &str) -> Result<Vec<CaaRow>, DomainError> {
        self.fetch::<CaaTuple>(SELECT_CAA, "CAA", zone, name)
            .await?
            .into_iter()
            .map(|(flag, tag, value, ttl)| {
                Ok(CaaRow {
                    flag: column(flag, "flag")?,
                    tag,
                    value,
                    ttl: column(ttl, "ttl")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn query_soa(&self, zone: &str) -> Result<SoaRow, DomainError> {
        let rows = self
            .fetch::<SoaTuple>(SELECT_SOA, "SOA", zone, APEX)
            .await?;

        let (primary_ns, mailbox, serial, refresh, retry, expire, minimum, ttl) = rows
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NotFound(format!("SOA record for zone {}", zone)))?;

        Ok(SoaRow {
            primary_ns,
            mailbox,
            serial: column(serial, "serial")?,
            refresh: column(refresh, "refresh")?,
            retry: column(retry, "retry")?,
            expire: column(expire, "expire")?,
            minimum: column(minimum, "min_ttl")?,
            ttl: column(ttl, "ttl")?,
        })
    }
}
