//! Maps typed store rows onto answer records.
//!
//! Owners are the query name as asked, except SOA which is owned by the
//! zone apex. Numeric fields pass through unchanged; name-valued targets are
//! made fully qualified.

use hermes_dns_domain::dns_name::{ensure_fqdn, relative_name};
use hermes_dns_domain::{
    ARow, AaaaRow, CaaRow, CnameRow, DomainError, MxRow, NsRow, RecordData, RecordType,
    ResourceRecord, SoaRow, SrvRow, TxtRow,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{ResolveContext, ZoneMatch};
use crate::ports::RecordQueryPort;

pub struct AnswerBuilder {
    records: Arc<dyn RecordQueryPort>,
}

impl AnswerBuilder {
    pub fn new(records: Arc<dyn RecordQueryPort>) -> Self {
        Self { records }
    }

    /// Fetches and maps the answer set for one question.
    ///
    /// An empty result is a confirmed absence of data; store failures are
    /// returned as errors untouched.
    #[instrument(skip(self, ctx, matched), fields(zone = %matched.zone, query = %matched.query_name))]
    pub async fn build(
        &self,
        ctx: &ResolveContext,
        matched: &ZoneMatch,
        record_type: RecordType,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let zone = matched.zone.as_str();
        let owner = matched.owner.as_str();
        let name = relative_name(&matched.query_name, zone);

        let answers: Vec<ResourceRecord> = match record_type {
            RecordType::A => ctx
                .run(self.records.query_a(zone, &name))
                .await?
                .iter()
                .map(|row| a_record(owner, row))
                .collect(),
            RecordType::AAAA => ctx
                .run(self.records.query_aaaa(zone, &name))
                .await?
                .iter()
                .map(|row| aaaa_record(owner, row))
                .collect(),
            RecordType::CNAME => ctx
                .run(self.records.query_cname(zone, &name))
                .await?
                .iter()
                .map(|row| cname_record(owner, row))
                .collect(),
            RecordType::MX => ctx
                .run(self.records.query_mx(zone, &name))
                .await?
                .iter()
                .map(|row| mx_record(owner, row))
                .collect(),
            RecordType::TXT => ctx
                .run(self.records.query_txt(zone, &name))
                .await?
                .iter()
                .map(|row| txt_record(owner, row))
                .collect(),
            RecordType::NS => ctx
                .run(self.records.query_ns(zone, &name))
                .await?
                .iter()
                .map(|row| ns_record(owner, row))
                .collect(),
            RecordType::SRV => ctx
                .run(self.records.query_srv(zone, &name))
                .await?
                .iter()
                .map(|row| srv_record(owner, row))
                .collect(),
            RecordType::CAA => ctx
                .run(self.records.query_caa(zone, &name))
                .await?
                .iter()
                .map(|row| caa_record(owner, row))
                .collect(),
            RecordType::SOA => match ctx.run(self.records.query_soa(zone)).await {
                Ok(row) => vec![soa_record(zone, &row)],
                Err(e) if e.is_not_found() => Vec::new(),
                Err(e) => return Err(e),
            },
        };

        debug!(record_type = %record_type, name = %name, answers = answers.len(), "Answer set built");
        Ok(answers)
    }
}

pub fn a_record(owner: &str, row: &ARow) -> ResourceRecord {
    ResourceRecord::new(owner, row.ttl, RecordData::A(row.address))
}

pub fn aaaa_record(owner: &str, row: &AaaaRow) -> ResourceRecord {
    ResourceRecord::new(owner, row.ttl, RecordData::AAAA(row.address))
}

pub fn cname_record(owner: &str, row: &CnameRow) -> ResourceRecord {
    ResourceRecord::new(owner, row.ttl, RecordData::CNAME(ensure_fqdn(&row.target)))
}

pub fn mx_record(owner: &str, row: &MxRow) -> ResourceRecord {
    ResourceRecord::new(
        owner,
        row.ttl,
        RecordData::MX {
            preference: row.priority,
            exchange: ensure_fqdn(&row.host),
        },
    )
}

pub fn txt_record(owner: &str, row: &TxtRow) -> ResourceRecord {
    ResourceRecord::new(owner, row.ttl, RecordData::TXT(row.text.clone()))
}

pub fn ns_record(owner: &str, row: &NsRow) -> ResourceRecord {
    ResourceRecord::new(owner, row.ttl, RecordData::NS(ensure_fqdn(&row.name_server)))
}

pub fn srv_record(owner: &str, row: &SrvRow) -> ResourceRecord {
    ResourceRecord::new(
        owner,
        row.ttl,
        RecordData::SRV {
            priority: row.priority,
            weight: row.weight,
            port: row.port,
            target: ensure_fqdn(&row.target),
        },
    )
}

pub fn caa_record(owner: &str, row: &CaaRow) -> ResourceRecord {
    ResourceRecord::new(
        owner,
        row.ttl,
        RecordData::CAA {
            flag: row.flag,
            tag: row.tag.clone(),
            value: row.value.clone(),
        },
    )
}

/// SOA owned by the zone apex, used both as an answer and as the
/// negative-answer authority record.
pub fn soa_record(zone: &str, row: &SoaRow) -> ResourceRecord {
    ResourceRecord::new(
        ensure_fqdn(zone),
        row.ttl,
        RecordData::SOA {
            mname: ensure_fqdn(&row.primary_ns),
            rname: ensure_fqdn(&row.mailbox),
            serial: row.serial,
            refresh: row.refresh,
            retry: row.retry,
            expire: row.expire,
            minimum: row.minimum,
        },
    )
}
