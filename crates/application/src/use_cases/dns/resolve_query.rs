use crate::ports::SnapshotProvider;
use crate::services::{AnswerBuilder, NegativeAnswerHandler, ResolveContext, ZoneMatcher};
use hermes_dns_domain::{DnsQuery, DnsResponse, DomainError, RecordType};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Stage of a single resolution, used to classify failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStage {
    OpeningSnapshot,
    MatchingZone,
    Querying,
    AttachingAuthority,
}

impl ResolveStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveStage::OpeningSnapshot => "opening_snapshot",
            ResolveStage::MatchingZone => "matching_zone",
            ResolveStage::Querying => "querying",
            ResolveStage::AttachingAuthority => "attaching_authority",
        }
    }
}

/// Resolves one question against the store: zone match, typed query,
/// then the SOA authority record when the answer is empty.
///
/// Every read of one resolution goes through a single store snapshot.
/// Holds no mutable state; one instance serves every concurrent query.
pub struct ResolveQueryUseCase {
    store: Arc<dyn SnapshotProvider>,
}

impl ResolveQueryUseCase {
    pub fn new(store: Arc<dyn SnapshotProvider>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, ctx), fields(domain = %query.domain, record_type = %query.record_type))]
    pub async fn execute(
        &self,
        query: &DnsQuery,
        ctx: &ResolveContext,
    ) -> Result<DnsResponse, DomainError> {
        let snapshot = ctx
            .run(self.store.open())
            .await
            .map_err(|e| classify(ResolveStage::OpeningSnapshot, query.record_type, None, e))?;

        let matched = ZoneMatcher::new(snapshot.catalog.clone())
            .find_zone(ctx, &query.domain)
            .await
            .map_err(|e| classify(ResolveStage::MatchingZone, query.record_type, None, e))?;

        let mut response = DnsResponse::new(matched.zone.as_str());

        response.answers = AnswerBuilder::new(snapshot.records.clone())
            .build(ctx, &matched, query.record_type)
            .await
            .map_err(|e| {
                classify(
                    ResolveStage::Querying,
                    query.record_type,
                    Some(&matched.zone),
                    e,
                )
            })?;

        if !response.answers.is_empty() {
            debug!(zone = %matched.zone, answers = response.answers.len(), "Answered");
            return Ok(response);
        }

        if query.record_type == RecordType::SOA {
            // The zone SOA is itself the missing data; nothing to attach.
            response.authority_incomplete = true;
            warn!(zone = %matched.zone, "SOA query on a zone without an active SOA");
            return Ok(response);
        }

        let outcome = NegativeAnswerHandler::new(snapshot.records)
            .attach(ctx, &mut response)
            .await
            .map_err(|e| {
                classify(
                    ResolveStage::AttachingAuthority,
                    RecordType::SOA,
                    Some(&matched.zone),
                    e,
                )
            })?;

        debug!(
            zone = %matched.zone,
            attached = outcome.is_attached(),
            incomplete = response.authority_incomplete,
            "No data"
        );
        Ok(response)
    }
}

/// Maps a failure to the error surfaced to callers.
///
/// Store failures while fetching typed records become `RecordQueryFailed`;
/// name, zone and cancellation errors pass through.
fn classify(
    stage: ResolveStage,
    record_type: RecordType,
    zone: Option<&str>,
    error: DomainError,
) -> DomainError {
    match (stage, error) {
        (_, e) if e.is_cancellation() => {
            debug!(stage = stage.as_str(), error = %e, "Resolution abandoned");
            e
        }
        (ResolveStage::Querying, DomainError::DatabaseError(reason))
        | (ResolveStage::Querying, DomainError::NotFound(reason)) => {
            let zone = zone.unwrap_or_default().to_string();
            warn!(stage = stage.as_str(), zone = %zone, record_type = %record_type, reason = %reason, "Record query failed");
            DomainError::RecordQueryFailed {
                record_type: record_type.as_str(),
                zone,
                reason,
            }
        }
        (_, e) => {
            debug!(stage = stage.as_str(), error = %e, "Resolution failed");
            e
        }
    }
}
