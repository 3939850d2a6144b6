use hermes_dns_domain::{DnsResponse, DomainError};
use std::sync::Arc;
use tracing::{debug, warn};

use super::answer_builder::soa_record;
use super::ResolveContext;
use crate::ports::RecordQueryPort;

/// What happened when the zone SOA was looked up for a no-data answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityOutcome {
    Attached,
    /// The zone has no active SOA.
    Missing,
    LookupFailed(DomainError),
}

impl AuthorityOutcome {
    pub fn is_attached(&self) -> bool {
        matches!(self, AuthorityOutcome::Attached)
    }
}

/// Attaches the zone SOA to the authority section of an empty answer.
///
/// SOA lookup failures degrade the response instead of failing it. Only
/// cancellation escapes as an error.
pub struct NegativeAnswerHandler {
    records: Arc<dyn RecordQueryPort>,
}

impl NegativeAnswerHandler {
    pub fn new(records: Arc<dyn RecordQueryPort>) -> Self {
        Self { records }
    }

    pub async fn attach(
        &self,
        ctx: &ResolveContext,
        response: &mut DnsResponse,
    ) -> Result<AuthorityOutcome, DomainError> {
        let zone = response.zone.clone();

        let outcome = match ctx.run(self.records.query_soa(&zone)).await {
            Ok(row) => {
                response.authority.push(soa_record(&zone, &row));
                AuthorityOutcome::Attached
            }
            Err(e) if e.is_cancellation() => return Err(e),
            Err(e) if e.is_not_found() => AuthorityOutcome::Missing,
            Err(e) => AuthorityOutcome::LookupFailed(e),
        };

        match &outcome {
            AuthorityOutcome::Attached => {
                debug!(zone = %zone, "SOA attached to negative answer");
            }
            AuthorityOutcome::Missing => {
                response.authority_incomplete = true;
                warn!(zone = %zone, "Zone has no active SOA, negative answer sent without authority");
            }
            AuthorityOutcome::LookupFailed(e) => {
                response.authority_incomplete = true;
                warn!(zone = %zone, error = %e, "SOA lookup failed, negative answer sent without authority");
            }
        }

        Ok(outcome)
    }
}
