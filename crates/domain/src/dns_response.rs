use super::ResourceRecord;
use std::sync::Arc;

/// Outcome of resolving one question against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    /// Zone apex the question was answered from.
    pub zone: Arc<str>,
    pub answers: Vec<ResourceRecord>,
    /// Zero or one SOA record on the no-data path.
    pub authority: Vec<ResourceRecord>,
    pub authoritative: bool,
    /// Set when no-data was confirmed but the zone SOA could not be attached.
    pub authority_incomplete: bool,
}

impl DnsResponse {
    pub fn new(zone: impl Into<Arc<str>>) -> Self {
        Self {
            zone: zone.into(),
            answers: Vec::new(),
            authority: Vec::new(),
            authoritative: true,
            authority_incomplete: false,
        }
    }

    pub fn is_nodata(&self) -> bool {
        self.answers.is_empty()
    }
}
