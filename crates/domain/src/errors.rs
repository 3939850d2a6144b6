use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("No active zone owns {0}")]
    ZoneNotFound(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Failed to query {record_type} records in zone {zone}: {reason}")]
    RecordQueryFailed {
        record_type: &'static str,
        zone: String,
        reason: String,
    },

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Query cancelled")]
    Cancelled,
}

/// Response-level classification of a failed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    FormErr,
    NxDomain,
    ServFail,
    /// Never answered on the wire.
    Cancelled,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::FormErr => "FORMERR",
            ResponseStatus::NxDomain => "NXDOMAIN",
            ResponseStatus::ServFail => "SERVFAIL",
            ResponseStatus::Cancelled => "CANCELLED",
        }
    }
}

impl DomainError {
    pub fn response_status(&self) -> ResponseStatus {
        match self {
            DomainError::InvalidDomainName(_) => ResponseStatus::FormErr,
            DomainError::ZoneNotFound(_) => ResponseStatus::NxDomain,
            DomainError::QueryTimeout | DomainError::Cancelled => ResponseStatus::Cancelled,
            DomainError::NotFound(_)
            | DomainError::DatabaseError(_)
            | DomainError::RecordQueryFailed { .. } => ResponseStatus::ServFail,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, DomainError::QueryTimeout | DomainError::Cancelled)
    }
}
