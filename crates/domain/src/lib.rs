//! Hermes DNS Domain Layer
pub mod config;
pub mod dns_name;
pub mod dns_query;
pub mod dns_record;
pub mod dns_response;
pub mod errors;
pub mod zone;

pub use config::{
    CliOverrides, Config, ConfigError, DatabaseConfig, JobsConfig, LogFormat, LoggingConfig,
    ResolverConfig, ServerConfig,
};
pub use dns_query::DnsQuery;
pub use dns_record::{
    ARow, AaaaRow, CaaRow, CnameRow, MxRow, NsRow, RecordClass, RecordData, RecordType,
    ResourceRecord, SoaRow, SrvRow, TxtRow,
};
pub use dns_response::DnsResponse;
pub use errors::{DomainError, ResponseStatus};
pub use zone::Zone;
