use super::Repositories;
use hermes_dns_application::use_cases::ResolveQueryUseCase;
use hermes_dns_domain::Config;
use hermes_dns_infrastructure::dns::DnsServerHandler;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, repos: &Repositories, shutdown: CancellationToken) -> Self {
        let resolve_query = Arc::new(ResolveQueryUseCase::new(repos.store.clone()));

        let query_timeout = config.resolver.query_timeout();
        info!(
            timeout_ms = query_timeout.as_millis() as u64,
            "Authoritative resolver ready"
        );

        let handler = Arc::new(
            DnsServerHandler::new(resolve_query, query_timeout).with_shutdown(shutdown),
        );

        Self { handler }
    }
}
