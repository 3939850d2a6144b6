use super::record_encoder::to_hickory_record;
use super::record_type_map::RecordTypeMapper;
use hermes_dns_application::services::ResolveContext;
use hermes_dns_application::use_cases::ResolveQueryUseCase;
use hermes_dns_domain::{DnsQuery, DnsResponse, ResponseStatus};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::{DNSClass, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Largest response sent over UDP without EDNS.
pub const MAX_UDP_PAYLOAD: usize = 512;

/// Turns raw DNS queries into raw responses using the resolve use case.
///
/// Every query gets the configured deadline and the server's shutdown token.
/// `None` means nothing is sent back.
pub struct DnsServerHandler {
    use_case: Arc<ResolveQueryUseCase>,
    query_timeout: Duration,
    shutdown: CancellationToken,
}

struct Outcome {
    code: ResponseCode,
    authoritative: bool,
    answers: Vec<Record>,
    authority: Vec<Record>,
}

impl Outcome {
    fn error(code: ResponseCode) -> Self {
        Self {
            code,
            authoritative: false,
            answers: Vec::new(),
            authority: Vec::new(),
        }
    }
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveQueryUseCase>, query_timeout: Duration) -> Self {
        Self {
            use_case,
            query_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Handles a query received over a stream transport (no size limit).
    pub async fn handle_raw(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        self.handle(bytes, None).await
    }

    /// Handles a UDP datagram. Responses over 512 bytes are truncated to
    /// the header and question with TC set.
    pub async fn handle_datagram(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        self.handle(bytes, Some(MAX_UDP_PAYLOAD)).await
    }

    async fn handle(&self, bytes: &[u8], limit: Option<usize>) -> Option<Vec<u8>> {
        let request = match Message::from_vec(bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = bytes.len(), "Dropping unparseable message");
                return None;
            }
        };
        if request.message_type() != MessageType::Query {
            debug!(id = request.id(), "Dropping non-query message");
            return None;
        }

        let outcome = self.resolve(&request).await?;

        let response = build_response(&request, &outcome, false);
        let encoded = encode(&response)?;
        match limit {
            Some(limit) if encoded.len() > limit => {
                debug!(id = request.id(), len = encoded.len(), "Response truncated");
                encode(&build_response(&request, &outcome, true))
            }
            _ => Some(encoded),
        }
    }

    async fn resolve(&self, request: &Message) -> Option<Outcome> {
        if request.op_code() != OpCode::Query {
            debug!(op_code = ?request.op_code(), "Unsupported opcode");
            return Some(Outcome::error(ResponseCode::NotImp));
        }

        let query = match request.queries() {
            [query] => query,
            queries => {
                debug!(count = queries.len(), "Expected exactly one question");
                return Some(Outcome::error(ResponseCode::FormErr));
            }
        };

        if query.query_class() != DNSClass::IN {
            debug!(class = ?query.query_class(), "Unsupported class");
            return Some(Outcome::error(ResponseCode::NotImp));
        }

        let record_type = match RecordTypeMapper::from_hickory(query.query_type()) {
            Some(record_type) => record_type,
            None => {
                debug!(record_type = ?query.query_type(), "Unsupported record type");
                return Some(Outcome::error(ResponseCode::NotImp));
            }
        };

        let domain = query.name().to_ascii();
        info!(domain = %domain, record_type = %record_type, "DNS query received");

        let ctx = ResolveContext::new()
            .with_timeout(self.query_timeout)
            .with_cancellation(self.shutdown.child_token());

        match self
            .use_case
            .execute(&DnsQuery::new(domain.as_str(), record_type), &ctx)
            .await
        {
            Ok(response) => Some(encode_sections(&domain, &response)),
            Err(e) => match e.response_status() {
                ResponseStatus::FormErr => Some(Outcome::error(ResponseCode::FormErr)),
                ResponseStatus::NxDomain => Some(Outcome::error(ResponseCode::NXDomain)),
                ResponseStatus::ServFail => {
                    error!(domain = %domain, error = %e, "Resolution failed");
                    Some(Outcome::error(ResponseCode::ServFail))
                }
                ResponseStatus::Cancelled => {
                    warn!(domain = %domain, error = %e, "Resolution abandoned, no response sent");
                    None
                }
            },
        }
    }
}

fn encode_sections(domain: &str, response: &DnsResponse) -> Outcome {
    let converted = response
        .answers
        .iter()
        .map(to_hickory_record)
        .collect::<Result<Vec<_>, _>>()
        .and_then(|answers| {
            response
                .authority
                .iter()
                .map(to_hickory_record)
                .collect::<Result<Vec<_>, _>>()
                .map(|authority| (answers, authority))
        });

    match converted {
        Ok((answers, authority)) => {
            debug!(
                domain,
                zone = %response.zone,
                answers = answers.len(),
                authority = authority.len(),
                "Sending response"
            );
            Outcome {
                code: ResponseCode::NoError,
                authoritative: response.authoritative,
                answers,
                authority,
            }
        }
        Err(e) => {
            error!(domain, error = %e, "Stored record cannot be encoded");
            Outcome {
                authoritative: response.authoritative,
                ..Outcome::error(ResponseCode::ServFail)
            }
        }
    }
}

fn build_response(request: &Message, outcome: &Outcome, truncated: bool) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(false);
    response.set_authoritative(outcome.authoritative);
    response.set_response_code(outcome.code);
    response.set_truncated(truncated);

    for query in request.queries() {
        response.add_query(query.clone());
    }
    if !truncated {
        for record in &outcome.answers {
            response.add_answer(record.clone());
        }
        for record in &outcome.authority {
            response.add_name_server(record.clone());
        }
    }
    response
}

fn encode(message: &Message) -> Option<Vec<u8>> {
    let mut buf = Vec::with_capacity(MAX_UDP_PAYLOAD);
    let mut encoder = BinEncoder::new(&mut buf);
    match message.emit(&mut encoder) {
        Ok(()) => Some(buf),
        Err(e) => {
            error!(id = message.id(), error = %e, "Failed to serialize DNS response");
            None
        }
    }
}
