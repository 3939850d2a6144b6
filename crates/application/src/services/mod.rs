pub mod answer_builder;
pub mod negative_answer;
pub mod resolve_context;
pub mod zone_matcher;

pub use answer_builder::AnswerBuilder;
pub use negative_answer::{AuthorityOutcome, NegativeAnswerHandler};
pub use resolve_context::ResolveContext;
pub use zone_matcher::{ZoneMatch, ZoneMatcher};
