pub mod dns;

pub use dns::{ResolveQueryUseCase, ResolveStage};
