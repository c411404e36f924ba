//! Advisory Module - Response Composition
//!
//! Two tiers of advice text:
//! - `template`: deterministic, always available
//! - `enhanced`: external text generation, optional, may fail
//!
//! `composer` picks between them (bounded by a timeout) and enforces the
//! action contract; `service` ties it to the scoring context.

pub mod types;
pub mod template;
pub mod enhanced;
pub mod composer;
pub mod service;

pub use types::{round5, Advice, AdviceRequest, AdvisoryResult};
pub use template::TemplateGenerator;
pub use enhanced::{EnhanceError, EnhancedGenerator, GeminiGenerator};
pub use composer::AdvisoryComposer;
pub use service::AdvisoryService;
