pub mod backend;
pub mod canned;
pub mod error;
pub mod factory;
pub mod gemini;
pub mod service;
pub mod templates;

pub use backend::{AdvisoryBackend, GenerationError};
pub use error::AdvisoryError;
pub use factory::build_advisory_service;
pub use service::{AdvisoryProfile, AdvisoryService};
