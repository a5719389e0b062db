pub mod identity_ctx;
pub mod json_body;

pub use identity_ctx::{IdentityCtx, IdentityCtxExtractor, TrustLevel};
pub use json_body::JsonBody;
