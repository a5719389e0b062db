/*!
 * Identity context extractor
 *
 * Responsibility:
 * - Provide the gate's IdentityCtx to handlers
 * - axum plumbing stays in core, the type contract in types
 *
 * Public API:
 * - IdentityCtx, TrustLevel
 * - IdentityCtxExtractor
 */

mod core;
mod types;

pub use core::IdentityCtxExtractor;
pub use types::{IdentityCtx, TrustLevel};
