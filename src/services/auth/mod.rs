pub mod clerk;
pub mod error;
pub mod factory;
pub mod provider;
pub mod unverified;

#[cfg(test)]
pub mod testing;

pub use error::AuthError;
pub use factory::build_identity_provider;
pub use provider::{IdentityProvider, UserRecord, VerifyError};
