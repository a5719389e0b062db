/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - identity: IdentityProvider, advisory: AdvisoryService
 * - Cheap to clone (Arc inside); no per-request mutable state lives here
 */
use std::sync::Arc;

use crate::services::{advisory::AdvisoryService, auth::IdentityProvider};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub advisory: Arc<AdvisoryService>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityProvider>, advisory: Arc<AdvisoryService>) -> Self {
        Self { identity, advisory }
    }
}
