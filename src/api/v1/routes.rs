/*
 * Responsibility
 * - v1 URL layout
 * - /health is public; /me, /advice, /analyze sit behind the identity gate
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth::identity;
use crate::state::AppState;

use crate::api::v1::handlers::{
    advisory::{advise, analyze},
    health::health,
    me::me,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/advice", post(advise))
        .route("/analyze", post(analyze));

    Router::new()
        .route("/health", get(health))
        .merge(identity::apply(protected, state))
}
