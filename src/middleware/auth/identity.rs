//! Identity gate middleware: run the gate, put IdentityCtx into extensions.
//!
//! Any gate error is returned as the response; the inner handler never runs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::middleware::auth::gate;
use crate::state::AppState;

/// Put the routes of `router` behind the identity gate.
///
/// Example:
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::identity::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 from_fn cannot take the State extractor, so pass state explicitly via from_fn_with_state
    router.layer(middleware::from_fn_with_state(state, identity_middleware))
}

async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Owned copy: the request itself is not held across the provider calls
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let identity = gate::authorize(state.identity.as_ref(), authorization.as_deref()).await?;

    // middleware → extractor
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
