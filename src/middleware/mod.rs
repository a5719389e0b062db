/*
 * Responsibility
 * - Public interface of the middleware layer
 * - http (transport), cors, security_headers: whole app
 * - auth::identity: protected routes only
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
