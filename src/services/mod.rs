pub mod advisory;
pub mod auth;
