//! Middleware for the web API.

mod auth;
mod cors;

pub use auth::{inject_state, CurrentUser};
pub use cors::create_cors_layer;
