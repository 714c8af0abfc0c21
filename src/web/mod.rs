//! Web API for the minera platform.
//!
//! Serves session endpoints under `/auth` and user administration under
//! `/usuarios`, built on axum.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
mod router;
mod server;

pub use router::create_router;
pub use server::WebServer;

use crate::auth::TokenService;
use crate::db::Database;

/// Shared application state for web handlers.
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService) -> Self {
        Self { db, tokens }
    }
}
