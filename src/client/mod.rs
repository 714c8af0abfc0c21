//! Client SDK for the minera API.
//!
//! Wraps the HTTP surface with typed calls and a session store. Requests
//! carry the stored access token; a 401 triggers one silent refresh and
//! one resubmission before the session is declared expired.

mod error;
mod http;
mod session;

pub use error::ClientError;
pub use http::ApiClient;
pub use session::{MemorySessionStore, Session, SessionStore};
