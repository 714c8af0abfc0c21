//! minera: session and token authority for a mining-operations platform.
//!
//! Provides the HTTP API (login, registration, token refresh, user
//! administration) and a typed client SDK with silent token refresh.

pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{MineraError, Result};
