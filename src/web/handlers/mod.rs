//! Request handlers for the web API.

pub mod auth;
pub mod users;
