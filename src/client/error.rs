//! Client SDK errors.

use thiserror::Error;

/// Errors surfaced by the API client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        errors: Option<Vec<String>>,
    },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Both the access token and the refresh token were rejected. The
    /// stored session has been cleared and the sign-out signal raised.
    #[error("session expired")]
    SessionExpired,
}

impl ClientError {
    /// True for the 401 API error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}
