//! API error types and their HTTP mapping.
//!
//! Every error response uses the same envelope:
//! `{"success": false, "message": "...", "errors": [...]}` where `errors`
//! is present only for validation failures with field-level detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::MineraError;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request payload failed validation.
    ValidationError,
    /// Login failed. The message never reveals which check failed.
    InvalidCredentials,
    /// Email already registered.
    DuplicateEmail,
    /// Missing or unusable access token.
    Unauthenticated,
    /// Authenticated but not authorized.
    Forbidden,
    /// Refresh token rejected.
    InvalidRefreshToken,
    /// Resource not found.
    NotFound,
    /// Unexpected server-side failure.
    InternalError,
}

impl ErrorCode {
    /// Map the error code to an HTTP status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ErrorCode::DuplicateEmail => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An API error carrying a code, a user-facing message, and optional
/// field-level detail.
#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub errors: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Login failure. Identical for unknown email, wrong password, and
    /// inactive accounts.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "Invalid credentials")
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated, message)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorCode::Forbidden, "Insufficient permissions")
    }

    pub fn invalid_refresh_token() -> Self {
        Self::new(ErrorCode::InvalidRefreshToken, "Invalid refresh token")
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("{} not found", resource.into()),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Validation failure with field-level detail.
    pub fn validation(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: message.into(),
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }

    /// Flatten validator errors into a complete list of messages.
    ///
    /// All failures are reported at once, not just the first.
    pub fn from_validation_errors(errors: &validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let msg = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                messages.push(msg);
            }
        }
        messages.sort();
        Self::validation("Validation failed", messages)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();

        if status.is_server_error() {
            tracing::error!("API error {:?}: {}", self.code, self.message);
        } else {
            tracing::debug!("API error {:?}: {}", self.code, self.message);
        }

        let body = ErrorBody {
            success: false,
            message: self.message,
            errors: self.errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<MineraError> for ApiError {
    fn from(e: MineraError) -> Self {
        match e {
            MineraError::Auth(msg) => ApiError::unauthenticated(msg),
            MineraError::Permission(_) => ApiError::forbidden(),
            MineraError::Validation(msg) => ApiError::validation(msg, Vec::new()),
            MineraError::NotFound(resource) => ApiError::not_found(resource),
            MineraError::Duplicate(resource) => ApiError::new(
                ErrorCode::DuplicateEmail,
                format!("{} already exists", resource),
            ),
            // Storage and I/O detail stays in the server log; clients get
            // a generic message
            other => {
                tracing::error!("internal error: {}", other);
                ApiError::internal("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ErrorCode::ValidationError.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::DuplicateEmail.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::InvalidRefreshToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_credentials_message() {
        let err = ApiError::invalid_credentials();
        assert_eq!(err.message, "Invalid credentials");
        assert!(err.errors.is_none());
    }

    #[test]
    fn test_validation_error_keeps_all_messages() {
        let err = ApiError::validation(
            "Validation failed",
            vec!["Email is invalid".to_string(), "Password too short".to_string()],
        );
        assert_eq!(err.errors.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_from_minera_error() {
        let err: ApiError = MineraError::NotFound("User".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "User not found");
    }

    #[test]
    fn test_database_error_detail_never_reaches_the_client() {
        let raw = "error returned from database: (code: 2067) \
                   UNIQUE constraint failed: users.email";
        let err: ApiError = MineraError::Database(raw.to_string()).into();

        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Internal server error");
        assert!(err.errors.is_none());
    }

    #[test]
    fn test_duplicate_maps_to_400() {
        let err: ApiError = MineraError::Duplicate("User".to_string()).into();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
        assert_eq!(err.code.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "User already exists");
    }
}
