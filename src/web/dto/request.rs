//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration request body.
///
/// The display name field is `nombre` on the wire; `name` is accepted as
/// an alias for older clients.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(rename = "nombre", alias = "name")]
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters"
    ))]
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Profile update request body. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(rename = "nombre", alias = "name", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters"
    ))]
    pub password: Option<String>,
}

/// Role assignment request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignRoleRequest {
    #[validate(length(min = 1, message = "Role name is required"))]
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_valid() {
        let req = LoginRequest::new("admin@mineria.com", "admin123");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_request_bad_email() {
        let req = LoginRequest::new("not-an-email", "admin123");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_request_short_password() {
        let req = LoginRequest::new("admin@mineria.com", "abc12");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_validates_all_fields() {
        let req = RegisterRequest::new("X", "not-an-email", "abc");
        let errors = req.validate().unwrap_err();

        // All three fields are reported at once
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn test_register_request_accepts_name_alias() {
        let json = r#"{"name": "Carlos", "email": "c@mineria.com", "password": "secret1"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Carlos");

        let json = r#"{"nombre": "Carlos", "email": "c@mineria.com", "password": "secret1"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Carlos");
    }

    #[test]
    fn test_register_request_serializes_nombre() {
        let req = RegisterRequest::new("Carlos", "c@mineria.com", "secret1");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("nombre").is_some());
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_refresh_request_wire_field() {
        let json = r#"{"refreshToken": "abc"}"#;
        let req: RefreshRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.refresh_token, "abc");
    }

    #[test]
    fn test_update_profile_empty_is_valid() {
        let req = UpdateProfileRequest::default();
        assert!(req.validate().is_ok());
    }
}
