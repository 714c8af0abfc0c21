//! Response DTOs.
//!
//! Successful responses share the `{success, message?, data}` envelope;
//! token fields are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::db::User;

/// Generic success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Dataless status response (e.g. logout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Public user representation embedded in auth responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl UserProfile {
    /// Build a profile from a user row and its resolved roles.
    pub fn from_user(user: &User, roles: Vec<String>) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            roles,
        }
    }
}

/// Full user representation for profile and admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub activo: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl UserDetail {
    pub fn from_user(user: &User, roles: Vec<String>) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            roles,
            activo: user.is_active,
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}

/// Login and registration payload: both tokens plus the user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub user: UserProfile,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Refresh payload: a new access token only. The refresh token is not
/// rotated and is deliberately absent from this payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshData {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_omits_absent_message() {
        let resp = ApiResponse::new(42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_envelope_with_message() {
        let resp = ApiResponse::with_message(1, "Login successful");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["message"], "Login successful");
    }

    #[test]
    fn test_auth_data_wire_fields() {
        let data = AuthData {
            user: UserProfile {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                email: "ana@mineria.com".to_string(),
                roles: vec![],
            },
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["accessToken"], "at");
        assert_eq!(json["refreshToken"], "rt");
        assert_eq!(json["user"]["nombre"], "Ana");
    }

    #[test]
    fn test_refresh_data_has_no_refresh_token() {
        let data = RefreshData {
            access_token: "at".to_string(),
            user: UserProfile {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                email: "ana@mineria.com".to_string(),
                roles: vec![],
            },
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["accessToken"], "at");
        assert!(json.get("refreshToken").is_none());
    }
}
