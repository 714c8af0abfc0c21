//! Session middleware.
//!
//! `CurrentUser` is an extractor that authenticates the request from its
//! Bearer access token and resolves the live user record. Authorization
//! is a separate, explicit step (`require_any_role`) so handlers state
//! their requirements at the top.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::{TokenError, TokenType};
use crate::db::UserRepository;
use crate::web::error::ApiError;
use crate::web::AppState;

/// Middleware that injects shared state into request extensions so
/// extractors can reach it.
pub async fn inject_state(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    req.extensions_mut().insert(state);
    next.run(req).await
}

/// The authenticated user attached to a request.
///
/// Extraction fails with 401 when the token is missing, expired, invalid,
/// or when the user no longer exists or has been deactivated. Token
/// validity alone is not enough: the user row is consulted on every
/// request, so deactivation takes effect immediately.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl CurrentUser {
    /// Check whether the user holds a given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Require at least one of the listed roles.
    pub fn require_any_role(&self, allowed: &[&str]) -> Result<(), ApiError> {
        if allowed.iter().any(|role| self.has_role(role)) {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = parts
            .extensions
            .get::<Arc<AppState>>()
            .ok_or_else(|| ApiError::internal("Application state missing"))?
            .clone();

        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::unauthenticated("Access token required"))?;

        let claims = state
            .tokens
            .verify(token, TokenType::Access)
            .map_err(|e| match e {
                TokenError::Expired => ApiError::unauthenticated("Token expired"),
                _ => ApiError::unauthenticated("Invalid token"),
            })?;

        let repo = UserRepository::new(state.db.pool());
        let user = repo
            .get_by_id(&claims.sub)
            .await
            .map_err(ApiError::from)?
            .filter(|u| u.is_active)
            .ok_or_else(|| ApiError::unauthenticated("User not found or inactive"))?;

        let roles = repo.roles_for_user(&user.id).await.map_err(ApiError::from)?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
            roles,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
