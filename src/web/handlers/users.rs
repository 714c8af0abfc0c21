//! User administration endpoints.
//!
//! All routes here require the admin role.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use crate::db::UserRepository;
use crate::web::dto::{ApiResponse, AssignRoleRequest, StatusResponse, UserDetail, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;
use crate::web::AppState;

/// GET /usuarios
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    current.require_any_role(&["admin"])?;

    let repo = UserRepository::new(state.db.pool());
    let users = repo.list().await?;

    let mut details = Vec::with_capacity(users.len());
    for user in &users {
        let roles = repo.roles_for_user(&user.id).await?;
        details.push(UserDetail::from_user(user, roles));
    }

    Ok(Json(ApiResponse::new(details)))
}

/// GET /usuarios/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    current.require_any_role(&["admin"])?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    let roles = repo.roles_for_user(&user.id).await?;

    Ok(Json(ApiResponse::new(UserDetail::from_user(&user, roles))))
}

/// DELETE /usuarios/:id
///
/// Soft delete: the account is deactivated, not removed. Any outstanding
/// tokens for the user stop working on their next request.
pub async fn deactivate_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    current.require_any_role(&["admin"])?;

    let repo = UserRepository::new(state.db.pool());
    if !repo.deactivate(&id).await? {
        return Err(ApiError::not_found("User"));
    }

    info!("User {} deactivated by {}", id, current.id);

    Ok(Json(StatusResponse::ok("User deactivated")))
}

/// POST /usuarios/:id/roles
pub async fn assign_role(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<AssignRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    current.require_any_role(&["admin"])?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    if !repo.assign_role(&user.id, &req.role).await? {
        return Err(ApiError::not_found("Role"));
    }

    info!("Role {} assigned to {} by {}", req.role, id, current.id);

    let roles = repo.roles_for_user(&user.id).await?;
    Ok(Json(ApiResponse::with_message(
        UserDetail::from_user(&user, roles),
        "Role assigned",
    )))
}

/// DELETE /usuarios/:id/roles/:role
pub async fn remove_role(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path((id, role)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    current.require_any_role(&["admin"])?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    repo.remove_role(&user.id, &role).await?;

    info!("Role {} removed from {} by {}", role, id, current.id);

    let roles = repo.roles_for_user(&user.id).await?;
    Ok(Json(ApiResponse::with_message(
        UserDetail::from_user(&user, roles),
        "Role removed",
    )))
}
