//! Session endpoints: login, registration, refresh, logout, profile.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{debug, info};

use crate::auth::{hash_password, verify_password, TokenType};
use crate::db::{NewUser, UserRepository, UserUpdate};
use crate::web::dto::{
    ApiResponse, AuthData, LoginRequest, RefreshData, RefreshRequest, RegisterRequest,
    StatusResponse, UpdateProfileRequest, UserDetail, UserProfile, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorCode};
use crate::web::middleware::CurrentUser;
use crate::web::AppState;

/// POST /auth/login
///
/// Unknown email, wrong password, and deactivated accounts all produce
/// the same response, so callers cannot probe which emails exist.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.db.pool());

    let Some(user) = repo
        .get_by_email(&req.email)
        .await?
        .filter(|u| u.is_active)
    else {
        debug!("Login rejected for {}", req.email);
        return Err(ApiError::invalid_credentials());
    };

    // Argon2 verification is CPU-bound; keep it off the async runtime
    let hash = user.password_hash.clone();
    let password = req.password;
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    if verified.is_err() {
        debug!("Login rejected for {}", req.email);
        return Err(ApiError::invalid_credentials());
    }

    let roles = repo.roles_for_user(&user.id).await?;
    let access_token = issue(&state, |t| t.issue_access(&user.id))?;
    let refresh_token = issue(&state, |t| t.issue_refresh(&user.id))?;

    info!("User {} logged in", user.id);

    Ok(Json(ApiResponse::with_message(
        AuthData {
            user: UserProfile::from_user(&user, roles),
            access_token,
            refresh_token,
        },
        "Login successful",
    )))
}

/// POST /auth/register
///
/// New accounts start active with an empty role set; an administrator
/// grants roles afterwards.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.db.pool());

    if repo.email_exists(&req.email).await? {
        return Err(ApiError::new(ErrorCode::DuplicateEmail, "User already exists"));
    }

    let password = req.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(|e| ApiError::validation(e.to_string(), Vec::new()))?;

    let user = repo
        .create(&NewUser::new(&req.name, &req.email, hash))
        .await?;

    let access_token = issue(&state, |t| t.issue_access(&user.id))?;
    let refresh_token = issue(&state, |t| t.issue_refresh(&user.id))?;

    info!("User {} registered ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            AuthData {
                user: UserProfile::from_user(&user, Vec::new()),
                access_token,
                refresh_token,
            },
            "User registered successfully",
        )),
    ))
}

/// POST /auth/refresh
///
/// Verifies the refresh token and mints a fresh access token. The refresh
/// token is not rotated: the same one stays valid until its own expiry,
/// so concurrent refreshes cannot invalidate each other.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = state
        .tokens
        .verify(&req.refresh_token, TokenType::Refresh)
        .map_err(|_| ApiError::invalid_refresh_token())?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(&claims.sub)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(ApiError::invalid_refresh_token)?;

    let roles = repo.roles_for_user(&user.id).await?;
    let access_token = issue(&state, |t| t.issue_access(&user.id))?;

    debug!("Issued new access token for {}", user.id);

    Ok(Json(ApiResponse::new(RefreshData {
        access_token,
        user: UserProfile::from_user(&user, roles),
    })))
}

/// POST /auth/logout
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// client discards its session. The endpoint exists so clients have a
/// uniform sign-out call.
pub async fn logout(user: CurrentUser) -> impl IntoResponse {
    info!("User {} logged out", user.id);
    Json(StatusResponse::ok("Logout successful"))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(&current.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(ApiResponse::new(UserDetail::from_user(
        &user,
        current.roles,
    ))))
}

/// PATCH /auth/me
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut update = UserUpdate::new();

    if let Some(name) = req.name {
        update = update.name(name);
    }
    if let Some(password) = req.password {
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .map_err(|e| ApiError::validation(e.to_string(), Vec::new()))?;
        update = update.password_hash(hash);
    }

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .update(&current.id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    info!("User {} updated their profile", user.id);

    Ok(Json(ApiResponse::with_message(
        UserDetail::from_user(&user, current.roles),
        "Profile updated",
    )))
}

fn issue<F>(state: &AppState, f: F) -> Result<String, ApiError>
where
    F: FnOnce(&crate::auth::TokenService) -> Result<String, crate::auth::TokenError>,
{
    f(&state.tokens).map_err(|e| ApiError::internal(e.to_string()))
}
