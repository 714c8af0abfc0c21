//! Route table for the web API.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::web::dto::StatusResponse;
use crate::web::handlers::{auth, users};
use crate::web::middleware::{create_cors_layer, inject_state};
use crate::web::AppState;

/// Build the application router.
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me).patch(auth::update_me));

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/:id", get(users::get_user).delete(users::deactivate_user))
        .route("/:id/roles", post(users::assign_role))
        .route("/:id/roles/:role", delete(users::remove_role));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/usuarios", user_routes)
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn_with_state(state.clone(), inject_state)),
        )
        .with_state(state)
}

async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::ok("OK"))
}
