//! Shared harness for web API integration tests.

use std::sync::Arc;

use axum_test::TestServer;
use minera::auth::TokenService;
use minera::db::{seed_demo, Database, UserRepository};
use minera::web::{create_router, AppState};
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "test-secret";

pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub tokens: TokenService,
}

/// Start an app backed by a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    let db = Database::open_in_memory().await.unwrap();
    let tokens = TokenService::new(TEST_SECRET, 86_400, 7);
    let state = Arc::new(AppState::new(db.clone(), tokens.clone()));
    let server = TestServer::new(create_router(state, &[])).unwrap();

    TestApp { server, db, tokens }
}

/// Start an app with the demo accounts seeded.
pub async fn spawn_seeded_app() -> TestApp {
    let app = spawn_app().await;
    seed_demo(&app.db).await.unwrap();
    app
}

impl TestApp {
    /// Register a user through the API and return (user_id, access, refresh).
    pub async fn register(&self, name: &str, email: &str, password: &str) -> (String, String, String) {
        let response = self
            .server
            .post("/auth/register")
            .json(&json!({"nombre": name, "email": email, "password": password}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        (
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
            body["data"]["accessToken"].as_str().unwrap().to_string(),
            body["data"]["refreshToken"].as_str().unwrap().to_string(),
        )
    }

    /// Log in through the API and return (access, refresh).
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .server
            .post("/auth/login")
            .json(&json!({"email": email, "password": password}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        (
            body["data"]["accessToken"].as_str().unwrap().to_string(),
            body["data"]["refreshToken"].as_str().unwrap().to_string(),
        )
    }

    /// Grant a role directly through the repository.
    pub async fn grant_role(&self, user_id: &str, role: &str) {
        let repo = UserRepository::new(self.db.pool());
        assert!(repo.assign_role(user_id, role).await.unwrap());
    }
}
