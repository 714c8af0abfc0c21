//! Web server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::auth::TokenService;
use crate::config::Config;
use crate::db::Database;
use crate::web::{create_router, AppState};
use crate::Result;

/// The web server hosting the session and user administration API.
pub struct WebServer {
    state: Arc<AppState>,
    cors_origins: Vec<String>,
    addr: SocketAddr,
}

impl WebServer {
    /// Create a server from the application configuration.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let tokens = TokenService::new(
            &config.auth.jwt_secret,
            config.auth.access_token_expiry_secs,
            config.auth.refresh_token_expiry_days,
        );

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                crate::MineraError::Config(format!("invalid server address: {}", e))
            })?;

        Ok(Self {
            state: Arc::new(AppState::new(db, tokens)),
            cors_origins: config.server.cors_origins.clone(),
            addr,
        })
    }

    /// Run the server until the task is cancelled.
    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state, &self.cors_origins);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await?;
        Ok(())
    }
}
