use minera::db::{seed_demo, Database};
use minera::web::WebServer;
use minera::{logging, Config, Result};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load config.toml ({}), using defaults", e);
            Config::default()
        }
    };

    logging::init(&config.logging)?;

    if config.auth.jwt_secret == "change-me-in-production" {
        warn!("Running with the default JWT secret; set [auth].jwt_secret");
    }

    let db = Database::open(&config.database.path).await?;

    if config.database.seed_demo {
        info!("Seeding demo users");
        seed_demo(&db).await?;
    }

    let server = WebServer::new(&config, db)?;
    server.run().await
}
