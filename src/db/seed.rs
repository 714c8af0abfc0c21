//! Demo data seeding.
//!
//! Populates the canonical demo accounts used for local development and
//! staging environments. Idempotent: running twice leaves the data as-is.

use tracing::info;

use super::Database;
use crate::auth::hash_password;
use crate::{MineraError, Result};

struct DemoUser {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    roles: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        id: "admin-001",
        name: "Administrador",
        email: "admin@mineria.com",
        password: "admin123",
        roles: &["admin"],
    },
    DemoUser {
        id: "super-001",
        name: "Supervisor General",
        email: "supervisor@mineria.com",
        password: "super123",
        roles: &["supervisor"],
    },
    DemoUser {
        id: "oper-001",
        name: "Operador de Campo",
        email: "operador@mineria.com",
        password: "oper123",
        roles: &["operador"],
    },
    DemoUser {
        id: "tec-001",
        name: "Técnico de Mantenimiento",
        email: "tecnico@mineria.com",
        password: "tec123",
        roles: &["tecnico"],
    },
];

/// Seed the demo accounts.
///
/// Hashing runs on the blocking pool; Argon2 is deliberately slow.
pub async fn seed_demo(db: &Database) -> Result<()> {
    for demo in DEMO_USERS {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(demo.id)
            .fetch_one(db.pool())
            .await?;

        if exists {
            continue;
        }

        let password = demo.password.to_string();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| MineraError::Database(e.to_string()))?
            .map_err(|e| MineraError::Database(e.to_string()))?;

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash) VALUES (?, ?, ?, ?)",
        )
        .bind(demo.id)
        .bind(demo.name)
        .bind(demo.email)
        .bind(&hash)
        .execute(db.pool())
        .await?;

        for role in demo.roles {
            sqlx::query(
                "INSERT OR IGNORE INTO user_roles (user_id, role_id)
                 SELECT ?, id FROM roles WHERE name = ?",
            )
            .bind(demo.id)
            .bind(role)
            .execute(db.pool())
            .await?;
        }

        info!("Seeded demo user {} ({})", demo.id, demo.email);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::UserRepository;

    #[tokio::test]
    async fn test_seed_demo_users() {
        let db = Database::open_in_memory().await.unwrap();
        seed_demo(&db).await.unwrap();

        let repo = UserRepository::new(db.pool());

        let admin = repo.get_by_id("admin-001").await.unwrap().unwrap();
        assert_eq!(admin.email, "admin@mineria.com");
        assert!(verify_password("admin123", &admin.password_hash).is_ok());
        assert_eq!(
            repo.roles_for_user("admin-001").await.unwrap(),
            vec!["admin"]
        );

        let tecnico = repo.get_by_id("tec-001").await.unwrap().unwrap();
        assert!(tecnico.is_active);
        assert_eq!(
            repo.roles_for_user("tec-001").await.unwrap(),
            vec!["tecnico"]
        );
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        seed_demo(&db).await.unwrap();
        seed_demo(&db).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 4);
    }
}
