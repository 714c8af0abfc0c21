//! User repository: CRUD and role assignment over the SQLite pool.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::user::{NewUser, Role, User, UserUpdate};
use crate::{MineraError, Result};

/// Repository for user and role operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a repository over a connection pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user and return it.
    ///
    /// The caller is responsible for hashing the password beforehand.
    /// A concurrent insert of the same email loses the race at the UNIQUE
    /// constraint and surfaces as `Duplicate`, not a raw database error.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                MineraError::Duplicate("User".to_string())
            } else {
                e.into()
            }
        })?;

        debug!("Created user {} ({})", id, new_user.email);

        self.get_by_id(&id)
            .await?
            .ok_or_else(|| MineraError::Database("user vanished after insert".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// Check whether an email is already registered (case-insensitive).
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? COLLATE NOCASE)",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// List all users, ordered by creation time.
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at, id")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Apply a partial update to a user.
    ///
    /// Returns the updated user, or None if no user with that ID exists.
    /// An empty update writes nothing and leaves updated_at untouched.
    pub async fn update(&self, id: &str, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }
        if self.get_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE users SET updated_at = datetime('now')");

        if let Some(name) = &update.name {
            builder.push(", name = ").push_bind(name);
        }
        if let Some(hash) = &update.password_hash {
            builder.push(", password_hash = ").push_bind(hash);
        }
        if let Some(is_active) = update.is_active {
            builder.push(", is_active = ").push_bind(is_active);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.build().execute(self.pool).await?;

        self.get_by_id(id).await
    }

    /// Mark a user as inactive.
    ///
    /// Returns true if the user existed.
    pub async fn deactivate(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET is_active = 0, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get the role names assigned to a user.
    pub async fn roles_for_user(&self, user_id: &str) -> Result<Vec<String>> {
        let roles: Vec<String> = sqlx::query_scalar(
            "SELECT r.name FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = ?
             ORDER BY r.id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(roles)
    }

    /// Find a role by name.
    pub async fn find_role(&self, name: &str) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;
        Ok(role)
    }

    /// Assign a role to a user. Idempotent.
    ///
    /// Returns false if no role with that name exists.
    pub async fn assign_role(&self, user_id: &str, role_name: &str) -> Result<bool> {
        let Some(role) = self.find_role(role_name).await? else {
            return Ok(false);
        };

        sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(role.id)
            .execute(self.pool)
            .await?;

        debug!("Assigned role {} to user {}", role_name, user_id);
        Ok(true)
    }

    /// Remove a role from a user.
    ///
    /// Returns true if the assignment existed.
    pub async fn remove_role(&self, user_id: &str, role_name: &str) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM user_roles
             WHERE user_id = ? AND role_id = (SELECT id FROM roles WHERE name = ?)",
        )
        .bind(user_id)
        .bind(role_name)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
