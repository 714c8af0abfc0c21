//! User and role models.

/// User entity representing a registered account.
///
/// The password hash never leaves the db layer: response DTOs are built
/// from the other fields only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Stable opaque ID (uuid).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address (unique, case-insensitive).
    pub email: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Role entity: a coarse capability tag.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Role {
    /// Role ID.
    pub id: i64,
    /// Role name (e.g. "admin", "tecnico").
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password hash (pre-hashed with Argon2).
    pub password_hash: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Data for updating an existing user.
///
/// Only fields that are set will be modified.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New password hash (if changing password).
    pub password_hash: Option<String>,
    /// New active status.
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new password hash.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Set active status.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password_hash.is_none() && self.is_active.is_none()
    }
}
