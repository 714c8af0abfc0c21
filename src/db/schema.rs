//! Database schema and migrations for minera.
//!
//! Each migration is a SQL script executed in order; the schema_version
//! table tracks which migrations have been applied.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users, roles, and role assignments
    r#"
-- Users table for authentication
CREATE TABLE users (
    id            TEXT PRIMARY KEY,                -- opaque uuid
    name          TEXT NOT NULL,
    email         TEXT NOT NULL COLLATE NOCASE UNIQUE,
    password_hash TEXT NOT NULL,                   -- Argon2 hash
    is_active     INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_email_nocase ON users(email COLLATE NOCASE);

-- Flat capability tags; no hierarchy between roles
CREATE TABLE roles (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE user_roles (
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    role_id INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, role_id)
);

CREATE INDEX idx_user_roles_user_id ON user_roles(user_id);
"#,
    // v2: Seed the role catalog
    r#"
INSERT INTO roles (name, description) VALUES
    ('admin', 'Administrador del sistema'),
    ('supervisor', 'Supervisor de operaciones'),
    ('operador', 'Operador de campo'),
    ('tecnico', 'Técnico de mantenimiento');
"#,
];
