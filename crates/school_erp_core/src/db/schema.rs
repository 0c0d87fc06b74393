//! Schema creation and default admin seeding.
//!
//! # Invariants
//! - Every statement is `IF NOT EXISTS`; re-running is a no-op.
//! - Uniqueness of assignments and attendance triples is enforced by the
//!   schema, not by application check-then-insert.

use super::DbResult;
use crate::credential::{PasswordHash, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
use crate::model::now_epoch_ms;
use rusqlite::{params, Connection};

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables owned by the storage gateway.
pub const TABLES: &[&str] = &[
    "users",
    "teachers",
    "students",
    "subjects",
    "assignments",
    "attendance",
    "marks",
    "notices",
    "password_reset_tokens",
];

/// Creates all tables and indexes that are missing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Seeds the default admin when no admin user exists.
///
/// The existence check and the insert are one statement, so concurrent
/// first starts on a fresh store seed exactly one admin.
/// Returns `true` when a row was inserted.
pub fn ensure_default_admin(conn: &Connection) -> DbResult<bool> {
    let hash = PasswordHash::derive(DEFAULT_ADMIN_PASSWORD);
    let inserted = conn.execute(
        "INSERT INTO users (username, password_hash, password_salt, role, reference_id, created_at)
         SELECT ?1, ?2, ?3, 'admin', NULL, ?4
         WHERE NOT EXISTS (SELECT 1 FROM users WHERE role = 'admin');",
        params![
            DEFAULT_ADMIN_USERNAME,
            hash.digest,
            hash.salt,
            now_epoch_ms()
        ],
    )?;
    Ok(inserted == 1)
}
