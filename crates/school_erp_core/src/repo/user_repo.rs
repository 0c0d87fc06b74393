//! Login credential repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist users with hashed passwords.
//! - Store and redeem single-use password reset tokens.
//!
//! # Invariants
//! - Username lookup is exact and case-sensitive (BINARY collation).
//! - Every password write refreshes `created_at` as the last-changed marker.
//! - Token redemption updates the password and consumes the token atomically.

use super::{RecordError, RecordRef, RecordResult};
use crate::credential::PasswordHash;
use crate::model::user::{ResetToken, Role, User};
use crate::model::{now_epoch_ms, UserId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    username,
    role,
    reference_id,
    created_at,
    password_hash,
    password_salt
FROM users";

/// User row together with its stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub user: User,
    pub hash: PasswordHash,
}

/// Repository interface for users and credentials.
pub trait UserRepository {
    fn create_user(
        &self,
        username: &str,
        hash: &PasswordHash,
        role: Role,
        reference_id: Option<i64>,
    ) -> RecordResult<UserId>;
    fn find_credential(&self, username: &str) -> RecordResult<Option<StoredCredential>>;
    fn get_user(&self, id: UserId) -> RecordResult<Option<User>>;
    /// Lists users, most recently created/changed first.
    fn list_users(&self) -> RecordResult<Vec<User>>;
    fn set_password(&self, id: UserId, hash: &PasswordHash) -> RecordResult<()>;
    fn insert_reset_token(&self, token: &ResetToken) -> RecordResult<()>;
    /// Applies `hash` to the token owner and consumes the token.
    fn redeem_reset_token(&self, token: &str, hash: &PasswordHash) -> RecordResult<UserId>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(
        &self,
        username: &str,
        hash: &PasswordHash,
        role: Role,
        reference_id: Option<i64>,
    ) -> RecordResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (
                username,
                password_hash,
                password_salt,
                role,
                reference_id,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                username,
                hash.digest.as_str(),
                hash.salt.as_str(),
                role.as_str(),
                reference_id,
                now_epoch_ms(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_credential(&self, username: &str) -> RecordResult<Option<StoredCredential>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE username = ?1;"))?;
        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            let user = parse_user_row(row)?;
            let hash = PasswordHash {
                salt: row.get("password_salt")?,
                digest: row.get("password_hash")?,
            };
            return Ok(Some(StoredCredential { user, hash }));
        }
        Ok(None)
    }

    fn get_user(&self, id: UserId) -> RecordResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn list_users(&self) -> RecordResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL} ORDER BY created_at DESC, user_id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }

    fn set_password(&self, id: UserId, hash: &PasswordHash) -> RecordResult<()> {
        let changed = self.conn.execute(
            "UPDATE users
             SET
                password_hash = ?1,
                password_salt = ?2,
                created_at = ?3
             WHERE user_id = ?4;",
            params![hash.digest.as_str(), hash.salt.as_str(), now_epoch_ms(), id],
        )?;

        if changed == 0 {
            return Err(RecordError::NotFound(RecordRef::User(id)));
        }
        Ok(())
    }

    fn insert_reset_token(&self, token: &ResetToken) -> RecordResult<()> {
        let changed = self.conn.execute(
            "INSERT INTO password_reset_tokens (token, user_id, created_at, expires_at)
             SELECT ?1, user_id, ?3, ?4
             FROM users
             WHERE user_id = ?2;",
            params![
                token.token.as_str(),
                token.user_id,
                now_epoch_ms(),
                token.expires_at
            ],
        )?;

        if changed == 0 {
            return Err(RecordError::NotFound(RecordRef::User(token.user_id)));
        }
        Ok(())
    }

    fn redeem_reset_token(&self, token: &str, hash: &PasswordHash) -> RecordResult<UserId> {
        let now = now_epoch_ms();
        let tx = self.conn.unchecked_transaction()?;
        let user_id: Option<UserId> = tx
            .query_row(
                "SELECT user_id
                 FROM password_reset_tokens
                 WHERE token = ?1
                   AND consumed_at IS NULL
                   AND expires_at > ?2;",
                params![token, now],
                |row| row.get(0),
            )
            .optional()?;
        let Some(user_id) = user_id else {
            return Err(RecordError::NotFound(RecordRef::ResetToken));
        };

        tx.execute(
            "UPDATE users
             SET
                password_hash = ?1,
                password_salt = ?2,
                created_at = ?3
             WHERE user_id = ?4;",
            params![hash.digest.as_str(), hash.salt.as_str(), now, user_id],
        )?;
        tx.execute(
            "UPDATE password_reset_tokens SET consumed_at = ?1 WHERE token = ?2;",
            params![now, token],
        )?;
        tx.commit()?;
        Ok(user_id)
    }
}

fn parse_user_row(row: &Row<'_>) -> RecordResult<User> {
    let role_text: String = row.get("role")?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        RecordError::InvalidData(format!("invalid role `{role_text}` in users.role"))
    })?;

    Ok(User {
        id: row.get("user_id")?,
        username: row.get("username")?,
        role,
        reference_id: row.get("reference_id")?,
        created_at: row.get("created_at")?,
    })
}
