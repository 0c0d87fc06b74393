//! Login user model.
//!
//! # Invariants
//! - `username` is unique across all users.
//! - `role` is fixed at creation.
//! - `reference_id` is `None` for admins and points to the matching
//!   teacher/student record otherwise.

use super::{now_epoch_ms, UserId};
use serde::{Deserialize, Serialize};

/// Login role. Selects the session context after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Stable storage value, matching the `users.role` CHECK constraint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// Parses a storage value. Case-insensitive to accept typed input.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// Authenticated principal, without secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub reference_id: Option<i64>,
    /// Creation time, refreshed on every password change.
    pub created_at: i64,
}

/// What an admin may see about one stored credential.
///
/// Passwords are stored hashed, so no plaintext is ever available here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummary {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub reference_id: Option<i64>,
    pub password_changed_at: i64,
}

impl From<User> for CredentialSummary {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
            reference_id: user.reference_id,
            password_changed_at: user.created_at,
        }
    }
}

/// Single-use password reset token handed out by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: i64,
}

impl ResetToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= now_epoch_ms()
    }
}
