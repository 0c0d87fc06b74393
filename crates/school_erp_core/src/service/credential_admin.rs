//! Admin credential management.
//!
//! # Responsibility
//! - List stored credentials without secret material.
//! - Reset passwords directly or through single-use reset tokens.
//!
//! # Invariants
//! - Plaintext passwords are never stored, returned or logged.
//! - Every password change refreshes the user's `created_at` marker.

use crate::credential::{new_reset_token, PasswordHash};
use crate::model::user::{CredentialSummary, ResetToken};
use crate::model::validation::require_text;
use crate::model::{now_epoch_ms, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::{RecordError, RecordRef, RecordResult};
use log::info;

/// Reset token lifetime.
pub const RESET_TOKEN_TTL_MS: i64 = 24 * 60 * 60 * 1000;

pub struct CredentialAdmin<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> CredentialAdmin<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// All credentials, most recently changed first.
    pub fn list_credentials(&self) -> RecordResult<Vec<CredentialSummary>> {
        Ok(self
            .users
            .list_users()?
            .into_iter()
            .map(CredentialSummary::from)
            .collect())
    }

    /// Shows one credential's metadata. The password itself is not recoverable.
    pub fn reveal(&self, user_id: UserId) -> RecordResult<CredentialSummary> {
        let user = self
            .users
            .get_user(user_id)?
            .ok_or(RecordError::NotFound(RecordRef::User(user_id)))?;
        info!("event=credential_reveal module=credential status=ok user_id={user_id}");
        Ok(user.into())
    }

    /// Overwrites the password under a fresh salt.
    pub fn reset(&self, user_id: UserId, new_password: &str) -> RecordResult<()> {
        let new_password = require_text("password", new_password)?;
        self.users
            .set_password(user_id, &PasswordHash::derive(&new_password))?;
        info!("event=credential_reset module=credential status=ok user_id={user_id}");
        Ok(())
    }

    /// Issues a single-use token the user can redeem within 24 hours.
    pub fn issue_reset_token(&self, user_id: UserId) -> RecordResult<ResetToken> {
        let token = ResetToken {
            token: new_reset_token(),
            user_id,
            expires_at: now_epoch_ms() + RESET_TOKEN_TTL_MS,
        };
        self.users.insert_reset_token(&token)?;
        info!("event=reset_token_issue module=credential status=ok user_id={user_id}");
        Ok(token)
    }

    /// Sets a new password using a reset token.
    ///
    /// # Errors
    /// - `NotFound(ResetToken)` for unknown, expired or already used tokens.
    pub fn redeem_reset_token(&self, token: &str, new_password: &str) -> RecordResult<UserId> {
        let new_password = require_text("password", new_password)?;
        let user_id = self
            .users
            .redeem_reset_token(token.trim(), &PasswordHash::derive(&new_password))?;
        info!("event=reset_token_redeem module=credential status=ok user_id={user_id}");
        Ok(user_id)
    }
}
