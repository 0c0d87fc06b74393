//! Credential verification.
//!
//! # Invariants
//! - Unknown username and wrong password are indistinguishable to callers.
//! - Username comparison is exact and case-sensitive.
//! - Passwords never appear in logs or errors.

use crate::model::user::{Role, User};
use crate::model::validation::{require_text, ValidationError};
use crate::repo::user_repo::UserRepository;
use crate::repo::RecordError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from login and role dispatch.
#[derive(Debug)]
pub enum AuthError {
    /// Username/password pair did not match any user.
    InvalidCredentials,
    Validation(ValidationError),
    /// Teacher/student user whose directory record is missing.
    MissingReference {
        role: Role,
        reference_id: Option<i64>,
    },
    Record(RecordError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::MissingReference { role, reference_id } => match reference_id {
                Some(id) => write!(f, "{} record {id} not found", role.as_str()),
                None => write!(f, "{} login has no linked record", role.as_str()),
            },
            Self::Record(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Record(err) => Some(err),
            Self::InvalidCredentials | Self::MissingReference { .. } => None,
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RecordError> for AuthError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

/// Verifies username/password pairs.
pub struct CredentialService<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> CredentialService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Returns the matching user, or `InvalidCredentials`.
    ///
    /// Both inputs are trimmed; blank inputs are validation errors.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = require_text("username", username)?;
        let password = require_text("password", password)?;

        let matched = self
            .users
            .find_credential(&username)?
            .filter(|stored| stored.hash.verify(&password));

        match matched {
            Some(stored) => {
                info!(
                    "event=auth_login module=auth status=ok user_id={} role={}",
                    stored.user.id,
                    stored.user.role.as_str()
                );
                Ok(stored.user)
            }
            None => {
                warn!("event=auth_login module=auth status=error error_code=invalid_credentials");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
