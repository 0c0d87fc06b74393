//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per record family.
//! - Isolate SQLite query details from service/business orchestration.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Repository writes receive already-normalized input from services.
//! - Unique violations surface as `DuplicateKey`, foreign key violations as
//!   `NotFound`, never as raw store errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod attendance_repo;
pub mod directory_repo;
pub mod marks_repo;
pub mod notice_repo;
pub mod user_repo;

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::{StudentId, SubjectId, TeacherId, UserId};
use chrono::NaiveDate;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RecordResult<T> = Result<T, RecordError>;

/// Identifies the record a lookup or reference failed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    User(UserId),
    Teacher(TeacherId),
    Student(StudentId),
    Subject(SubjectId),
    ResetToken,
    /// Foreign key target rejected by the store.
    Reference,
}

impl Display for RecordRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Teacher(id) => write!(f, "teacher {id}"),
            Self::Student(id) => write!(f, "student {id}"),
            Self::Subject(id) => write!(f, "subject {id}"),
            Self::ResetToken => write!(f, "reset token"),
            Self::Reference => write!(f, "referenced record"),
        }
    }
}

/// Error taxonomy for record operations.
#[derive(Debug)]
pub enum RecordError {
    Validation(ValidationError),
    /// Unique constraint violation; carries the constraint columns.
    DuplicateKey(String),
    NotFound(RecordRef),
    /// Teacher tried to write for a subject not assigned to them.
    NotAssigned {
        teacher_id: TeacherId,
        subject_id: SubjectId,
    },
    Store(DbError),
    InvalidData(String),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey(constraint) => write!(f, "duplicate value for {constraint}"),
            Self::NotFound(target) => write!(f, "{target} not found"),
            Self::NotAssigned {
                teacher_id,
                subject_id,
            } => write!(
                f,
                "subject {subject_id} is not assigned to teacher {teacher_id}"
            ),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::DuplicateKey(_)
            | Self::NotFound(_)
            | Self::NotAssigned { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RecordError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RecordError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for RecordError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::DuplicateKey(constraint_columns(message.as_deref()));
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return Self::NotFound(RecordRef::Reference);
                }
                _ => {}
            }
        }
        Self::Store(DbError::Sqlite(value))
    }
}

/// Extracts `table.column` list from "UNIQUE constraint failed: ..." messages.
fn constraint_columns(message: Option<&str>) -> String {
    message
        .and_then(|text| text.split_once(": "))
        .map(|(_, columns)| columns.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str, column: &str) -> RecordResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RecordError::InvalidData(format!("invalid date `{value}` in {column}")))
}
