//! Input validation shared by every write path.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Inclusive upper bound for a marks value.
pub const MARKS_MAX: i64 = 100;

/// Validation failure for user-supplied input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is blank after trim.
    EmptyField(&'static str),
    /// Marks value outside `0..=100`.
    MarksOutOfRange(i64),
    /// Role not accepted for the requested operation.
    InvalidRole(String),
    /// Requested list size must be positive.
    InvalidLimit(u32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` is required"),
            Self::MarksOutOfRange(value) => {
                write!(f, "marks must be between 0 and {MARKS_MAX}, got {value}")
            }
            Self::InvalidRole(role) => write!(f, "role `{role}` is not allowed here"),
            Self::InvalidLimit(limit) => write!(f, "limit must be positive, got {limit}"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Rejects marks outside `0..=MARKS_MAX`.
pub fn check_marks(marks: i64) -> Result<i64, ValidationError> {
    if !(0..=MARKS_MAX).contains(&marks) {
        return Err(ValidationError::MarksOutOfRange(marks));
    }
    Ok(marks)
}
