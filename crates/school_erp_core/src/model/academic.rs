//! Subjects and teacher-subject assignments.
//!
//! # Invariants
//! - `Subject::code` is unique.
//! - At most one assignment exists per (teacher, subject) pair.

use super::validation::{require_text, ValidationError};
use super::{AssignmentId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    pub code: String,
}

impl NewSubject {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("subject_name", &self.name)?,
            code: require_text("subject_code", &self.code)?,
        })
    }
}

/// Assignment row joined with display names for the admin view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentView {
    pub id: AssignmentId,
    pub teacher_id: TeacherId,
    pub teacher_name: String,
    pub subject_id: SubjectId,
    pub subject_name: String,
}
