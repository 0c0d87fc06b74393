//! Marks ledger model.
//!
//! Marks history is append-only: every update is a new row.

use super::validation::{check_marks, ValidationError};
use super::{MarksId, StudentId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksRecord {
    pub id: MarksId,
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub marks: i64,
    pub exam_type: Option<String>,
    pub created_at: i64,
}

/// Input for `record_marks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMarks {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub marks: i64,
    pub exam_type: Option<String>,
}

impl NewMarks {
    /// Checks the marks range and folds a blank exam type into `None`.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        let exam_type = self
            .exam_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Ok(Self {
            marks: check_marks(self.marks)?,
            exam_type,
            ..self.clone()
        })
    }
}

/// Marks row joined with display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksView {
    pub id: MarksId,
    pub student_name: String,
    pub subject_name: String,
    pub marks: i64,
    pub exam_type: Option<String>,
    /// Teacher name, or `Admin` when the teacher record is gone.
    pub recorded_by: String,
    pub created_at: i64,
}
