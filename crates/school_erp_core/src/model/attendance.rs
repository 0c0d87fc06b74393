//! Attendance ledger model.
//!
//! # Invariants
//! - At most one record exists per (student, subject, date).
//! - A first toggle produces `Present`; later toggles alternate.

use super::{AttendanceId, StudentId, SubjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Storage value, matching the `attendance.status` CHECK constraint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Present" => Some(Self::Present),
            "Absent" => Some(Self::Absent),
            _ => None,
        }
    }

    /// Status written on the first toggle of a triple.
    pub const FIRST_MARK: Self = Self::Present;

    /// Next status under toggle semantics.
    pub fn toggled(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent => Self::Present,
        }
    }
}

/// Observed attendance for one (student, subject, date) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    NotMarked,
    Marked(AttendanceStatus),
}

impl From<Option<AttendanceStatus>> for AttendanceState {
    fn from(value: Option<AttendanceStatus>) -> Self {
        value.map_or(Self::NotMarked, Self::Marked)
    }
}

/// Admin-facing attendance row with resolved names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceView {
    pub id: AttendanceId,
    pub student_name: String,
    pub subject_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    /// Name of the teacher who last toggled the record.
    pub marked_by: String,
}

/// Student-facing attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAttendanceRow {
    pub date: NaiveDate,
    pub subject_name: String,
    pub status: AttendanceStatus,
}

/// One line of the teacher roster for a subject and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student_id: StudentId,
    pub roll_no: String,
    pub name: String,
    pub subject_id: SubjectId,
    pub attendance: AttendanceState,
    pub current_marks: Option<i64>,
}
