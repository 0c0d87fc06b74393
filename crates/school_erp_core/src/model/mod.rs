//! Domain model for school records.
//!
//! # Responsibility
//! - Define canonical records for people, academic structure, attendance,
//!   marks, notices and login credentials.
//! - Validate user-supplied input before it reaches persistence.
//!
//! # Invariants
//! - Records are never hard-deleted; only passwords and attendance status
//!   are mutated in place.
//! - Timestamps are Unix epoch milliseconds.

pub mod academic;
pub mod attendance;
pub mod marks;
pub mod notice;
pub mod people;
pub mod user;
pub mod validation;

pub type UserId = i64;
pub type TeacherId = i64;
pub type StudentId = i64;
pub type SubjectId = i64;
pub type AssignmentId = i64;
pub type AttendanceId = i64;
pub type MarksId = i64;
pub type NoticeId = i64;

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's calendar date in local time.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
