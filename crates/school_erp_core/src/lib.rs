//! Core records layer for the school ERP.
//! This crate is the single source of truth for business invariants:
//! credential checks, role dispatch, attendance toggling, marks history
//! and the referential rules tying people to academic records.

pub mod config;
pub mod credential;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use config::AppConfig;
pub use db::{initialize, open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::academic::{AssignmentView, NewSubject, Subject};
pub use model::attendance::{
    AttendanceState, AttendanceStatus, AttendanceView, RosterEntry, StudentAttendanceRow,
};
pub use model::marks::{MarksRecord, MarksView, NewMarks};
pub use model::notice::Notice;
pub use model::people::{NewStudent, NewTeacher, Student, Teacher};
pub use model::user::{CredentialSummary, ResetToken, Role, User};
pub use model::validation::ValidationError;
pub use model::{
    AssignmentId, AttendanceId, MarksId, NoticeId, StudentId, SubjectId, TeacherId, UserId,
};
pub use repo::{RecordError, RecordRef, RecordResult};
pub use service::attendance_service::AttendanceService;
pub use service::auth_service::{AuthError, CredentialService};
pub use service::credential_admin::CredentialAdmin;
pub use service::directory_service::DirectoryService;
pub use service::marks_service::MarksService;
pub use service::notice_service::NoticeService;
pub use session::{
    dispatch, AdminContext, Session, SessionContext, StudentContext, TeacherContext,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
