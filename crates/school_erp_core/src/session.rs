//! Explicit login sessions and role contexts.
//!
//! # Responsibility
//! - Turn a verified login into a session value owned by the caller.
//! - Dispatch the session's role to an admin, teacher or student context.
//! - Gate teacher writes on the teacher's subject assignments.
//!
//! # Invariants
//! - There is no process-wide session; any number may coexist.
//! - A teacher context always acts as its own teacher record.
//! - A student context only reads its own records.

use crate::model::academic::Subject;
use crate::model::attendance::{AttendanceStatus, AttendanceView, RosterEntry, StudentAttendanceRow};
use crate::model::marks::{MarksRecord, MarksView, NewMarks};
use crate::model::notice::Notice;
use crate::model::people::{Student, Teacher};
use crate::model::user::{Role, User};
use crate::model::{MarksId, StudentId, SubjectId};
use crate::repo::attendance_repo::SqliteAttendanceRepository;
use crate::repo::directory_repo::{DirectoryRepository, SqliteDirectoryRepository};
use crate::repo::marks_repo::SqliteMarksRepository;
use crate::repo::notice_repo::SqliteNoticeRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::{RecordError, RecordResult};
use crate::service::attendance_service::AttendanceService;
use crate::service::auth_service::{AuthError, CredentialService};
use crate::service::credential_admin::CredentialAdmin;
use crate::service::directory_service::DirectoryService;
use crate::service::marks_service::MarksService;
use crate::service::notice_service::{NoticeService, DEFAULT_RECENT_NOTICES};
use chrono::NaiveDate;
use log::info;
use rusqlite::Connection;

/// One authenticated principal bound to a store connection.
pub struct Session<'conn> {
    conn: &'conn Connection,
    user: User,
}

impl<'conn> Session<'conn> {
    /// Authenticates and opens a session.
    ///
    /// # Errors
    /// - `InvalidCredentials` for any username/password mismatch.
    pub fn login(conn: &'conn Connection, username: &str, password: &str) -> Result<Self, AuthError> {
        let user = CredentialService::new(SqliteUserRepository::new(conn))
            .authenticate(username, password)?;
        Ok(Self { conn, user })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Resolves the role-specific context for this session.
    pub fn context(&self) -> Result<SessionContext<'conn>, AuthError> {
        dispatch(self.conn, &self.user)
    }

    /// Ends the session and hands back the principal.
    pub fn logout(self) -> User {
        info!(
            "event=auth_logout module=auth status=ok user_id={}",
            self.user.id
        );
        self.user
    }
}

/// Role-specific capability set.
pub enum SessionContext<'conn> {
    Admin(AdminContext<'conn>),
    Teacher(TeacherContext<'conn>),
    Student(StudentContext<'conn>),
}

impl SessionContext<'_> {
    pub fn role(&self) -> Role {
        match self {
            Self::Admin(_) => Role::Admin,
            Self::Teacher(_) => Role::Teacher,
            Self::Student(_) => Role::Student,
        }
    }
}

/// Maps a user's role to its context.
///
/// # Errors
/// - `MissingReference` when a teacher/student login has no directory record.
pub fn dispatch<'conn>(
    conn: &'conn Connection,
    user: &User,
) -> Result<SessionContext<'conn>, AuthError> {
    let directory = SqliteDirectoryRepository::new(conn);
    let missing = || AuthError::MissingReference {
        role: user.role,
        reference_id: user.reference_id,
    };

    match user.role {
        Role::Admin => Ok(SessionContext::Admin(AdminContext { conn })),
        Role::Teacher => {
            let reference_id = user.reference_id.ok_or_else(missing)?;
            let teacher = directory.get_teacher(reference_id)?.ok_or_else(missing)?;
            Ok(SessionContext::Teacher(TeacherContext { conn, teacher }))
        }
        Role::Student => {
            let reference_id = user.reference_id.ok_or_else(missing)?;
            let student = directory.get_student(reference_id)?.ok_or_else(missing)?;
            Ok(SessionContext::Student(StudentContext { conn, student }))
        }
    }
}

/// Administrator capabilities.
pub struct AdminContext<'conn> {
    conn: &'conn Connection,
}

impl<'conn> AdminContext<'conn> {
    pub fn directory(
        &self,
    ) -> DirectoryService<SqliteDirectoryRepository<'conn>, SqliteUserRepository<'conn>> {
        DirectoryService::new(
            SqliteDirectoryRepository::new(self.conn),
            SqliteUserRepository::new(self.conn),
        )
    }

    pub fn credentials(&self) -> CredentialAdmin<SqliteUserRepository<'conn>> {
        CredentialAdmin::new(SqliteUserRepository::new(self.conn))
    }

    pub fn notices(&self) -> NoticeService<SqliteNoticeRepository<'conn>> {
        NoticeService::new(SqliteNoticeRepository::new(self.conn))
    }

    pub fn attendance_report(&self) -> RecordResult<Vec<AttendanceView>> {
        AttendanceService::new(SqliteAttendanceRepository::new(self.conn)).list_all()
    }

    pub fn marks_report(&self) -> RecordResult<Vec<MarksView>> {
        MarksService::new(SqliteMarksRepository::new(self.conn)).list_all()
    }
}

/// Teacher capabilities, scoped to the teacher's assigned subjects.
pub struct TeacherContext<'conn> {
    conn: &'conn Connection,
    teacher: Teacher,
}

impl TeacherContext<'_> {
    pub fn teacher(&self) -> &Teacher {
        &self.teacher
    }

    pub fn assigned_subjects(&self) -> RecordResult<Vec<Subject>> {
        SqliteDirectoryRepository::new(self.conn).subjects_for_teacher(self.teacher.id)
    }

    /// All students with attendance on `date` and current marks for the subject.
    pub fn roster(&self, subject_id: SubjectId, date: NaiveDate) -> RecordResult<Vec<RosterEntry>> {
        self.ensure_assigned(subject_id)?;
        AttendanceService::new(SqliteAttendanceRepository::new(self.conn)).roster(subject_id, date)
    }

    pub fn toggle_attendance(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        date: NaiveDate,
    ) -> RecordResult<AttendanceStatus> {
        self.ensure_assigned(subject_id)?;
        AttendanceService::new(SqliteAttendanceRepository::new(self.conn)).toggle(
            student_id,
            subject_id,
            self.teacher.id,
            date,
        )
    }

    pub fn record_marks(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        marks: i64,
        exam_type: Option<&str>,
    ) -> RecordResult<MarksId> {
        self.ensure_assigned(subject_id)?;
        MarksService::new(SqliteMarksRepository::new(self.conn)).record_marks(&NewMarks {
            student_id,
            subject_id,
            teacher_id: self.teacher.id,
            marks,
            exam_type: exam_type.map(str::to_string),
        })
    }

    pub fn marks_history(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> RecordResult<Vec<MarksRecord>> {
        self.ensure_assigned(subject_id)?;
        MarksService::new(SqliteMarksRepository::new(self.conn)).history(student_id, subject_id)
    }

    pub fn recent_notices(&self) -> RecordResult<Vec<Notice>> {
        NoticeService::new(SqliteNoticeRepository::new(self.conn)).recent(DEFAULT_RECENT_NOTICES)
    }

    fn ensure_assigned(&self, subject_id: SubjectId) -> RecordResult<()> {
        if SqliteDirectoryRepository::new(self.conn).is_assigned(self.teacher.id, subject_id)? {
            return Ok(());
        }
        Err(RecordError::NotAssigned {
            teacher_id: self.teacher.id,
            subject_id,
        })
    }
}

/// Read-only student capabilities over the student's own records.
pub struct StudentContext<'conn> {
    conn: &'conn Connection,
    student: Student,
}

impl StudentContext<'_> {
    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn marks(&self) -> RecordResult<Vec<MarksView>> {
        MarksService::new(SqliteMarksRepository::new(self.conn)).list_for_student(self.student.id)
    }

    /// Recent attendance; `None` uses the dashboard default.
    pub fn attendance(&self, limit: Option<u32>) -> RecordResult<Vec<StudentAttendanceRow>> {
        AttendanceService::new(SqliteAttendanceRepository::new(self.conn))
            .list_for_student(self.student.id, limit)
    }

    pub fn recent_notices(&self) -> RecordResult<Vec<Notice>> {
        NoticeService::new(SqliteNoticeRepository::new(self.conn)).recent(DEFAULT_RECENT_NOTICES)
    }
}
