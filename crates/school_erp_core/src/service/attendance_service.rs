//! Attendance ledger use-case service.

use crate::model::attendance::{
    AttendanceState, AttendanceStatus, AttendanceView, RosterEntry, StudentAttendanceRow,
};
use crate::model::validation::ValidationError;
use crate::model::{StudentId, SubjectId, TeacherId};
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::RecordResult;
use chrono::NaiveDate;
use log::info;

/// Rows shown on the student attendance view when no limit is given.
pub const DEFAULT_STUDENT_ATTENDANCE_LIMIT: u32 = 20;

pub struct AttendanceService<A: AttendanceRepository> {
    repo: A,
}

impl<A: AttendanceRepository> AttendanceService<A> {
    pub fn new(repo: A) -> Self {
        Self { repo }
    }

    /// Toggles attendance for one (student, subject, date) triple.
    ///
    /// # Contract
    /// - No prior record: inserts `Present`.
    /// - Prior record: flips `Present`/`Absent` and records `teacher_id`.
    /// - Returns the status after the toggle.
    pub fn toggle(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        teacher_id: TeacherId,
        date: NaiveDate,
    ) -> RecordResult<AttendanceStatus> {
        let status = self.repo.toggle(student_id, subject_id, teacher_id, date)?;
        info!(
            "event=attendance_toggle module=attendance status=ok student_id={student_id} subject_id={subject_id} teacher_id={teacher_id} date={date} result={}",
            status.as_str()
        );
        Ok(status)
    }

    pub fn get_status(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        date: NaiveDate,
    ) -> RecordResult<AttendanceState> {
        Ok(self.repo.status_for(student_id, subject_id, date)?.into())
    }

    pub fn list_all(&self) -> RecordResult<Vec<AttendanceView>> {
        self.repo.list_all()
    }

    /// Recent attendance for one student; `None` uses the default limit.
    pub fn list_for_student(
        &self,
        student_id: StudentId,
        limit: Option<u32>,
    ) -> RecordResult<Vec<StudentAttendanceRow>> {
        let limit = limit.unwrap_or(DEFAULT_STUDENT_ATTENDANCE_LIMIT);
        if limit == 0 {
            return Err(ValidationError::InvalidLimit(limit).into());
        }
        self.repo.list_for_student(student_id, limit)
    }

    pub fn roster(&self, subject_id: SubjectId, date: NaiveDate) -> RecordResult<Vec<RosterEntry>> {
        self.repo.roster(subject_id, date)
    }
}
