//! Marks ledger use-case service.
//!
//! # Invariants
//! - Recording never mutates or removes earlier rows.
//! - `current_marks` returns the most recently recorded row.

use crate::model::marks::{MarksRecord, MarksView, NewMarks};
use crate::model::{MarksId, StudentId, SubjectId};
use crate::repo::marks_repo::MarksRepository;
use crate::repo::RecordResult;
use log::info;

pub struct MarksService<M: MarksRepository> {
    repo: M,
}

impl<M: MarksRepository> MarksService<M> {
    pub fn new(repo: M) -> Self {
        Self { repo }
    }

    /// Appends one marks row. Marks must be within `0..=100`.
    pub fn record_marks(&self, marks: &NewMarks) -> RecordResult<MarksId> {
        let marks = marks.normalized()?;
        let id = self.repo.insert_marks(&marks)?;
        info!(
            "event=marks_record module=marks status=ok marks_id={id} student_id={} subject_id={} teacher_id={}",
            marks.student_id, marks.subject_id, marks.teacher_id
        );
        Ok(id)
    }

    /// All marks for a student, newest first.
    pub fn list_for_student(&self, student_id: StudentId) -> RecordResult<Vec<MarksView>> {
        self.repo.list_for_student(student_id)
    }

    pub fn current_marks(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> RecordResult<Option<MarksRecord>> {
        self.repo.latest_for(student_id, subject_id)
    }

    /// Full history for one (student, subject) pair, newest first.
    pub fn history(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> RecordResult<Vec<MarksRecord>> {
        self.repo.history_for(student_id, subject_id)
    }

    pub fn list_all(&self) -> RecordResult<Vec<MarksView>> {
        self.repo.list_all()
    }
}
