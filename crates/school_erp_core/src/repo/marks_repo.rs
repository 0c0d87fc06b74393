//! Append-only marks ledger repository.
//!
//! # Invariants
//! - Rows are only ever inserted.
//! - "Current marks" is the newest row by `created_at`, ties broken by id.

use super::RecordResult;
use crate::model::marks::{MarksRecord, MarksView, NewMarks};
use crate::model::{now_epoch_ms, MarksId, StudentId, SubjectId};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Ordering clause that defines the "current marks" policy.
pub(crate) const LATEST_MARKS_ORDER: &str = "ORDER BY created_at DESC, marks_id DESC";

const MARKS_SELECT_SQL: &str = "SELECT
    marks_id,
    student_id,
    subject_id,
    teacher_id,
    marks,
    exam_type,
    created_at
FROM marks";

const MARKS_VIEW_SQL: &str = "SELECT
    m.marks_id,
    COALESCE(s.name, 'Unknown') AS student_name,
    COALESCE(sub.subject_name, 'Unknown') AS subject_name,
    m.marks,
    m.exam_type,
    COALESCE(t.name, 'Admin') AS recorded_by,
    m.created_at
FROM marks m
LEFT JOIN students s ON s.student_id = m.student_id
LEFT JOIN subjects sub ON sub.subject_id = m.subject_id
LEFT JOIN teachers t ON t.teacher_id = m.teacher_id";

/// Repository interface for marks history.
pub trait MarksRepository {
    fn insert_marks(&self, marks: &NewMarks) -> RecordResult<MarksId>;
    fn latest_for(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> RecordResult<Option<MarksRecord>>;
    fn history_for(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> RecordResult<Vec<MarksRecord>>;
    fn list_for_student(&self, student_id: StudentId) -> RecordResult<Vec<MarksView>>;
    fn list_all(&self) -> RecordResult<Vec<MarksView>>;
}

/// SQLite-backed marks repository.
pub struct SqliteMarksRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMarksRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn views(&self, sql: &str, params: impl rusqlite::Params) -> RecordResult<Vec<MarksView>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            views.push(MarksView {
                id: row.get("marks_id")?,
                student_name: row.get("student_name")?,
                subject_name: row.get("subject_name")?,
                marks: row.get("marks")?,
                exam_type: row.get("exam_type")?,
                recorded_by: row.get("recorded_by")?,
                created_at: row.get("created_at")?,
            });
        }
        Ok(views)
    }
}

impl MarksRepository for SqliteMarksRepository<'_> {
    fn insert_marks(&self, marks: &NewMarks) -> RecordResult<MarksId> {
        self.conn.execute(
            "INSERT INTO marks (student_id, subject_id, teacher_id, marks, exam_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                marks.student_id,
                marks.subject_id,
                marks.teacher_id,
                marks.marks,
                marks.exam_type.as_deref(),
                now_epoch_ms(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn latest_for(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> RecordResult<Option<MarksRecord>> {
        let record = self
            .conn
            .query_row(
                &format!(
                    "{MARKS_SELECT_SQL}
                     WHERE student_id = ?1 AND subject_id = ?2
                     {LATEST_MARKS_ORDER}
                     LIMIT 1;"
                ),
                params![student_id, subject_id],
                parse_marks_row,
            )
            .optional()?;
        Ok(record)
    }

    fn history_for(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> RecordResult<Vec<MarksRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MARKS_SELECT_SQL}
             WHERE student_id = ?1 AND subject_id = ?2
             {LATEST_MARKS_ORDER};"
        ))?;
        let mut rows = stmt.query(params![student_id, subject_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_marks_row(row)?);
        }
        Ok(records)
    }

    fn list_for_student(&self, student_id: StudentId) -> RecordResult<Vec<MarksView>> {
        self.views(
            &format!(
                "{MARKS_VIEW_SQL}
                 WHERE m.student_id = ?1
                 ORDER BY m.created_at DESC, m.marks_id DESC;"
            ),
            [student_id],
        )
    }

    fn list_all(&self) -> RecordResult<Vec<MarksView>> {
        self.views(
            &format!("{MARKS_VIEW_SQL} ORDER BY m.created_at DESC, m.marks_id DESC;"),
            [],
        )
    }
}

fn parse_marks_row(row: &Row<'_>) -> rusqlite::Result<MarksRecord> {
    Ok(MarksRecord {
        id: row.get("marks_id")?,
        student_id: row.get("student_id")?,
        subject_id: row.get("subject_id")?,
        teacher_id: row.get("teacher_id")?,
        marks: row.get("marks")?,
        exam_type: row.get("exam_type")?,
        created_at: row.get("created_at")?,
    })
}
