//! Attendance ledger repository.
//!
//! # Responsibility
//! - Apply toggle semantics per (student, subject, date) in one statement.
//! - Serve admin, student and teacher-roster read models.
//!
//! # Invariants
//! - `toggle` is a single upsert; the UNIQUE(student_id, subject_id, date)
//!   constraint guarantees one row per triple even under concurrent writers.
//! - The last toggling teacher is recorded on the row.

use super::marks_repo::LATEST_MARKS_ORDER;
use super::{date_to_db, parse_date, RecordError, RecordResult};
use crate::model::attendance::{
    AttendanceStatus, AttendanceView, RosterEntry, StudentAttendanceRow,
};
use crate::model::{StudentId, SubjectId, TeacherId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for attendance records.
pub trait AttendanceRepository {
    /// Inserts `Present` or flips the existing status; returns the new status.
    fn toggle(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        teacher_id: TeacherId,
        date: NaiveDate,
    ) -> RecordResult<AttendanceStatus>;
    fn status_for(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        date: NaiveDate,
    ) -> RecordResult<Option<AttendanceStatus>>;
    /// Admin view, newest date first.
    fn list_all(&self) -> RecordResult<Vec<AttendanceView>>;
    /// Student view, newest date first, capped at `limit` rows.
    fn list_for_student(
        &self,
        student_id: StudentId,
        limit: u32,
    ) -> RecordResult<Vec<StudentAttendanceRow>>;
    /// All students by roll number with their state for `subject_id` on `date`.
    fn roster(&self, subject_id: SubjectId, date: NaiveDate) -> RecordResult<Vec<RosterEntry>>;
}

/// SQLite-backed attendance repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn toggle(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        teacher_id: TeacherId,
        date: NaiveDate,
    ) -> RecordResult<AttendanceStatus> {
        let first = AttendanceStatus::FIRST_MARK;
        let status: String = self.conn.query_row(
            "INSERT INTO attendance (student_id, teacher_id, subject_id, date, status)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (student_id, subject_id, date) DO UPDATE SET
                status = CASE attendance.status
                    WHEN ?5 THEN ?6
                    ELSE ?5
                END,
                teacher_id = excluded.teacher_id
             RETURNING status;",
            params![
                student_id,
                teacher_id,
                subject_id,
                date_to_db(date),
                first.as_str(),
                first.toggled().as_str()
            ],
            |row| row.get(0),
        )?;
        parse_status(&status)
    }

    fn status_for(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        date: NaiveDate,
    ) -> RecordResult<Option<AttendanceStatus>> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT status
                 FROM attendance
                 WHERE student_id = ?1 AND subject_id = ?2 AND date = ?3;",
                params![student_id, subject_id, date_to_db(date)],
                |row| row.get(0),
            )
            .optional()?;
        status.as_deref().map(parse_status).transpose()
    }

    fn list_all(&self) -> RecordResult<Vec<AttendanceView>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                a.attendance_id,
                COALESCE(s.name, 'Unknown') AS student_name,
                COALESCE(sub.subject_name, 'Unknown') AS subject_name,
                a.date,
                a.status,
                COALESCE(t.name, 'Admin') AS marked_by
             FROM attendance a
             LEFT JOIN students s ON s.student_id = a.student_id
             LEFT JOIN subjects sub ON sub.subject_id = a.subject_id
             LEFT JOIN teachers t ON t.teacher_id = a.teacher_id
             ORDER BY a.date DESC, a.attendance_id DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            let date: String = row.get("date")?;
            let status: String = row.get("status")?;
            views.push(AttendanceView {
                id: row.get("attendance_id")?,
                student_name: row.get("student_name")?,
                subject_name: row.get("subject_name")?,
                date: parse_date(&date, "attendance.date")?,
                status: parse_status(&status)?,
                marked_by: row.get("marked_by")?,
            });
        }
        Ok(views)
    }

    fn list_for_student(
        &self,
        student_id: StudentId,
        limit: u32,
    ) -> RecordResult<Vec<StudentAttendanceRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.date, sub.subject_name, a.status
             FROM attendance a
             INNER JOIN subjects sub ON sub.subject_id = a.subject_id
             WHERE a.student_id = ?1
             ORDER BY a.date DESC, a.attendance_id DESC
             LIMIT ?2;",
        )?;
        let mut rows = stmt.query(params![student_id, i64::from(limit)])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            let date: String = row.get("date")?;
            let status: String = row.get("status")?;
            items.push(StudentAttendanceRow {
                date: parse_date(&date, "attendance.date")?,
                subject_name: row.get("subject_name")?,
                status: parse_status(&status)?,
            });
        }
        Ok(items)
    }

    fn roster(&self, subject_id: SubjectId, date: NaiveDate) -> RecordResult<Vec<RosterEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT
                s.student_id,
                s.roll_no,
                s.name,
                (
                    SELECT a.status
                    FROM attendance a
                    WHERE a.student_id = s.student_id
                      AND a.subject_id = ?1
                      AND a.date = ?2
                ) AS status,
                (
                    SELECT m.marks
                    FROM marks m
                    WHERE m.student_id = s.student_id
                      AND m.subject_id = ?1
                    {LATEST_MARKS_ORDER}
                    LIMIT 1
                ) AS current_marks
             FROM students s
             ORDER BY s.roll_no ASC;"
        ))?;
        let mut rows = stmt.query(params![subject_id, date_to_db(date)])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let status = row
                .get::<_, Option<String>>("status")?
                .as_deref()
                .map(parse_status)
                .transpose()?;
            entries.push(RosterEntry {
                student_id: row.get("student_id")?,
                roll_no: row.get("roll_no")?,
                name: row.get("name")?,
                subject_id,
                attendance: status.into(),
                current_marks: row.get("current_marks")?,
            });
        }
        Ok(entries)
    }
}

fn parse_status(value: &str) -> RecordResult<AttendanceStatus> {
    AttendanceStatus::parse(value).ok_or_else(|| {
        RecordError::InvalidData(format!("invalid status `{value}` in attendance.status"))
    })
}
