//! Directory repository: students, teachers, subjects and assignments.
//!
//! # Invariants
//! - Students list in `roll_no` order; other listings keep insertion order.
//! - Assignment uniqueness per (teacher, subject) is a storage constraint.

use super::RecordResult;
use crate::model::academic::{AssignmentView, NewSubject, Subject};
use crate::model::people::{NewStudent, NewTeacher, Student, Teacher};
use crate::model::{AssignmentId, StudentId, SubjectId, TeacherId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT
    student_id,
    name,
    roll_no,
    phone,
    email,
    course
FROM students";

const TEACHER_SELECT_SQL: &str = "SELECT teacher_id, name, phone, email FROM teachers";

const SUBJECT_SELECT_SQL: &str = "SELECT subject_id, subject_name, subject_code FROM subjects";

/// Repository interface for people and academic structure.
pub trait DirectoryRepository {
    fn insert_student(&self, student: &NewStudent) -> RecordResult<StudentId>;
    fn get_student(&self, id: StudentId) -> RecordResult<Option<Student>>;
    fn list_students(&self) -> RecordResult<Vec<Student>>;
    fn insert_teacher(&self, teacher: &NewTeacher) -> RecordResult<TeacherId>;
    fn get_teacher(&self, id: TeacherId) -> RecordResult<Option<Teacher>>;
    fn list_teachers(&self) -> RecordResult<Vec<Teacher>>;
    fn insert_subject(&self, subject: &NewSubject) -> RecordResult<SubjectId>;
    fn get_subject(&self, id: SubjectId) -> RecordResult<Option<Subject>>;
    fn list_subjects(&self) -> RecordResult<Vec<Subject>>;
    fn insert_assignment(
        &self,
        teacher_id: TeacherId,
        subject_id: SubjectId,
    ) -> RecordResult<AssignmentId>;
    fn list_assignments(&self) -> RecordResult<Vec<AssignmentView>>;
    fn subjects_for_teacher(&self, teacher_id: TeacherId) -> RecordResult<Vec<Subject>>;
    fn is_assigned(&self, teacher_id: TeacherId, subject_id: SubjectId) -> RecordResult<bool>;
}

/// SQLite-backed directory repository.
pub struct SqliteDirectoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDirectoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn collect<T>(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
        parse: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> RecordResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }
        Ok(items)
    }
}

impl DirectoryRepository for SqliteDirectoryRepository<'_> {
    fn insert_student(&self, student: &NewStudent) -> RecordResult<StudentId> {
        self.conn.execute(
            "INSERT INTO students (name, roll_no, phone, email, course)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                student.name,
                student.roll_no,
                student.phone,
                student.email,
                student.course
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_student(&self, id: StudentId) -> RecordResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE student_id = ?1;"),
                [id],
                parse_student_row,
            )
            .optional()?;
        Ok(student)
    }

    fn list_students(&self) -> RecordResult<Vec<Student>> {
        self.collect(
            &format!("{STUDENT_SELECT_SQL} ORDER BY roll_no ASC;"),
            [],
            parse_student_row,
        )
    }

    fn insert_teacher(&self, teacher: &NewTeacher) -> RecordResult<TeacherId> {
        self.conn.execute(
            "INSERT INTO teachers (name, phone, email) VALUES (?1, ?2, ?3);",
            params![teacher.name, teacher.phone, teacher.email],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_teacher(&self, id: TeacherId) -> RecordResult<Option<Teacher>> {
        let teacher = self
            .conn
            .query_row(
                &format!("{TEACHER_SELECT_SQL} WHERE teacher_id = ?1;"),
                [id],
                parse_teacher_row,
            )
            .optional()?;
        Ok(teacher)
    }

    fn list_teachers(&self) -> RecordResult<Vec<Teacher>> {
        self.collect(
            &format!("{TEACHER_SELECT_SQL} ORDER BY teacher_id ASC;"),
            [],
            parse_teacher_row,
        )
    }

    fn insert_subject(&self, subject: &NewSubject) -> RecordResult<SubjectId> {
        self.conn.execute(
            "INSERT INTO subjects (subject_name, subject_code) VALUES (?1, ?2);",
            params![subject.name, subject.code],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_subject(&self, id: SubjectId) -> RecordResult<Option<Subject>> {
        let subject = self
            .conn
            .query_row(
                &format!("{SUBJECT_SELECT_SQL} WHERE subject_id = ?1;"),
                [id],
                parse_subject_row,
            )
            .optional()?;
        Ok(subject)
    }

    fn list_subjects(&self) -> RecordResult<Vec<Subject>> {
        self.collect(
            &format!("{SUBJECT_SELECT_SQL} ORDER BY subject_id ASC;"),
            [],
            parse_subject_row,
        )
    }

    fn insert_assignment(
        &self,
        teacher_id: TeacherId,
        subject_id: SubjectId,
    ) -> RecordResult<AssignmentId> {
        self.conn.execute(
            "INSERT INTO assignments (teacher_id, subject_id) VALUES (?1, ?2);",
            params![teacher_id, subject_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_assignments(&self) -> RecordResult<Vec<AssignmentView>> {
        self.collect(
            "SELECT
                a.id,
                a.teacher_id,
                t.name AS teacher_name,
                a.subject_id,
                s.subject_name
             FROM assignments a
             INNER JOIN teachers t ON t.teacher_id = a.teacher_id
             INNER JOIN subjects s ON s.subject_id = a.subject_id
             ORDER BY a.id ASC;",
            [],
            |row| {
                Ok(AssignmentView {
                    id: row.get("id")?,
                    teacher_id: row.get("teacher_id")?,
                    teacher_name: row.get("teacher_name")?,
                    subject_id: row.get("subject_id")?,
                    subject_name: row.get("subject_name")?,
                })
            },
        )
    }

    fn subjects_for_teacher(&self, teacher_id: TeacherId) -> RecordResult<Vec<Subject>> {
        self.collect(
            "SELECT s.subject_id, s.subject_name, s.subject_code
             FROM assignments a
             INNER JOIN subjects s ON s.subject_id = a.subject_id
             WHERE a.teacher_id = ?1
             ORDER BY a.id ASC;",
            [teacher_id],
            parse_subject_row,
        )
    }

    fn is_assigned(&self, teacher_id: TeacherId, subject_id: SubjectId) -> RecordResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM assignments
                WHERE teacher_id = ?1 AND subject_id = ?2
            );",
            params![teacher_id, subject_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("student_id")?,
        name: row.get("name")?,
        roll_no: row.get("roll_no")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        course: row.get("course")?,
    })
}

fn parse_teacher_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get("teacher_id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
    })
}

fn parse_subject_row(row: &Row<'_>) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get("subject_id")?,
        name: row.get("subject_name")?,
        code: row.get("subject_code")?,
    })
}
