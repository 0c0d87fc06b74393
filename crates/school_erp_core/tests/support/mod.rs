//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rusqlite::Connection;
use school_erp_core::repo::directory_repo::SqliteDirectoryRepository;
use school_erp_core::repo::user_repo::SqliteUserRepository;
use school_erp_core::{
    DirectoryService, NewStudent, NewSubject, NewTeacher, StudentId, SubjectId, TeacherId,
};

pub struct Fixture {
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub student_id: StudentId,
}

pub fn directory(
    conn: &Connection,
) -> DirectoryService<SqliteDirectoryRepository<'_>, SqliteUserRepository<'_>> {
    DirectoryService::new(
        SqliteDirectoryRepository::new(conn),
        SqliteUserRepository::new(conn),
    )
}

/// One teacher assigned to MATH101 and one student S1.
pub fn seed_class(conn: &Connection) -> Fixture {
    let directory = directory(conn);
    let teacher_id = directory
        .add_teacher(&NewTeacher::new("T1", "555-0001", "t1@school.test"))
        .unwrap();
    let subject_id = directory
        .add_subject(&NewSubject::new("Mathematics", "MATH101"))
        .unwrap();
    directory
        .assign_teacher_to_subject(teacher_id, subject_id)
        .unwrap();
    let student_id = directory
        .add_student(&NewStudent::new(
            "S1",
            "R-001",
            "555-0101",
            "s1@school.test",
            "Science",
        ))
        .unwrap();
    Fixture {
        teacher_id,
        subject_id,
        student_id,
    }
}
