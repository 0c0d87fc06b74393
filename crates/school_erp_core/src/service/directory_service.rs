//! Directory use-case service.
//!
//! # Responsibility
//! - Register students, teachers, subjects and teacher-subject assignments.
//! - Create teacher/student logins linked to directory records.
//!
//! # Invariants
//! - All text input is trimmed and must be non-blank.
//! - Assignment endpoints and login references must exist before insert.
//! - Admin logins are never created through this path.

use crate::credential::PasswordHash;
use crate::model::academic::{AssignmentView, NewSubject, Subject};
use crate::model::people::{NewStudent, NewTeacher, Student, Teacher};
use crate::model::user::Role;
use crate::model::validation::{require_text, ValidationError};
use crate::model::{AssignmentId, StudentId, SubjectId, TeacherId, UserId};
use crate::repo::directory_repo::DirectoryRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::{RecordError, RecordRef, RecordResult};
use log::info;

/// Use-case service for people, subjects, assignments and logins.
pub struct DirectoryService<D: DirectoryRepository, U: UserRepository> {
    directory: D,
    users: U,
}

impl<D: DirectoryRepository, U: UserRepository> DirectoryService<D, U> {
    pub fn new(directory: D, users: U) -> Self {
        Self { directory, users }
    }

    /// Adds a student. Fails with `DuplicateKey` when `roll_no` is taken.
    pub fn add_student(&self, student: &NewStudent) -> RecordResult<StudentId> {
        let student = student.normalized()?;
        let id = self.directory.insert_student(&student)?;
        info!("event=student_add module=directory status=ok student_id={id}");
        Ok(id)
    }

    pub fn add_teacher(&self, teacher: &NewTeacher) -> RecordResult<TeacherId> {
        let teacher = teacher.normalized()?;
        let id = self.directory.insert_teacher(&teacher)?;
        info!("event=teacher_add module=directory status=ok teacher_id={id}");
        Ok(id)
    }

    /// Adds a subject. Fails with `DuplicateKey` when `code` is taken.
    pub fn add_subject(&self, subject: &NewSubject) -> RecordResult<SubjectId> {
        let subject = subject.normalized()?;
        let id = self.directory.insert_subject(&subject)?;
        info!("event=subject_add module=directory status=ok subject_id={id}");
        Ok(id)
    }

    /// Links a teacher to a subject.
    ///
    /// # Errors
    /// - `NotFound` when either side does not exist.
    /// - `DuplicateKey` when the pair is already assigned.
    pub fn assign_teacher_to_subject(
        &self,
        teacher_id: TeacherId,
        subject_id: SubjectId,
    ) -> RecordResult<AssignmentId> {
        if self.directory.get_teacher(teacher_id)?.is_none() {
            return Err(RecordError::NotFound(RecordRef::Teacher(teacher_id)));
        }
        if self.directory.get_subject(subject_id)?.is_none() {
            return Err(RecordError::NotFound(RecordRef::Subject(subject_id)));
        }
        let id = self.directory.insert_assignment(teacher_id, subject_id)?;
        info!(
            "event=assignment_add module=directory status=ok assignment_id={id} teacher_id={teacher_id} subject_id={subject_id}"
        );
        Ok(id)
    }

    /// Creates a login for an existing teacher or student record.
    ///
    /// # Errors
    /// - `Validation` for admin role or blank username/password.
    /// - `NotFound` when `reference_id` is not a record of `role`.
    /// - `DuplicateKey` when `username` is taken.
    pub fn create_login(
        &self,
        role: Role,
        reference_id: i64,
        username: &str,
        password: &str,
    ) -> RecordResult<UserId> {
        let username = require_text("username", username)?;
        let password = require_text("password", password)?;

        match role {
            Role::Admin => {
                return Err(ValidationError::InvalidRole(role.as_str().to_string()).into());
            }
            Role::Teacher => {
                if self.directory.get_teacher(reference_id)?.is_none() {
                    return Err(RecordError::NotFound(RecordRef::Teacher(reference_id)));
                }
            }
            Role::Student => {
                if self.directory.get_student(reference_id)?.is_none() {
                    return Err(RecordError::NotFound(RecordRef::Student(reference_id)));
                }
            }
        }

        let hash = PasswordHash::derive(&password);
        let id = self
            .users
            .create_user(&username, &hash, role, Some(reference_id))?;
        info!(
            "event=login_create module=directory status=ok user_id={id} role={}",
            role.as_str()
        );
        Ok(id)
    }

    pub fn get_student(&self, id: StudentId) -> RecordResult<Option<Student>> {
        self.directory.get_student(id)
    }

    pub fn get_teacher(&self, id: TeacherId) -> RecordResult<Option<Teacher>> {
        self.directory.get_teacher(id)
    }

    pub fn get_subject(&self, id: SubjectId) -> RecordResult<Option<Subject>> {
        self.directory.get_subject(id)
    }

    /// Students ordered by roll number.
    pub fn list_students(&self) -> RecordResult<Vec<Student>> {
        self.directory.list_students()
    }

    pub fn list_teachers(&self) -> RecordResult<Vec<Teacher>> {
        self.directory.list_teachers()
    }

    pub fn list_subjects(&self) -> RecordResult<Vec<Subject>> {
        self.directory.list_subjects()
    }

    pub fn list_assignments(&self) -> RecordResult<Vec<AssignmentView>> {
        self.directory.list_assignments()
    }

    pub fn subjects_for_teacher(&self, teacher_id: TeacherId) -> RecordResult<Vec<Subject>> {
        self.directory.subjects_for_teacher(teacher_id)
    }
}
