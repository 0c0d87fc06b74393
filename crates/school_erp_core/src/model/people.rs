//! Student and teacher directory records.

use super::validation::{require_text, ValidationError};
use super::{StudentId, TeacherId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Unique across all students; the directory sort key.
    pub roll_no: String,
    pub phone: String,
    pub email: String,
    pub course: String,
}

/// Input for `add_student`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub roll_no: String,
    pub phone: String,
    pub email: String,
    pub course: String,
}

impl NewStudent {
    pub fn new(
        name: impl Into<String>,
        roll_no: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            roll_no: roll_no.into(),
            phone: phone.into(),
            email: email.into(),
            course: course.into(),
        }
    }

    /// Returns a trimmed copy, rejecting any blank field.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", &self.name)?,
            roll_no: require_text("roll_no", &self.roll_no)?,
            phone: require_text("phone", &self.phone)?,
            email: require_text("email", &self.email)?,
            course: require_text("course", &self.course)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Input for `add_teacher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl NewTeacher {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", &self.name)?,
            phone: require_text("phone", &self.phone)?,
            email: require_text("email", &self.email)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NewStudent, NewTeacher};
    use crate::model::validation::ValidationError;

    #[test]
    fn new_student_normalized_trims_fields() {
        let input = NewStudent::new(" Sam ", " R-01", "555", "s@x.io", " CS ");
        let normalized = input.normalized().unwrap();
        assert_eq!(normalized.name, "Sam");
        assert_eq!(normalized.roll_no, "R-01");
        assert_eq!(normalized.course, "CS");
    }

    #[test]
    fn new_teacher_rejects_blank_email() {
        let err = NewTeacher::new("T1", "555", "  ").normalized().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("email"));
    }
}
