//! Enrollment facts.

use crate::error::EnrollmentError;
use crate::grade::Grade;
use crate::ids::StudentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable record that a student is (or was) registered for a course.
///
/// Grading never edits a fact; [`Enrollment::with_grade`] produces the
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Enrollment {
    student_id: StudentId,
    course_code: String,
    enrollment_date: NaiveDate,
    final_grade: Option<Grade>,
}

impl Enrollment {
    /// An in-progress (ungraded) fact.
    pub fn new(
        student_id: StudentId,
        course_code: impl Into<String>,
        enrollment_date: NaiveDate,
    ) -> Result<Self, EnrollmentError> {
        let course_code = course_code.into();
        if course_code.trim().is_empty() {
            return Err(EnrollmentError::InvalidArgument(
                "course code cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            student_id,
            course_code,
            enrollment_date,
            final_grade: None,
        })
    }

    /// Same student, course and date, carrying `grade`.
    #[must_use]
    pub fn with_grade(&self, grade: Grade) -> Self {
        Self {
            final_grade: Some(grade),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    #[must_use]
    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    #[must_use]
    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    #[must_use]
    pub fn final_grade(&self) -> Option<Grade> {
        self.final_grade
    }

    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.final_grade.is_some()
    }

    #[must_use]
    pub fn status(&self) -> EnrollmentStatus {
        match self.final_grade {
            None => EnrollmentStatus::InProgress,
            Some(grade) if grade.is_passing() => EnrollmentStatus::Passed,
            Some(_) => EnrollmentStatus::Failed,
        }
    }

    /// True when this fact links `student_id` to `course_code`.
    #[must_use]
    pub fn links(&self, student_id: StudentId, course_code: &str) -> bool {
        self.student_id == student_id && self.course_code == course_code
    }
}

/// Progress of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    InProgress,
    Passed,
    Failed,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        })
    }
}
