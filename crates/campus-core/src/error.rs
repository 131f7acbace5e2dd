//! # Error Types
//!
//! Typed failures for the enrollment and grading engine.
//!
//! Validation errors (bad arguments) and business-rule violations are kept in
//! distinct variants so a caller can decide to skip, abort, or report.

use thiserror::Error;

/// Result alias used across the engine.
pub type CampusResult<T> = Result<T, EnrollmentError>;

// =============================================================================
// ENROLLMENT ERRORS
// =============================================================================

/// Failures raised by enrollment and grading operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    /// An argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The student is flagged inactive and cannot enroll.
    #[error("student {student_id} is not active")]
    StudentInactive { student_id: String },

    /// The course has no free seat left.
    #[error("course {course_code} is full (capacity: {capacity})")]
    CourseFull { course_code: String, capacity: usize },

    /// A fact already links this student to this course.
    #[error("student {student_id} already enrolled in {course_code}")]
    DuplicateEnrollment {
        student_id: String,
        course_code: String,
    },

    /// No fact links this student to this course.
    #[error("no enrollment found for student {student_id} in {course_code}")]
    EnrollmentNotFound {
        student_id: String,
        course_code: String,
    },

    /// The fact already carries a final grade.
    #[error("student {student_id} already has a grade in {course_code}")]
    AlreadyGraded {
        student_id: String,
        course_code: String,
    },
}

impl EnrollmentError {
    /// True for argument validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// True for violations of enrollment rules.
    #[must_use]
    pub fn is_business_rule(&self) -> bool {
        !self.is_validation()
    }

    /// True when a batch operation may skip this failure and continue.
    ///
    /// Only a full course is skippable.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::CourseFull { .. })
    }
}

// =============================================================================
// VALUE ERRORS
// =============================================================================

/// Failures when building or parsing a [`Grade`](crate::Grade).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// Percentage outside 0..=100 or not covered by any band.
    #[error("invalid percentage: {0}")]
    InvalidRange(i32),

    /// Text that names no grade.
    #[error("unknown grade: {0:?}")]
    Unknown(String),
}

/// Failures raised by direct [`Course`](crate::Course) roster mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    #[error("course {course_code} is full (capacity: {capacity})")]
    Full { course_code: String, capacity: usize },

    #[error("capacity {requested} is below current enrollment {enrolled} for {course_code}")]
    CapacityBelowEnrollment {
        course_code: String,
        requested: usize,
        enrolled: usize,
    },
}

impl From<CourseError> for EnrollmentError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::Full {
                course_code,
                capacity,
            } => Self::CourseFull {
                course_code,
                capacity,
            },
            other @ CourseError::CapacityBelowEnrollment { .. } => {
                Self::InvalidArgument(other.to_string())
            }
        }
    }
}

/// Invalid [`CourseSchedule`](crate::CourseSchedule) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("day of week cannot be empty")]
    EmptyDay,

    #[error("room cannot be empty")]
    EmptyRoom,

    #[error("start time {start} must not be after end time {end}")]
    StartAfterEnd { start: String, end: String },
}

/// Text that does not parse as a [`Gpa`](crate::Gpa).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid GPA {0:?}: expected a decimal between 0.00 and 4.00")]
pub struct GpaParseError(pub String);

/// Text that does not parse as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id {value:?}")]
pub struct IdParseError {
    pub kind: &'static str,
    pub value: String,
}

// =============================================================================
// TESTS
// =============================================================================
