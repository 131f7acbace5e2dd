//! # Identifiers
//!
//! Student and instructor identifiers plus the generator that issues them.
//!
//! Ids render as a prefix followed by a zero-padded sequence number
//! (`STU00001`, `INS00042`). The sequence lives in an [`IdGenerator`] owned by
//! the registrar for the lifetime of the process. It is never persisted and
//! never reset; a new process starts again at 1.

use crate::error::{EnrollmentError, IdParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const STUDENT_PREFIX: &str = "STU";
pub const INSTRUCTOR_PREFIX: &str = "INS";

// =============================================================================
// ID NEWTYPES
// =============================================================================

macro_rules! sequence_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(u32);

        impl $name {
            /// Build an id from its sequence number.
            #[must_use]
            pub const fn from_sequence(sequence: u32) -> Self {
                Self(sequence)
            }

            #[must_use]
            pub const fn sequence(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{:05}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix($prefix)
                    .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|digits| digits.parse().ok())
                    .map(Self)
                    .ok_or_else(|| IdParseError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

sequence_id!(
    /// Identifier of a student (`STU00001`).
    StudentId,
    STUDENT_PREFIX,
    "student"
);

sequence_id!(
    /// Identifier of an instructor (`INS00001`).
    InstructorId,
    INSTRUCTOR_PREFIX,
    "instructor"
);

// =============================================================================
// GENERATOR
// =============================================================================

/// Monotonic issuer of student and instructor ids.
///
/// Each kind has its own counter; the first id of each kind has sequence 1.
#[derive(Debug, Default)]
pub struct IdGenerator {
    students: u32,
    instructors: u32,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_student_id(&mut self) -> StudentId {
        self.students = self.students.saturating_add(1);
        StudentId(self.students)
    }

    pub fn next_instructor_id(&mut self) -> InstructorId {
        self.instructors = self.instructors.saturating_add(1);
        InstructorId(self.instructors)
    }

    /// Number of student ids issued so far.
    #[must_use]
    pub fn students_issued(&self) -> u32 {
        self.students
    }

    /// Number of instructor ids issued so far.
    #[must_use]
    pub fn instructors_issued(&self) -> u32 {
        self.instructors
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Format `prefix` followed by `number` padded to five digits.
pub fn generate_id(prefix: &str, number: u32) -> Result<String, EnrollmentError> {
    if prefix.is_empty() {
        return Err(EnrollmentError::InvalidArgument(
            "prefix cannot be empty".to_string(),
        ));
    }
    Ok(format!("{prefix}{number:05}"))
}

/// 5 to 10 characters, uppercase ASCII letters or digits only.
#[must_use]
pub fn is_valid_enrollment_id(id: &str) -> bool {
    (5..=10).contains(&id.len())
        && id
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn generator_is_monotonic_per_kind() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_student_id().to_string(), "STU00001");
        assert_eq!(ids.next_student_id().to_string(), "STU00002");
        assert_eq!(ids.next_instructor_id().to_string(), "INS00001");
        assert_eq!(ids.students_issued(), 2);
        assert_eq!(ids.instructors_issued(), 1);
    }

    #[test]
    fn parse_round_trip() {
        let id: StudentId = "STU00042".parse().unwrap();
        assert_eq!(id, StudentId::from_sequence(42));
        assert_eq!(id.to_string(), "STU00042");

        assert!("INS00042".parse::<StudentId>().is_err());
        assert!("STU".parse::<StudentId>().is_err());
        assert!("STU-1".parse::<StudentId>().is_err());
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&InstructorId::from_sequence(7)).unwrap();
        assert_eq!(json, "\"INS00007\"");
        let back: InstructorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sequence(), 7);
    }

    #[test]
    fn generate_id_pads_and_rejects_empty_prefix() {
        assert_eq!(generate_id("ENR", 12).unwrap(), "ENR00012");
        assert!(generate_id("", 1).unwrap_err().is_validation());
    }

    #[test]
    fn enrollment_id_validation() {
        assert!(is_valid_enrollment_id("STU00001"));
        assert!(is_valid_enrollment_id("AB123"));
        assert!(!is_valid_enrollment_id("ab123"));
        assert!(!is_valid_enrollment_id("AB12"));
        assert!(!is_valid_enrollment_id("ABCDEFGHIJK"));
        assert!(!is_valid_enrollment_id("STU-0001"));
    }
}
