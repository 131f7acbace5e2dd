//! Academic departments. Used both as a student's major and a course's owner.

use crate::error::EnrollmentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    ComputerScience,
    Mathematics,
    Engineering,
    Business,
    Arts,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::ComputerScience,
        Department::Mathematics,
        Department::Engineering,
        Department::Business,
        Department::Arts,
    ];

    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::Mathematics => "Mathematics",
            Self::Engineering => "Engineering",
            Self::Business => "Business Administration",
            Self::Arts => "Arts and Humanities",
        }
    }

    /// Short catalog code (`CS`, `MATH`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ComputerScience => "CS",
            Self::Mathematics => "MATH",
            Self::Engineering => "ENG",
            Self::Business => "BUS",
            Self::Arts => "ARTS",
        }
    }

    /// `Computer Science (CS)`
    #[must_use]
    pub fn description(self) -> String {
        format!("{} ({})", self.full_name(), self.code())
    }

    const fn variant_name(self) -> &'static str {
        match self {
            Self::ComputerScience => "COMPUTER_SCIENCE",
            Self::Mathematics => "MATHEMATICS",
            Self::Engineering => "ENGINEERING",
            Self::Business => "BUSINESS",
            Self::Arts => "ARTS",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Accepts the code (`CS`), the variant name (`COMPUTER_SCIENCE`) or the full name.
impl FromStr for Department {
    type Err = EnrollmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| {
                wanted.eq_ignore_ascii_case(d.code())
                    || wanted.eq_ignore_ascii_case(d.variant_name())
                    || wanted.eq_ignore_ascii_case(d.full_name())
            })
            .ok_or_else(|| EnrollmentError::InvalidArgument(format!("unknown department {s:?}")))
    }
}
