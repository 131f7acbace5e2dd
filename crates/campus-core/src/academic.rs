//! # Academic Metrics
//!
//! GPA, academic standing, and the two capability traits shared by the
//! person records.
//!
//! GPA is held in integer hundredths. The mean of `n` grade-point values
//! summing to `s` hundredths, rounded half-up to two decimals, is
//! `(2s + n) / 2n`, computed without any floating-point step.

use crate::error::GpaParseError;
use crate::grade::{Grade, GradePoints};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// GPA
// =============================================================================

/// Grade point average in hundredths (`Gpa(365)` is 3.65).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Gpa(u16);

impl Gpa {
    pub const ZERO: Gpa = Gpa(0);
    pub const MAX: Gpa = Gpa(400);

    /// Build from hundredths, clamped to 4.00.
    #[must_use]
    pub const fn from_hundredths(hundredths: u16) -> Self {
        if hundredths > Self::MAX.0 {
            Self::MAX
        } else {
            Self(hundredths)
        }
    }

    #[must_use]
    pub const fn hundredths(self) -> u16 {
        self.0
    }

    /// Round-half-up mean of `total` hundredths over `count` values.
    ///
    /// Zero values average to 0.00.
    #[must_use]
    pub fn mean(total: u64, count: u64) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        let doubled = total.saturating_mul(2).saturating_add(count);
        let rounded = doubled / count.saturating_mul(2);
        Self::from_hundredths(u16::try_from(rounded).unwrap_or(u16::MAX))
    }

    /// Round-half-up mean of several GPAs.
    #[must_use]
    pub fn average<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Gpa>,
    {
        let (total, count) = values
            .into_iter()
            .fold((0u64, 0u64), |(total, count), gpa| {
                (total + u64::from(gpa.0), count + 1)
            });
        Self::mean(total, count)
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Accepts `3`, `3.5`, `3.65`; at most two decimals, at most 4.00.
impl FromStr for Gpa {
    type Err = GpaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GpaParseError(s.to_string());
        let text = s.trim();
        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 2 {
            return Err(err());
        }

        let whole: u16 = whole.parse().map_err(|_| err())?;
        let frac: u16 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u16>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };

        let hundredths = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .filter(|h| *h <= Self::MAX.0)
            .ok_or_else(err)?;
        Ok(Self(hundredths))
    }
}

impl From<Gpa> for String {
    fn from(gpa: Gpa) -> Self {
        gpa.to_string()
    }
}

impl TryFrom<String> for Gpa {
    type Error = GpaParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// THRESHOLDS
// =============================================================================

pub const DEANS_LIST_GPA: Gpa = Gpa(380);
pub const HONOR_ROLL_GPA: Gpa = Gpa(350);
pub const GOOD_STANDING_GPA: Gpa = Gpa(300);
pub const PASSING_GPA: Gpa = Gpa(200);

// =============================================================================
// STANDING
// =============================================================================

/// Academic standing, derived purely from GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Standing {
    DeansList,
    HonorRoll,
    GoodStanding,
    Satisfactory,
    AcademicProbation,
}

impl Standing {
    /// Bands are checked highest first.
    #[must_use]
    pub fn from_gpa(gpa: Gpa) -> Self {
        if gpa >= DEANS_LIST_GPA {
            Self::DeansList
        } else if gpa >= HONOR_ROLL_GPA {
            Self::HonorRoll
        } else if gpa >= GOOD_STANDING_GPA {
            Self::GoodStanding
        } else if gpa >= PASSING_GPA {
            Self::Satisfactory
        } else {
            Self::AcademicProbation
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DeansList => "DEAN'S LIST",
            Self::HonorRoll => "HONOR ROLL",
            Self::GoodStanding => "GOOD STANDING",
            Self::Satisfactory => "SATISFACTORY",
            Self::AcademicProbation => "ACADEMIC PROBATION",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Mean grade points over the full history, rounded half-up to hundredths.
#[must_use]
pub fn compute_gpa(grades: &[Grade]) -> Gpa {
    Gpa::mean(
        u64::from(total_grade_points(grades).hundredths()),
        grades.len() as u64,
    )
}

#[must_use]
pub fn total_grade_points(grades: &[Grade]) -> GradePoints {
    GradePoints(
        grades
            .iter()
            .map(|g| g.grade_point().hundredths())
            .fold(0u32, u32::saturating_add),
    )
}

/// Inclusive: exactly 3.50 is on the honor roll.
#[must_use]
pub fn is_honor_roll(gpa: Gpa) -> bool {
    gpa >= HONOR_ROLL_GPA
}

#[must_use]
pub fn is_passing_gpa(gpa: Gpa) -> bool {
    gpa >= PASSING_GPA
}

#[must_use]
pub const fn enrollment_status(active: bool) -> &'static str {
    if active { "ACTIVE" } else { "INACTIVE" }
}

// =============================================================================
// CAPABILITY TRAITS
// =============================================================================

/// Something with a grade history.
pub trait Gradeable {
    fn gpa(&self) -> Gpa;

    fn grades(&self) -> &[Grade];

    fn total_grade_points(&self) -> GradePoints {
        total_grade_points(self.grades())
    }

    fn academic_standing(&self) -> Standing {
        Standing::from_gpa(self.gpa())
    }

    fn is_honor_roll(&self) -> bool {
        is_honor_roll(self.gpa())
    }
}

/// Something that can be enrolled and deactivated.
pub trait Enrollable {
    fn enrollment_id(&self) -> String;

    fn enrollment_date(&self) -> NaiveDate;

    fn is_active(&self) -> bool;

    fn enrollment_status(&self) -> &'static str {
        enrollment_status(self.is_active())
    }

    /// `Enrollment[ID=STU00001, Date=2024-09-01, Status=ACTIVE]`
    fn formatted_enrollment_info(&self) -> String {
        format!(
            "Enrollment[ID={}, Date={}, Status={}]",
            self.enrollment_id(),
            self.enrollment_date(),
            self.enrollment_status()
        )
    }

    /// Whole days from the enrollment date to `today`; negative if in the future.
    fn days_since_enrollment(&self, today: NaiveDate) -> i64 {
        today.signed_duration_since(self.enrollment_date()).num_days()
    }
}

// =============================================================================
// TESTS
// =============================================================================
