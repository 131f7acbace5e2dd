//! # Letter Grades
//!
//! Fixed, ordered letter-grade scale with grade points and percentage bands.
//!
//! Grade points are integer hundredths (`A-` is 370) so every downstream
//! computation stays exact.

use crate::error::GradeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// GRADE POINTS
// =============================================================================

/// Grade points in hundredths (`A-` is 370).
///
/// Also used for sums of grade points, hence the wide integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradePoints(pub u32);

impl GradePoints {
    /// Raw value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Render with a single decimal (`3.3`).
    #[must_use]
    pub fn to_tenths_string(self) -> String {
        format!("{}.{}", self.0 / 100, (self.0 % 100) / 10)
    }
}

impl fmt::Display for GradePoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// GRADE
// =============================================================================

/// Letter grade, declared from best to worst.
///
/// The derived `Ord` follows declaration order, so `APlus < F`: sorting
/// puts the best grade first. Compare merit through
/// [`grade_point`](Self::grade_point) or [`Requirement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    F,
}

impl Grade {
    /// All grades in declaration order.
    pub const ALL: [Grade; 11] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::D,
        Grade::F,
    ];

    /// Grade points for this grade.
    #[must_use]
    pub const fn grade_point(self) -> GradePoints {
        GradePoints(match self {
            Self::APlus | Self::A => 400,
            Self::AMinus => 370,
            Self::BPlus => 330,
            Self::B => 300,
            Self::BMinus => 270,
            Self::CPlus => 230,
            Self::C => 200,
            Self::CMinus => 170,
            Self::D => 100,
            Self::F => 0,
        })
    }

    /// Lowest percentage (inclusive) mapping to this grade.
    #[must_use]
    pub const fn min_percentage(self) -> u8 {
        match self {
            Self::APlus => 95,
            Self::A => 90,
            Self::AMinus => 85,
            Self::BPlus => 80,
            Self::B => 75,
            Self::BMinus => 70,
            Self::CPlus => 65,
            Self::C => 60,
            Self::CMinus => 55,
            Self::D => 50,
            Self::F => 0,
        }
    }

    /// Highest percentage (inclusive) mapping to this grade.
    #[must_use]
    pub const fn max_percentage(self) -> u8 {
        match self {
            Self::APlus => 100,
            Self::A => 94,
            Self::AMinus => 89,
            Self::BPlus => 84,
            Self::B => 79,
            Self::BMinus => 74,
            Self::CPlus => 69,
            Self::C => 64,
            Self::CMinus => 59,
            Self::D => 54,
            Self::F => 49,
        }
    }

    /// Map a percentage to the first grade whose band contains it.
    pub fn from_percentage(percentage: i32) -> Result<Self, GradeError> {
        if !(0..=100).contains(&percentage) {
            return Err(GradeError::InvalidRange(percentage));
        }
        Self::ALL
            .into_iter()
            .find(|g| {
                percentage >= i32::from(g.min_percentage())
                    && percentage <= i32::from(g.max_percentage())
            })
            .ok_or(GradeError::InvalidRange(percentage))
    }

    /// Every grade except `F` passes.
    #[must_use]
    pub const fn is_passing(self) -> bool {
        !matches!(self, Self::F)
    }

    /// Enum-style name (`A_PLUS`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::APlus => "A_PLUS",
            Self::A => "A",
            Self::AMinus => "A_MINUS",
            Self::BPlus => "B_PLUS",
            Self::B => "B",
            Self::BMinus => "B_MINUS",
            Self::CPlus => "C_PLUS",
            Self::C => "C",
            Self::CMinus => "C_MINUS",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Short symbol (`A+`, `B-`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::D => "D",
            Self::F => "F",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::APlus | Self::A => "Excellent",
            Self::AMinus | Self::BPlus => "Very Good",
            Self::B | Self::BMinus => "Good",
            Self::CPlus | Self::C => "Satisfactory",
            Self::CMinus => "Minimum Pass",
            Self::D => "Conditional Pass",
            Self::F => "Fail",
        }
    }

    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::APlus | Self::A => "Outstanding performance! Keep up the excellent work.",
            Self::AMinus | Self::BPlus => "Great job! You're doing very well.",
            Self::B | Self::BMinus => "Good work. Continue to apply yourself.",
            Self::CPlus | Self::C => "Satisfactory. Consider seeking additional help.",
            Self::CMinus | Self::D => "You're passing, but there's room for improvement.",
            Self::F => "Please meet with your instructor and consider tutoring.",
        }
    }

    /// Bracketed status tag used in grade listings.
    #[must_use]
    pub const fn status_tag(self) -> &'static str {
        match self {
            Self::APlus | Self::A | Self::AMinus => "[HONORS]",
            Self::BPlus | Self::B | Self::BMinus => "[GOOD]",
            Self::CPlus | Self::C | Self::CMinus => "[PASS]",
            Self::D => "[CONDITIONAL]",
            Self::F => "[FAIL]",
        }
    }

    /// `B-PLUS [GOOD] (3.3)`
    #[must_use]
    pub fn formatted_with_status(self) -> String {
        format!(
            "{} {} ({})",
            self,
            self.status_tag(),
            self.grade_point().to_tenths_string()
        )
    }

    /// Check this grade against a course requirement.
    #[must_use]
    pub fn meets(self, requirement: &Requirement) -> bool {
        match *requirement {
            Requirement::AtLeast(required) => self.grade_point() >= required.grade_point(),
            Requirement::MinPoints(points) => self.grade_point() >= points,
            Requirement::MinPercentage(min) => self.min_percentage() >= min,
            Requirement::Passing => self.is_passing(),
        }
    }
}

/// Variant name with `_` rendered as `-` (`A-PLUS`).
impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().replace('_', "-"))
    }
}

impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|g| {
                wanted == g.name() || wanted == g.symbol() || wanted == g.name().replace('_', "-")
            })
            .ok_or_else(|| GradeError::Unknown(s.to_string()))
    }
}

// =============================================================================
// BAND CHECK
// =============================================================================

/// Bands must run from 100 down to 0 without gaps or overlaps.
const fn bands_cover_percent_scale() -> bool {
    let all = Grade::ALL;
    if all[0].max_percentage() != 100 {
        return false;
    }
    let mut i = 1;
    while i < all.len() {
        let prev = all[i - 1];
        let cur = all[i];
        if cur.min_percentage() > cur.max_percentage()
            || cur.max_percentage() + 1 != prev.min_percentage()
        {
            return false;
        }
        i += 1;
    }
    all[all.len() - 1].min_percentage() == 0
}

const _: () = assert!(
    bands_cover_percent_scale(),
    "grade percentage bands must be contiguous over 0..=100"
);

// =============================================================================
// REQUIREMENTS
// =============================================================================

/// A minimum a grade must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Grade points at least those of the given grade.
    AtLeast(Grade),
    /// Grade points at least this value.
    MinPoints(GradePoints),
    /// Lower band edge at least this percentage.
    MinPercentage(u8),
    /// Any passing grade.
    Passing,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_percentage_band_edges() {
        assert_eq!(Grade::from_percentage(100), Ok(Grade::APlus));
        assert_eq!(Grade::from_percentage(95), Ok(Grade::APlus));
        assert_eq!(Grade::from_percentage(94), Ok(Grade::A));
        assert_eq!(Grade::from_percentage(80), Ok(Grade::BPlus));
        assert_eq!(Grade::from_percentage(50), Ok(Grade::D));
        assert_eq!(Grade::from_percentage(49), Ok(Grade::F));
        assert_eq!(Grade::from_percentage(0), Ok(Grade::F));
    }

    #[test]
    fn from_percentage_out_of_range() {
        assert_eq!(Grade::from_percentage(-1), Err(GradeError::InvalidRange(-1)));
        assert_eq!(Grade::from_percentage(101), Err(GradeError::InvalidRange(101)));
    }

    #[test]
    fn every_percentage_maps_to_exactly_one_band() {
        for p in 0u8..=100 {
            let matching = Grade::ALL
                .iter()
                .filter(|g| p >= g.min_percentage() && p <= g.max_percentage())
                .count();
            assert_eq!(matching, 1, "percentage {p}");
        }
        assert!(bands_cover_percent_scale());
    }

    #[test]
    fn only_f_fails() {
        let failing: Vec<_> = Grade::ALL.into_iter().filter(|g| !g.is_passing()).collect();
        assert_eq!(failing, vec![Grade::F]);
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(Grade::APlus.to_string(), "A-PLUS");
        assert_eq!(Grade::C.to_string(), "C");
        assert_eq!("A-PLUS".parse::<Grade>(), Ok(Grade::APlus));
        assert_eq!("b_minus".parse::<Grade>(), Ok(Grade::BMinus));
        assert_eq!("B+".parse::<Grade>(), Ok(Grade::BPlus));
        assert_eq!(" a- ".parse::<Grade>(), Ok(Grade::AMinus));
        assert!("E".parse::<Grade>().is_err());
    }

    #[test]
    fn grade_points_render() {
        assert_eq!(Grade::AMinus.grade_point().to_string(), "3.70");
        assert_eq!(Grade::BPlus.formatted_with_status(), "B-PLUS [GOOD] (3.3)");
        assert_eq!(Grade::F.formatted_with_status(), "F [FAIL] (0.0)");
    }

    #[test]
    fn requirements() {
        assert!(Grade::B.meets(&Requirement::AtLeast(Grade::BMinus)));
        assert!(!Grade::C.meets(&Requirement::AtLeast(Grade::B)));
        assert!(Grade::A.meets(&Requirement::MinPoints(GradePoints(400))));
        assert!(Grade::BPlus.meets(&Requirement::MinPercentage(80)));
        assert!(!Grade::B.meets(&Requirement::MinPercentage(80)));
        assert!(Grade::D.meets(&Requirement::Passing));
        assert!(!Grade::F.meets(&Requirement::Passing));
    }

    #[test]
    fn ordering_is_best_first() {
        assert!(Grade::APlus < Grade::F);
        assert!(Grade::APlus.grade_point() > Grade::F.grade_point());

        let mut grades = vec![Grade::C, Grade::APlus, Grade::F, Grade::BMinus];
        grades.sort();
        assert_eq!(grades, vec![Grade::APlus, Grade::BMinus, Grade::C, Grade::F]);
        assert_eq!(grades.iter().max_by_key(|g| g.grade_point()), Some(&Grade::APlus));
    }

    #[test]
    fn serde_uses_enum_names() {
        let json = serde_json::to_string(&Grade::BMinus).unwrap();
        assert_eq!(json, "\"B_MINUS\"");
        let back: Grade = serde_json::from_str("\"A_PLUS\"").unwrap();
        assert_eq!(back, Grade::APlus);
    }

    proptest! {
        #[test]
        fn property_percentage_lands_inside_its_band(p in 0i32..=100) {
            let grade = Grade::from_percentage(p).unwrap();
            prop_assert!(p >= i32::from(grade.min_percentage()));
            prop_assert!(p <= i32::from(grade.max_percentage()));
        }

        #[test]
        fn property_out_of_range_rejected(p in prop_oneof![i32::MIN..0, 101..i32::MAX]) {
            prop_assert_eq!(Grade::from_percentage(p), Err(GradeError::InvalidRange(p)));
        }
    }
}
