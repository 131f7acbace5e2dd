//! # Transcript
//!
//! Point-in-time snapshot of a student's record. Nothing changes after
//! construction.
//!
//! Identity is (student id, generated date): two transcripts for the same
//! student on the same day are equal even if their contents differ.

use crate::academic::Gpa;
use crate::clock::{Clock, SystemClock};
use crate::department::Department;
use crate::enrollment::Enrollment;
use crate::ids::StudentId;
use crate::person::Student;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Credits counted per enrollment.
pub const CREDITS_PER_ENROLLMENT: u32 = 3;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    student_id: StudentId,
    student_name: String,
    major: Department,
    enrollments: Vec<Enrollment>,
    gpa: Gpa,
    generated_date: NaiveDate,
    total_credits: u32,
}

impl Transcript {
    /// Snapshot dated today by [`SystemClock`].
    #[must_use]
    pub fn create_from_student(student: &Student, enrollments: &[Enrollment]) -> Self {
        Self::create_from_student_on(student, enrollments, SystemClock.today())
    }

    #[must_use]
    pub fn create_from_student_on(
        student: &Student,
        enrollments: &[Enrollment],
        generated_date: NaiveDate,
    ) -> Self {
        let count = u32::try_from(enrollments.len()).unwrap_or(u32::MAX);
        Self {
            student_id: student.id(),
            student_name: student.full_name(),
            major: student.major(),
            enrollments: enrollments.to_vec(),
            gpa: student.gpa(),
            generated_date,
            total_credits: count.saturating_mul(CREDITS_PER_ENROLLMENT),
        }
    }

    #[must_use]
    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn major(&self) -> Department {
        self.major
    }

    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    #[must_use]
    pub fn gpa(&self) -> Gpa {
        self.gpa
    }

    #[must_use]
    pub fn generated_date(&self) -> NaiveDate {
        self.generated_date
    }

    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    /// Fixed-width text report.
    #[must_use]
    pub fn generate_report(&self) -> String {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        let mut report = String::new();
        report.push_str(&format!("{heavy}\nOFFICIAL TRANSCRIPT\n{heavy}\n\n"));
        report.push_str(&format!("Student ID: {}\n", self.student_id));
        report.push_str(&format!("Name: {}\n", self.student_name));
        report.push_str(&format!("Major: {}\n", self.major.full_name()));
        report.push_str(&format!("GPA: {}\n", self.gpa));
        report.push_str(&format!("Total Credits: {}\n", self.total_credits));
        report.push_str(&format!("Generated: {}\n\n", self.generated_date));
        report.push_str(&format!("COURSE HISTORY:\n{light}\n"));

        for enrollment in &self.enrollments {
            let grade = enrollment
                .final_grade()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "In Progress".to_string());
            // chrono ignores width flags, so pad the rendered date.
            let date = enrollment.enrollment_date().to_string();
            report.push_str(&format!(
                "{:<10}  {:<30}  {}\n",
                enrollment.course_code(),
                date,
                grade
            ));
        }

        report.push_str(&heavy);
        report.push('\n');
        report
    }
}

impl PartialEq for Transcript {
    fn eq(&self, other: &Self) -> bool {
        self.student_id == other.student_id && self.generated_date == other.generated_date
    }
}

impl Eq for Transcript {}

impl Hash for Transcript {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.student_id.hash(state);
        self.generated_date.hash(state);
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transcript{{student='{}', gpa={}, credits={}, date={}}}",
            self.student_name, self.gpa, self.total_credits, self.generated_date
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::grade::Grade;
    use crate::person::Profile;
    use std::collections::HashSet;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    fn alice() -> Student {
        let mut s = Student::new(
            StudentId::from_sequence(1),
            Profile::new("Alice", "Smith", "alice@uni.edu"),
            Department::ComputerScience,
            date(1),
        );
        s.add_grades([Grade::A, Grade::BPlus]);
        s
    }

    fn facts() -> Vec<Enrollment> {
        let id = StudentId::from_sequence(1);
        vec![
            Enrollment::new(id, "CS101", date(2)).unwrap().with_grade(Grade::A),
            Enrollment::new(id, "MATH101", date(3)).unwrap(),
        ]
    }

    #[test]
    fn undated_snapshot_uses_system_clock() {
        let before = SystemClock.today();
        let t = Transcript::create_from_student(&alice(), &facts());
        let after = SystemClock.today();
        assert!(before <= t.generated_date() && t.generated_date() <= after);
    }

    #[test]
    fn snapshot_fields() {
        let t = Transcript::create_from_student_on(&alice(), &facts(), date(20));
        assert_eq!(t.student_id().to_string(), "STU00001");
        assert_eq!(t.student_name(), "Alice Smith");
        assert_eq!(t.major(), Department::ComputerScience);
        assert_eq!(t.gpa().to_string(), "3.65");
        assert_eq!(t.total_credits(), 6);
        assert_eq!(t.enrollments().len(), 2);
    }

    #[test]
    fn later_student_changes_do_not_leak_in() {
        let mut s = alice();
        let t = Transcript::create_from_student_on(&s, &[], date(20));
        s.add_grade(Grade::F);
        assert_eq!(t.gpa().to_string(), "3.65");
        assert_eq!(t.total_credits(), 0);
    }

    #[test]
    fn equality_ignores_contents() {
        let a = Transcript::create_from_student_on(&alice(), &facts(), date(20));
        let b = Transcript::create_from_student_on(&alice(), &[], date(20));
        assert_ne!(a.total_credits(), b.total_credits());
        assert_eq!(a, b);

        let set: HashSet<_> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);

        let next_day = Transcript::create_from_student_on(&alice(), &facts(), date(21));
        assert_ne!(a, next_day);
    }

    #[test]
    fn report_layout() {
        let t = Transcript::create_from_student_on(&alice(), &facts(), date(20));
        let rule = "=".repeat(50);
        let expected = format!(
            "{rule}\nOFFICIAL TRANSCRIPT\n{rule}\n\n\
             Student ID: STU00001\n\
             Name: Alice Smith\n\
             Major: Computer Science\n\
             GPA: 3.65\n\
             Total Credits: 6\n\
             Generated: 2024-09-20\n\n\
             COURSE HISTORY:\n{dash}\n\
             CS101       2024-09-02                      A\n\
             MATH101     2024-09-03                      In Progress\n\
             {rule}\n",
            dash = "-".repeat(50),
        );
        assert_eq!(t.generate_report(), expected);
    }

    #[test]
    fn display() {
        let t = Transcript::create_from_student_on(&alice(), &facts(), date(20));
        assert_eq!(
            t.to_string(),
            "Transcript{student='Alice Smith', gpa=3.65, credits=6, date=2024-09-20}"
        );
    }
}
