//! # People
//!
//! Students and instructors share a [`Profile`] by composition. [`Person`] is
//! the closed sum of the two; no other kind of person exists.

use crate::academic::{Enrollable, Gpa, Gradeable, compute_gpa};
use crate::department::Department;
use crate::grade::Grade;
use crate::ids::{InstructorId, StudentId};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PROFILE
// =============================================================================

/// Personal details common to every person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

impl Profile {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            date_of_birth: None,
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Calendar-year difference to `today`; 0 without a date of birth.
    #[must_use]
    pub fn age(&self, today: NaiveDate) -> u32 {
        self.date_of_birth
            .map(|dob| u32::try_from(today.year() - dob.year()).unwrap_or(0))
            .unwrap_or(0)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person{{name='{} {}', email='{}'}}",
            self.first_name, self.last_name, self.email
        )
    }
}

// =============================================================================
// STUDENT
// =============================================================================

/// A student record.
///
/// The GPA is recomputed from the whole grade history whenever a grade is
/// added and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    id: StudentId,
    #[serde(flatten)]
    profile: Profile,
    major: Department,
    grades: Vec<Grade>,
    enrollment_date: NaiveDate,
    gpa: Gpa,
    active: bool,
}

impl Student {
    /// Create an active student with an empty grade history.
    #[must_use]
    pub fn new(
        id: StudentId,
        profile: Profile,
        major: Department,
        enrollment_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            profile,
            major,
            grades: Vec::new(),
            enrollment_date,
            gpa: Gpa::ZERO,
            active: true,
        }
    }

    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        self.profile.full_name()
    }

    /// `Student: Ada Lovelace`
    #[must_use]
    pub fn full_student_name(&self) -> String {
        format!("Student: {}", self.profile.full_name())
    }

    #[must_use]
    pub fn role(&self) -> &'static str {
        "Student"
    }

    #[must_use]
    pub fn major(&self) -> Department {
        self.major
    }

    pub fn set_major(&mut self, major: Department) {
        self.major = major;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[must_use]
    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    #[must_use]
    pub fn gpa(&self) -> Gpa {
        self.gpa
    }

    /// Read-only view of the grade history, oldest first.
    #[must_use]
    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn add_grade(&mut self, grade: Grade) {
        self.grades.push(grade);
        self.recompute_gpa();
    }

    /// Append several grades, recomputing the GPA once.
    pub fn add_grades<I>(&mut self, grades: I)
    where
        I: IntoIterator<Item = Grade>,
    {
        self.grades.extend(grades);
        self.recompute_gpa();
    }

    fn recompute_gpa(&mut self) {
        self.gpa = compute_gpa(&self.grades);
    }

    /// Profile summary followed by id, major and GPA.
    #[must_use]
    pub fn detailed_info(&self) -> String {
        format!(
            "{}, Student ID: {}, Major: {}, GPA: {}",
            self.profile, self.id, self.major, self.gpa
        )
    }
}

impl Gradeable for Student {
    fn gpa(&self) -> Gpa {
        self.gpa
    }

    fn grades(&self) -> &[Grade] {
        &self.grades
    }
}

impl Enrollable for Student {
    fn enrollment_id(&self) -> String {
        self.id.to_string()
    }

    fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student{{id='{}', name='{}', major={}, gpa={}}}",
            self.id,
            self.profile.full_name(),
            self.major,
            self.gpa
        )
    }
}

// =============================================================================
// INSTRUCTOR
// =============================================================================

/// An instructor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instructor {
    id: InstructorId,
    #[serde(flatten)]
    profile: Profile,
    department: Department,
    office_hours: Vec<String>,
    courses_taught: Vec<String>,
    /// Annual salary in whole currency units.
    salary: u32,
}

impl Instructor {
    #[must_use]
    pub fn new(id: InstructorId, profile: Profile, department: Department, salary: u32) -> Self {
        Self {
            id,
            profile,
            department,
            office_hours: Vec::new(),
            courses_taught: Vec::new(),
            salary,
        }
    }

    #[must_use]
    pub fn id(&self) -> InstructorId {
        self.id
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        self.profile.full_name()
    }

    /// `Instructor - Computer Science`
    #[must_use]
    pub fn role(&self) -> String {
        format!("Instructor - {}", self.department.full_name())
    }

    /// `Grace Hopper - CS Department`
    #[must_use]
    pub fn instructor_profile(&self) -> String {
        format!(
            "{} - {} Department",
            self.profile.full_name(),
            self.department.code()
        )
    }

    #[must_use]
    pub fn department(&self) -> Department {
        self.department
    }

    pub fn set_department(&mut self, department: Department) {
        self.department = department;
    }

    #[must_use]
    pub fn salary(&self) -> u32 {
        self.salary
    }

    pub fn set_salary(&mut self, salary: u32) {
        self.salary = salary;
    }

    /// Replace the office-hour slots.
    pub fn set_office_hours<I, S>(&mut self, hours: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.office_hours = hours.into_iter().map(Into::into).collect();
    }

    #[must_use]
    pub fn office_hours(&self) -> &[String] {
        &self.office_hours
    }

    /// Record a taught course; repeated codes are ignored.
    pub fn add_course(&mut self, course_code: impl Into<String>) {
        let code = course_code.into();
        if !self.courses_taught.contains(&code) {
            self.courses_taught.push(code);
        }
    }

    #[must_use]
    pub fn courses_taught(&self) -> &[String] {
        &self.courses_taught
    }
}

impl fmt::Display for Instructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instructor{{id='{}', name='{}', department={}}}",
            self.id,
            self.profile.full_name(),
            self.department
        )
    }
}

// =============================================================================
// PERSON
// =============================================================================

/// Either a student or an instructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Person {
    Student(Student),
    Instructor(Instructor),
}

impl Person {
    #[must_use]
    pub fn profile(&self) -> &Profile {
        match self {
            Self::Student(s) => s.profile(),
            Self::Instructor(i) => i.profile(),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        self.profile().full_name()
    }

    #[must_use]
    pub fn role(&self) -> String {
        match self {
            Self::Student(s) => s.role().to_string(),
            Self::Instructor(i) => i.role(),
        }
    }

    /// Display id (`STU00001` / `INS00001`).
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Student(s) => s.id().to_string(),
            Self::Instructor(i) => i.id().to_string(),
        }
    }
}

impl From<Student> for Person {
    fn from(student: Student) -> Self {
        Self::Student(student)
    }
}

impl From<Instructor> for Person {
    fn from(instructor: Instructor) -> Self {
        Self::Instructor(instructor)
    }
}

// =============================================================================
// TESTS
// =============================================================================
