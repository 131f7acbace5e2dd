//! # Student Registry
//!
//! Stores students in admission order and answers predicate queries over
//! them. Queries hand out shared borrows; the registry itself is the only
//! place a student can be changed.

use crate::academic::{Gpa, HONOR_ROLL_GPA, is_honor_roll};
use crate::department::Department;
use crate::ids::StudentId;
use crate::person::Student;
use tracing::debug;

/// Predicate factories for [`StudentService::filter_students`].
pub mod predicates {
    use super::{Department, Gpa, Student};

    pub fn has_min_gpa(min: Gpa) -> impl Fn(&Student) -> bool {
        move |s| s.gpa() >= min
    }

    pub fn in_department(department: Department) -> impl Fn(&Student) -> bool {
        move |s| s.major() == department
    }

    pub fn in_any_department(departments: &[Department]) -> impl Fn(&Student) -> bool + '_ {
        move |s| departments.contains(&s.major())
    }

    pub fn is_active() -> impl Fn(&Student) -> bool {
        |s| s.is_active()
    }

    pub fn is_inactive() -> impl Fn(&Student) -> bool {
        |s| !s.is_active()
    }

    /// Both predicates must hold.
    pub fn and<A, B>(a: A, b: B) -> impl Fn(&Student) -> bool
    where
        A: Fn(&Student) -> bool,
        B: Fn(&Student) -> bool,
    {
        move |s| a(s) && b(s)
    }
}

/// Registry of students.
#[derive(Debug, Default)]
pub struct StudentService {
    students: Vec<Student>,
}

impl StudentService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_student(&mut self, student: Student) {
        debug!(student = %student.id(), major = %student.major(), "student added");
        self.students.push(student);
    }

    /// Owned copy of every student, in admission order.
    #[must_use]
    pub fn all_students(&self) -> Vec<Student> {
        self.students.clone()
    }

    #[must_use]
    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id() == id)
    }

    // =========================================================================
    // FILTERING
    // =========================================================================

    /// Students matching `predicate`, in admission order.
    pub fn filter_students<P>(&self, predicate: P) -> Vec<&Student>
    where
        P: Fn(&Student) -> bool,
    {
        self.students.iter().filter(|s| predicate(s)).collect()
    }

    pub fn count_students<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Student) -> bool,
    {
        self.students.iter().filter(|s| predicate(s)).count()
    }

    #[must_use]
    pub fn find_by_major(&self, major: Department) -> Vec<&Student> {
        self.filter_students(predicates::in_department(major))
    }

    #[must_use]
    pub fn find_by_min_gpa(&self, min: Gpa) -> Vec<&Student> {
        self.filter_students(predicates::has_min_gpa(min))
    }

    #[must_use]
    pub fn find_honor_roll_students(&self) -> Vec<&Student> {
        self.filter_students(|s| is_honor_roll(s.gpa()))
    }

    #[must_use]
    pub fn find_active_students(&self) -> Vec<&Student> {
        self.filter_students(predicates::is_active())
    }

    #[must_use]
    pub fn find_inactive_students(&self) -> Vec<&Student> {
        self.filter_students(predicates::is_inactive())
    }

    #[must_use]
    pub fn find_by_major_and_gpa(&self, major: Department, min: Gpa) -> Vec<&Student> {
        self.filter_students(predicates::and(
            predicates::in_department(major),
            predicates::has_min_gpa(min),
        ))
    }

    #[must_use]
    pub fn find_in_departments(&self, departments: &[Department]) -> Vec<&Student> {
        self.filter_students(predicates::in_any_department(departments))
    }

    /// Major, GPA floor and, optionally, active students only.
    #[must_use]
    pub fn find_by_criteria(&self, major: Department, min: Gpa, active_only: bool) -> Vec<&Student> {
        self.filter_students(move |s| {
            s.major() == major && s.gpa() >= min && (!active_only || s.is_active())
        })
    }

    /// Honor-roll students, best GPA first, at most `limit`.
    ///
    /// Ties keep admission order.
    #[must_use]
    pub fn find_top_performers(&self, limit: usize) -> Vec<&Student> {
        let mut top = self.find_by_min_gpa(HONOR_ROLL_GPA);
        top.sort_by(|a, b| b.gpa().cmp(&a.gpa()));
        top.truncate(limit);
        top
    }

    // =========================================================================
    // AGGREGATES
    // =========================================================================

    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn student_names(&self) -> Vec<String> {
        self.students.iter().map(Student::full_name).collect()
    }

    /// Mean of student GPAs; 0.00 with no students.
    #[must_use]
    pub fn average_gpa(&self) -> Gpa {
        Gpa::average(self.students.iter().map(Student::gpa))
    }
}

// =============================================================================
// TESTS
// =============================================================================
