//! # Enrollment Service
//!
//! Sole owner of the enrollment facts.
//!
//! Rules checked by [`EnrollmentService::enroll`], in order:
//! 1. the course code is not empty
//! 2. the student is active
//! 3. the course has a free seat (checked before duplicates)
//! 4. no fact already links the student to the course, graded or not
//!
//! Every query returns an owned snapshot; nothing handed out aliases the
//! internal collection.

use crate::clock::{Clock, SystemClock};
use crate::course::Course;
use crate::enrollment::Enrollment;
use crate::error::{CampusResult, EnrollmentError};
use crate::grade::Grade;
use crate::ids::StudentId;
use crate::person::Student;
use tracing::{debug, warn};

/// Holds every enrollment fact in insertion order.
#[derive(Debug)]
pub struct EnrollmentService {
    enrollments: Vec<Enrollment>,
    clock: Box<dyn Clock>,
}

impl Default for EnrollmentService {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrollmentService {
    /// Service dating facts with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            enrollments: Vec::new(),
            clock,
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Enroll `student` in `course`, taking a seat on the course roster.
    pub fn enroll(&mut self, student: &Student, course: &mut Course) -> CampusResult<Enrollment> {
        if course.code().trim().is_empty() {
            return Err(EnrollmentError::InvalidArgument(
                "course code cannot be empty".to_string(),
            ));
        }
        if !student.is_active() {
            return Err(EnrollmentError::StudentInactive {
                student_id: student.id().to_string(),
            });
        }
        if course.is_full() {
            return Err(EnrollmentError::CourseFull {
                course_code: course.code().to_string(),
                capacity: course.capacity(),
            });
        }
        if self.is_enrolled(student.id(), course.code()) {
            return Err(duplicate(student.id(), course.code()));
        }

        let enrollment = Enrollment::new(student.id(), course.code(), self.clock.today())?;
        if !course.enroll_student(student.id())? {
            // Seated without a fact: the caller touched the roster directly.
            return Err(duplicate(student.id(), course.code()));
        }
        self.enrollments.push(enrollment.clone());

        debug!(
            student = %student.id(),
            course = course.code(),
            enrolled = course.enrolled(),
            capacity = course.capacity(),
            "enrolled"
        );
        Ok(enrollment)
    }

    /// Enroll one student in several courses, in order.
    ///
    /// A full course is logged and skipped. Any other failure stops the batch
    /// and is returned; enrollments made before it are kept.
    pub fn enroll_batch<'a, I>(&mut self, student: &Student, courses: I) -> CampusResult<Vec<Enrollment>>
    where
        I: IntoIterator<Item = &'a mut Course>,
    {
        let mut created = Vec::new();
        for course in courses {
            match self.enroll(student, course) {
                Ok(enrollment) => created.push(enrollment),
                Err(err) if err.is_skippable() => {
                    warn!(student = %student.id(), error = %err, "skipping full course");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(created)
    }

    /// Replace the fact for (`student_id`, `course_code`) with a graded one.
    ///
    /// Only the fact store changes. The student's own grade history is
    /// updated separately (see `Registrar::record_grade`).
    pub fn assign_grade(
        &mut self,
        student_id: StudentId,
        course_code: &str,
        grade: Grade,
    ) -> CampusResult<()> {
        let slot = self
            .enrollments
            .iter_mut()
            .find(|e| e.links(student_id, course_code))
            .ok_or_else(|| EnrollmentError::EnrollmentNotFound {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            })?;

        *slot = slot.with_grade(grade);
        debug!(student = %student_id, course = course_code, grade = %grade, "grade assigned");
        Ok(())
    }

    /// Drop an ungraded enrollment and free the seat on `course`.
    ///
    /// Returns `false`, changing nothing, when there is no fact or the fact
    /// is already graded.
    pub fn drop_course(&mut self, student_id: StudentId, course: &mut Course) -> bool {
        let Some(index) = self
            .enrollments
            .iter()
            .position(|e| e.links(student_id, course.code()))
        else {
            return false;
        };
        if self.enrollments[index].is_graded() {
            debug!(student = %student_id, course = course.code(), "graded enrollment cannot be dropped");
            return false;
        }

        self.enrollments.remove(index);
        course.remove_student(student_id);
        debug!(student = %student_id, course = course.code(), "dropped");
        true
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    #[must_use]
    pub fn is_enrolled(&self, student_id: StudentId, course_code: &str) -> bool {
        self.enrollments
            .iter()
            .any(|e| e.links(student_id, course_code))
    }

    #[must_use]
    pub fn find_enrollment(&self, student_id: StudentId, course_code: &str) -> Option<Enrollment> {
        self.enrollments
            .iter()
            .find(|e| e.links(student_id, course_code))
            .cloned()
    }

    #[must_use]
    pub fn student_enrollments(&self, student_id: StudentId) -> Vec<Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.student_id() == student_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn course_enrollments(&self, course_code: &str) -> Vec<Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.course_code() == course_code)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn all_enrollments(&self) -> Vec<Enrollment> {
        self.enrollments.clone()
    }

    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.enrollments.len()
    }

    /// Today's date according to the service clock.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}

fn duplicate(student_id: StudentId, course_code: &str) -> EnrollmentError {
    EnrollmentError::DuplicateEnrollment {
        student_id: student_id.to_string(),
        course_code: course_code.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::clock::FixedClock;
    use crate::department::Department;
    use crate::person::Profile;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    fn service() -> EnrollmentService {
        EnrollmentService::with_clock(Box::new(FixedClock(today())))
    }

    fn student(n: u32) -> Student {
        Student::new(
            StudentId::from_sequence(n),
            Profile::new(format!("First{n}"), "Last", format!("s{n}@uni.edu")),
            Department::ComputerScience,
            today(),
        )
    }

    fn course(code: &str, capacity: usize) -> Course {
        Course::with_capacity(code, "Course", Department::ComputerScience, 3, capacity)
    }

    #[test]
    fn enroll_takes_a_seat_and_records_ungraded_fact() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 10);

        let fact = svc.enroll(&s, &mut c).unwrap();

        assert_eq!(c.enrolled(), 1);
        assert!(c.has_student(s.id()));
        assert_eq!(fact.final_grade(), None);
        assert_eq!(fact.enrollment_date(), today());
        assert_eq!(svc.all_enrollments(), vec![fact]);
    }

    #[test]
    fn inactive_student_rejected() {
        let mut svc = service();
        let mut s = student(1);
        s.set_active(false);
        let mut c = course("CS101", 10);

        let err = svc.enroll(&s, &mut c).unwrap_err();
        assert!(matches!(err, EnrollmentError::StudentInactive { .. }));
        assert_eq!(c.enrolled(), 0);
        assert_eq!(svc.enrollment_count(), 0);
    }

    #[test]
    fn empty_course_code_is_validation_error() {
        let mut svc = service();
        let mut c = course("", 10);
        let err = svc.enroll(&student(1), &mut c).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn capacity_two_scenario() {
        let mut svc = service();
        let (a, b, c) = (student(1), student(2), student(3));
        let mut course = course("CS101", 2);

        svc.enroll(&a, &mut course).unwrap();
        svc.enroll(&b, &mut course).unwrap();
        assert_eq!(course.enrolled(), 2);

        let err = svc.enroll(&c, &mut course).unwrap_err();
        assert!(matches!(err, EnrollmentError::CourseFull { capacity: 2, .. }));

        // Full is checked before duplicate, and A's own seat frees nothing.
        let err = svc.enroll(&a, &mut course).unwrap_err();
        assert!(matches!(err, EnrollmentError::CourseFull { .. }));
        assert_eq!(course.enrolled(), 2);
        assert_eq!(svc.enrollment_count(), 2);
    }

    #[test]
    fn duplicate_rejected_without_changing_count() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 10);

        svc.enroll(&s, &mut c).unwrap();
        let err = svc.enroll(&s, &mut c).unwrap_err();

        assert!(matches!(err, EnrollmentError::DuplicateEnrollment { .. }));
        assert_eq!(c.enrolled(), 1);
        assert_eq!(svc.enrollment_count(), 1);
    }

    #[test]
    fn graded_fact_still_blocks_reenrollment() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 10);

        svc.enroll(&s, &mut c).unwrap();
        svc.assign_grade(s.id(), "CS101", Grade::F).unwrap();

        let err = svc.enroll(&s, &mut c).unwrap_err();
        assert!(matches!(err, EnrollmentError::DuplicateEnrollment { .. }));
    }

    #[test]
    fn seat_held_without_fact_is_duplicate() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 10);
        c.enroll_student(s.id()).unwrap();

        let err = svc.enroll(&s, &mut c).unwrap_err();
        assert!(matches!(err, EnrollmentError::DuplicateEnrollment { .. }));
        assert_eq!(svc.enrollment_count(), 0);
    }

    #[test]
    fn batch_skips_full_courses() {
        let mut svc = service();
        let s = student(1);
        let mut open = course("CS101", 5);
        let mut full = course("CS102", 0);
        let mut later = course("CS103", 5);

        let created = svc
            .enroll_batch(&s, [&mut open, &mut full, &mut later])
            .unwrap();

        let codes: Vec<_> = created.iter().map(|e| e.course_code().to_string()).collect();
        assert_eq!(codes, vec!["CS101", "CS103"]);
        assert_eq!(full.enrolled(), 0);
    }

    #[test]
    fn batch_aborts_on_other_errors_without_rollback() {
        let mut svc = service();
        let s = student(1);
        let mut first = course("CS101", 5);
        let mut dup = course("CS102", 5);
        let mut never = course("CS103", 5);
        svc.enroll(&s, &mut dup).unwrap();

        let err = svc
            .enroll_batch(&s, [&mut first, &mut dup, &mut never])
            .unwrap_err();

        assert!(matches!(err, EnrollmentError::DuplicateEnrollment { .. }));
        assert!(svc.is_enrolled(s.id(), "CS101"));
        assert!(!svc.is_enrolled(s.id(), "CS103"));
        assert_eq!(never.enrolled(), 0);
    }

    #[test]
    fn assign_grade_replaces_fact() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 5);
        let original = svc.enroll(&s, &mut c).unwrap();

        svc.assign_grade(s.id(), "CS101", Grade::BPlus).unwrap();

        let facts = svc.student_enrollments(s.id());
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].final_grade(), Some(Grade::BPlus));
        assert_eq!(facts[0].enrollment_date(), original.enrollment_date());
        assert!(!facts.contains(&original));
    }

    #[test]
    fn assign_grade_missing_pair_leaves_state_unchanged() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 5);
        svc.enroll(&s, &mut c).unwrap();
        let before = svc.all_enrollments();

        let err = svc.assign_grade(s.id(), "CS999", Grade::A).unwrap_err();

        assert!(matches!(err, EnrollmentError::EnrollmentNotFound { .. }));
        assert_eq!(svc.all_enrollments(), before);
    }

    #[test]
    fn drop_frees_seat_for_ungraded_only() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 1);
        svc.enroll(&s, &mut c).unwrap();

        assert!(svc.drop_course(s.id(), &mut c));
        assert_eq!(c.enrolled(), 0);
        assert_eq!(svc.enrollment_count(), 0);
        assert!(!svc.drop_course(s.id(), &mut c));

        svc.enroll(&s, &mut c).unwrap();
        svc.assign_grade(s.id(), "CS101", Grade::C).unwrap();
        assert!(!svc.drop_course(s.id(), &mut c));
        assert_eq!(c.enrolled(), 1);
        assert_eq!(svc.enrollment_count(), 1);
    }

    #[test]
    fn snapshots_do_not_alias() {
        let mut svc = service();
        let s = student(1);
        let mut c = course("CS101", 5);
        svc.enroll(&s, &mut c).unwrap();

        let mut snapshot = svc.all_enrollments();
        snapshot.clear();
        let mut by_course = svc.course_enrollments("CS101");
        by_course.push(by_course[0].with_grade(Grade::A));

        assert_eq!(svc.enrollment_count(), 1);
        assert_eq!(svc.course_enrollments("CS101").len(), 1);
    }

    #[test]
    fn queries_filter_by_student_and_course() {
        let mut svc = service();
        let (a, b) = (student(1), student(2));
        let mut c1 = course("CS101", 5);
        let mut c2 = course("CS102", 5);
        svc.enroll(&a, &mut c1).unwrap();
        svc.enroll(&a, &mut c2).unwrap();
        svc.enroll(&b, &mut c1).unwrap();

        assert_eq!(svc.student_enrollments(a.id()).len(), 2);
        assert_eq!(svc.student_enrollments(b.id()).len(), 1);
        assert_eq!(svc.course_enrollments("CS101").len(), 2);
        assert_eq!(svc.course_enrollments("cs101").len(), 0);
        assert!(svc.find_enrollment(b.id(), "CS102").is_none());
    }

    proptest! {
        /// PROPERTY: below capacity, enroll adds exactly one seat and one fact.
        #[test]
        fn property_enroll_below_capacity(capacity in 1usize..20, already in 0usize..20) {
            let already = already.min(capacity - 1);
            let mut svc = service();
            let mut c = course("CS101", capacity);
            for n in 0..already {
                svc.enroll(&student(n as u32 + 100), &mut c).unwrap();
            }

            let s = student(1);
            let before = c.enrolled();
            svc.enroll(&s, &mut c).unwrap();

            prop_assert_eq!(c.enrolled(), before + 1);
            let facts: Vec<_> = svc
                .all_enrollments()
                .into_iter()
                .filter(|e| e.links(s.id(), "CS101"))
                .collect();
            prop_assert_eq!(facts.len(), 1);
            prop_assert!(!facts[0].is_graded());
        }

        /// PROPERTY: a full course rejects every student.
        #[test]
        fn property_full_course_rejects(capacity in 0usize..10, who in 1u32..1000) {
            let mut svc = service();
            let mut c = course("CS101", capacity);
            for n in 0..capacity {
                svc.enroll(&student(n as u32 + 5000), &mut c).unwrap();
            }

            let err = svc.enroll(&student(who), &mut c).unwrap_err();
            let is_course_full = matches!(err, EnrollmentError::CourseFull { .. });
            prop_assert!(is_course_full);
            prop_assert_eq!(c.enrolled(), capacity);
        }
    }
}
