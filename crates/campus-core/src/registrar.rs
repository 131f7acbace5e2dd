//! # Registrar
//!
//! Single entry point over the id generator, the student registry and the
//! enrollment store.
//!
//! [`Registrar::record_grade`] is the one path that keeps a student's grade
//! history and their enrollment facts in step: the fact is graded first and
//! the history is only touched if that succeeded.

use crate::clock::{Clock, SystemClock};
use crate::course::Course;
use crate::department::Department;
use crate::enrollment::Enrollment;
use crate::enrollment_service::EnrollmentService;
use crate::error::{CampusResult, EnrollmentError};
use crate::grade::Grade;
use crate::ids::{IdGenerator, StudentId};
use crate::person::{Instructor, Profile, Student};
use crate::student_service::StudentService;
use crate::transcript::Transcript;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Registrar {
    ids: IdGenerator,
    students: StudentService,
    enrollments: EnrollmentService,
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}

impl Registrar {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Registrar whose dates all come from `clock`.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            ids: IdGenerator::new(),
            students: StudentService::new(),
            enrollments: EnrollmentService::with_clock(clock),
        }
    }

    // =========================================================================
    // PEOPLE
    // =========================================================================

    /// Register a new active student, admitted today.
    pub fn admit_student(&mut self, profile: Profile, major: Department) -> StudentId {
        let id = self.ids.next_student_id();
        let student = Student::new(id, profile, major, self.enrollments.today());
        info!(student = %id, name = %student.full_name(), "student admitted");
        self.students.add_student(student);
        id
    }

    /// Issue an instructor id. Instructors are not kept by the registrar.
    pub fn hire_instructor(&mut self, profile: Profile, department: Department, salary: u32) -> Instructor {
        let id = self.ids.next_instructor_id();
        debug!(instructor = %id, department = %department, "instructor hired");
        Instructor::new(id, profile, department, salary)
    }

    /// Mark a student inactive (or active again).
    pub fn set_active(&mut self, student_id: StudentId, active: bool) -> CampusResult<()> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| unknown_student(student_id))?;
        student.set_active(active);
        Ok(())
    }

    // =========================================================================
    // ENROLLMENT
    // =========================================================================

    pub fn enroll(&mut self, student_id: StudentId, course: &mut Course) -> CampusResult<Enrollment> {
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| unknown_student(student_id))?;
        self.enrollments.enroll(student, course)
    }

    pub fn enroll_batch<'a, I>(&mut self, student_id: StudentId, courses: I) -> CampusResult<Vec<Enrollment>>
    where
        I: IntoIterator<Item = &'a mut Course>,
    {
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| unknown_student(student_id))?;
        self.enrollments.enroll_batch(student, courses)
    }

    /// Grade the enrollment fact, then append the grade to the student's
    /// history.
    ///
    /// Fails, changing nothing, with `EnrollmentNotFound` when the student
    /// holds no enrollment in `course_code` and with `AlreadyGraded` when
    /// that enrollment already has a final grade. The history never holds
    /// more grades than there are graded facts.
    pub fn record_grade(&mut self, student_id: StudentId, course_code: &str, grade: Grade) -> CampusResult<()> {
        if self.students.get(student_id).is_none() {
            return Err(unknown_student(student_id));
        }
        match self.enrollments.find_enrollment(student_id, course_code) {
            None => {
                return Err(EnrollmentError::EnrollmentNotFound {
                    student_id: student_id.to_string(),
                    course_code: course_code.to_string(),
                });
            }
            Some(existing) if existing.is_graded() => {
                return Err(EnrollmentError::AlreadyGraded {
                    student_id: student_id.to_string(),
                    course_code: course_code.to_string(),
                });
            }
            Some(_) => {}
        }
        self.enrollments.assign_grade(student_id, course_code, grade)?;

        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| unknown_student(student_id))?;
        student.add_grade(grade);
        info!(
            student = %student_id,
            course = course_code,
            grade = %grade,
            gpa = %student.gpa(),
            "grade recorded"
        );
        Ok(())
    }

    pub fn drop_course(&mut self, student_id: StudentId, course: &mut Course) -> bool {
        self.enrollments.drop_course(student_id, course)
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    /// Transcript of every enrollment the student holds, dated today.
    pub fn transcript(&self, student_id: StudentId) -> CampusResult<Transcript> {
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| unknown_student(student_id))?;
        let facts = self.enrollments.student_enrollments(student_id);
        Ok(Transcript::create_from_student_on(
            student,
            &facts,
            self.enrollments.today(),
        ))
    }

    #[must_use]
    pub fn students(&self) -> &StudentService {
        &self.students
    }

    #[must_use]
    pub fn enrollments(&self) -> &EnrollmentService {
        &self.enrollments
    }
}

fn unknown_student(student_id: StudentId) -> EnrollmentError {
    EnrollmentError::InvalidArgument(format!("unknown student {student_id}"))
}
