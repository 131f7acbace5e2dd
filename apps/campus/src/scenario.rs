//! # Scenario Runner
//!
//! A scenario is a JSON document listing instructors, courses and students,
//! then a sequence of actions to run against a [`Registrar`].
//!
//! ```json
//! {
//!   "today": "2024-09-02",
//!   "instructors": [{ "key": "johnson", "first_name": "Sarah", "last_name": "Johnson",
//!                     "email": "s.johnson@uni.edu", "department": "CS", "salary": 75000 }],
//!   "courses": [{ "code": "CS101", "name": "Intro", "department": "CS", "credits": 3,
//!                 "capacity": 2, "instructor": "johnson" }],
//!   "students": [{ "key": "alice", "first_name": "Alice", "last_name": "Smith",
//!                  "email": "alice@uni.edu", "major": "CS" }],
//!   "actions": [{ "action": "enroll", "student": "alice", "course": "CS101" },
//!               { "action": "grade", "student": "alice", "course": "CS101", "grade": "A" }]
//! }
//! ```
//!
//! Business-rule failures (full course, duplicate, inactive student, missing
//! enrollment) are recorded as rejections and the run continues. Anything
//! else, such as an unknown key or an unparseable grade, aborts the run.

use campus_core::{
    Clock, Course, CourseSchedule, DEFAULT_CAPACITY, Department, EnrollmentError, FixedClock, Gpa,
    Grade, GradeError, Instructor, Person, Profile, Registrar, StudentId, SystemClock, Transcript,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::{info, warn};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown student key {0:?}")]
    UnknownStudent(String),

    #[error("unknown course code {0:?}")]
    UnknownCourse(String),

    #[error("unknown instructor key {0:?}")]
    UnknownInstructor(String),

    #[error("{kind} {key:?} is defined twice")]
    Duplicate { kind: &'static str, key: String },

    #[error(transparent)]
    Enrollment(#[from] EnrollmentError),

    #[error(transparent)]
    Grade(#[from] GradeError),
}

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Pins the registrar clock; the system date is used when absent.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub instructors: Vec<InstructorSpec>,
    #[serde(default)]
    pub courses: Vec<CourseSpec>,
    #[serde(default)]
    pub students: Vec<StudentSpec>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstructorSpec {
    pub key: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Department code, variant name or full name.
    pub department: String,
    pub salary: u32,
    #[serde(default)]
    pub office_hours: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseSpec {
    pub code: String,
    pub name: String,
    pub department: String,
    pub credits: u32,
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub schedule: Option<CourseSchedule>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentSpec {
    pub key: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
    Enroll { student: String, course: String },
    EnrollBatch { student: String, courses: Vec<String> },
    /// `grade` accepts `A_PLUS`, `A-PLUS` or `A+`.
    Grade { student: String, course: String, grade: String },
    Drop { student: String, course: String },
    Deactivate { student: String },
    Activate { student: String },
}

impl Action {
    /// One-line description used in rejection reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Enroll { student, course } => format!("enroll {student} in {course}"),
            Self::EnrollBatch { student, courses } => {
                format!("enroll {student} in {}", courses.join(", "))
            }
            Self::Grade {
                student,
                course,
                grade,
            } => format!("grade {student} in {course} as {grade}"),
            Self::Drop { student, course } => format!("drop {student} from {course}"),
            Self::Deactivate { student } => format!("deactivate {student}"),
            Self::Activate { student } => format!("activate {student}"),
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub transcripts: Vec<Transcript>,
    pub courses: Vec<CourseSummary>,
    pub directory: Vec<DirectoryEntry>,
    pub honor_roll: Vec<String>,
    pub average_gpa: Gpa,
    pub rejected: Vec<Rejection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub code: String,
    pub enrolled: usize,
    pub capacity: usize,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl From<&Person> for DirectoryEntry {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id(),
            name: person.full_name(),
            role: person.role(),
        }
    }
}

/// An action refused by a business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Zero-based position in `actions`.
    pub step: usize,
    pub action: String,
    pub reason: String,
}

// =============================================================================
// RUNNER
// =============================================================================

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Build the catalog, play every action and collect the results.
    pub fn run(&self) -> Result<Outcome, ScenarioError> {
        let clock: Box<dyn Clock> = match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        };
        let mut registrar = Registrar::with_clock(clock);

        let staff = self.hire_staff(&mut registrar)?;
        let (mut courses, staff) = self.build_catalog(staff)?;
        let students = self.admit_students(&mut registrar)?;

        let mut rejected = Vec::new();
        for (step, action) in self.actions.iter().enumerate() {
            match apply(&mut registrar, &mut courses, &students, action)? {
                Ok(()) => {}
                Err(reason) => {
                    warn!(step, action = %action.describe(), %reason, "action rejected");
                    rejected.push(Rejection {
                        step,
                        action: action.describe(),
                        reason,
                    });
                }
            }
        }

        let mut transcripts = Vec::with_capacity(self.students.len());
        let mut directory = Vec::new();
        for spec in &self.students {
            let id = lookup_student(&students, &spec.key)?;
            transcripts.push(registrar.transcript(id)?);
            if let Some(student) = registrar.students().get(id) {
                directory.push(DirectoryEntry::from(&Person::from(student.clone())));
            }
        }
        directory.extend(
            staff
                .values()
                .map(|instructor| DirectoryEntry::from(&Person::from(Instructor::clone(instructor)))),
        );

        let summaries = courses
            .iter()
            .map(|c| CourseSummary {
                code: c.code().to_string(),
                enrolled: c.enrolled(),
                capacity: c.capacity(),
                info: c.course_info(),
            })
            .collect();

        let honor_roll = registrar
            .students()
            .find_top_performers(usize::MAX)
            .into_iter()
            .map(|s| s.full_name())
            .collect();

        info!(
            actions = self.actions.len(),
            rejected = rejected.len(),
            enrollments = registrar.enrollments().enrollment_count(),
            "scenario finished"
        );

        Ok(Outcome {
            transcripts,
            courses: summaries,
            directory,
            honor_roll,
            average_gpa: registrar.students().average_gpa(),
            rejected,
        })
    }

    fn hire_staff(&self, registrar: &mut Registrar) -> Result<BTreeMap<String, Instructor>, ScenarioError> {
        let mut staff = BTreeMap::new();
        for spec in &self.instructors {
            let department: Department = spec.department.parse()?;
            let profile = Profile::new(&spec.first_name, &spec.last_name, &spec.email);
            let mut instructor = registrar.hire_instructor(profile, department, spec.salary);
            instructor.set_office_hours(spec.office_hours.iter().map(String::as_str));
            if staff.insert(spec.key.clone(), instructor).is_some() {
                return Err(ScenarioError::Duplicate {
                    kind: "instructor",
                    key: spec.key.clone(),
                });
            }
        }
        Ok(staff)
    }

    /// Courses in scenario order, plus the staff now shared with them.
    fn build_catalog(
        &self,
        mut staff: BTreeMap<String, Instructor>,
    ) -> Result<(Vec<Course>, BTreeMap<String, Rc<Instructor>>), ScenarioError> {
        let mut courses: Vec<Course> = Vec::with_capacity(self.courses.len());
        let mut teaching = Vec::new();

        for spec in &self.courses {
            if courses.iter().any(|c| c.code() == spec.code) {
                return Err(ScenarioError::Duplicate {
                    kind: "course",
                    key: spec.code.clone(),
                });
            }
            let department: Department = spec.department.parse()?;
            let mut course = Course::with_capacity(
                &spec.code,
                &spec.name,
                department,
                spec.credits,
                spec.capacity.unwrap_or(DEFAULT_CAPACITY),
            );
            if let Some(schedule) = &spec.schedule {
                course.set_schedule(schedule.clone());
            }
            course.set_prerequisites(spec.prerequisites.iter().map(String::as_str));

            if let Some(key) = &spec.instructor {
                staff
                    .get_mut(key)
                    .ok_or_else(|| ScenarioError::UnknownInstructor(key.clone()))?
                    .add_course(&spec.code);
                teaching.push((courses.len(), key.clone()));
            }
            courses.push(course);
        }

        // Course lists are complete; from here on instructors are shared.
        let staff: BTreeMap<String, Rc<Instructor>> =
            staff.into_iter().map(|(k, v)| (k, Rc::new(v))).collect();
        for (index, key) in teaching {
            if let (Some(course), Some(instructor)) = (courses.get_mut(index), staff.get(&key)) {
                course.set_instructor(Rc::clone(instructor));
            }
        }
        Ok((courses, staff))
    }

    fn admit_students(&self, registrar: &mut Registrar) -> Result<BTreeMap<String, StudentId>, ScenarioError> {
        let mut students = BTreeMap::new();
        for spec in &self.students {
            if students.contains_key(&spec.key) {
                return Err(ScenarioError::Duplicate {
                    kind: "student",
                    key: spec.key.clone(),
                });
            }
            let major: Department = spec.major.parse()?;
            let mut profile = Profile::new(&spec.first_name, &spec.last_name, &spec.email);
            if let Some(phone) = &spec.phone {
                profile = profile.with_phone(phone);
            }
            if let Some(date_of_birth) = spec.date_of_birth {
                profile = profile.with_date_of_birth(date_of_birth);
            }
            let id = registrar.admit_student(profile, major);
            students.insert(spec.key.clone(), id);
        }
        Ok(students)
    }
}

/// Outer error aborts the run; inner error is a rejection reason.
fn apply(
    registrar: &mut Registrar,
    courses: &mut [Course],
    students: &BTreeMap<String, StudentId>,
    action: &Action,
) -> Result<Result<(), String>, ScenarioError> {
    let result = match action {
        Action::Enroll { student, course } => {
            let id = lookup_student(students, student)?;
            let course = lookup_course(courses, course)?;
            registrar.enroll(id, course).map(|_| ())
        }
        Action::EnrollBatch {
            student,
            courses: codes,
        } => {
            let id = lookup_student(students, student)?;
            for code in codes {
                lookup_course(courses, code)?;
            }
            // A repeated code starts a new run so the repeat reaches the
            // registrar and fails like any second enrollment would.
            let mut result = Ok(());
            for run in distinct_runs(codes) {
                let mut picked: Vec<&mut Course> = courses
                    .iter_mut()
                    .filter(|c| run.contains(&c.code()))
                    .collect();
                picked.sort_by_key(|c| run.iter().position(|code| *code == c.code()));
                if let Err(err) = registrar.enroll_batch(id, picked) {
                    result = Err(err);
                    break;
                }
            }
            result
        }
        Action::Grade {
            student,
            course,
            grade,
        } => {
            let id = lookup_student(students, student)?;
            let grade: Grade = grade.parse()?;
            registrar.record_grade(id, course, grade)
        }
        Action::Drop { student, course } => {
            let id = lookup_student(students, student)?;
            let course = lookup_course(courses, course)?;
            if !registrar.drop_course(id, course) {
                return Ok(Err("no ungraded enrollment to drop".to_string()));
            }
            Ok(())
        }
        Action::Deactivate { student } => {
            let id = lookup_student(students, student)?;
            registrar.set_active(id, false)
        }
        Action::Activate { student } => {
            let id = lookup_student(students, student)?;
            registrar.set_active(id, true)
        }
    };

    match result {
        Ok(()) => Ok(Ok(())),
        Err(err) if err.is_business_rule() => Ok(Err(err.to_string())),
        Err(err) => Err(err.into()),
    }
}

/// Split `codes` into consecutive runs without repeats, keeping order.
fn distinct_runs(codes: &[String]) -> Vec<Vec<&str>> {
    let mut runs: Vec<Vec<&str>> = vec![Vec::new()];
    for code in codes {
        if runs.last().is_some_and(|run| run.contains(&code.as_str())) {
            runs.push(Vec::new());
        }
        if let Some(run) = runs.last_mut() {
            run.push(code.as_str());
        }
    }
    runs
}

fn lookup_student(students: &BTreeMap<String, StudentId>, key: &str) -> Result<StudentId, ScenarioError> {
    students
        .get(key)
        .copied()
        .ok_or_else(|| ScenarioError::UnknownStudent(key.to_string()))
}

fn lookup_course<'a>(courses: &'a mut [Course], code: &str) -> Result<&'a mut Course, ScenarioError> {
    courses
        .iter_mut()
        .find(|c| c.code() == code)
        .ok_or_else(|| ScenarioError::UnknownCourse(code.to_string()))
}
