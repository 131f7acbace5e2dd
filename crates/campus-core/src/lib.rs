//! # Campus Core
//!
//! Enrollment and grading logic for a university registry.
//!
//! Everything here is synchronous and in-memory. Dates come from a
//! [`Clock`] so that results are reproducible under test.
//!
//! ## Layout
//!
//! - Values: [`Grade`], [`Department`], [`Gpa`], ids
//! - Records: [`Student`], [`Instructor`], [`Course`], [`Enrollment`]
//! - Services: [`EnrollmentService`], [`StudentService`], [`Registrar`]
//! - Reports: [`Transcript`]

pub mod academic;
pub mod clock;
pub mod course;
pub mod department;
pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod grade;
pub mod ids;
pub mod person;
pub mod registrar;
pub mod student_service;
pub mod transcript;

pub use academic::{Enrollable, Gpa, Gradeable, Standing};
pub use clock::{Clock, FixedClock, SystemClock};
pub use course::{Course, CourseSchedule, DEFAULT_CAPACITY};
pub use department::Department;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use enrollment_service::EnrollmentService;
pub use error::{
    CampusResult, CourseError, EnrollmentError, GpaParseError, GradeError, IdParseError,
    ScheduleError,
};
pub use grade::{Grade, GradePoints, Requirement};
pub use ids::{IdGenerator, InstructorId, StudentId};
pub use person::{Instructor, Person, Profile, Student};
pub use registrar::Registrar;
pub use student_service::{StudentService, predicates};
pub use transcript::Transcript;
