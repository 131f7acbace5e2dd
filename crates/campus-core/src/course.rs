//! # Courses
//!
//! A course owns its roster; the enrolled count is the roster size, so the
//! two can never disagree. A course never holds more students than its
//! capacity.

use crate::department::Department;
use crate::error::{CourseError, ScheduleError};
use crate::ids::StudentId;
use crate::person::Instructor;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Seats offered when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 30;

// =============================================================================
// SCHEDULE
// =============================================================================

/// Weekly meeting slot of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct CourseSchedule {
    day_of_week: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
    room: String,
}

#[derive(Deserialize)]
struct RawSchedule {
    day_of_week: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
    room: String,
}

impl TryFrom<RawSchedule> for CourseSchedule {
    type Error = ScheduleError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        Self::new(raw.day_of_week, raw.start_time, raw.end_time, raw.room)
    }
}

impl CourseSchedule {
    pub fn new(
        day_of_week: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
        room: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        let day_of_week = day_of_week.into();
        let room = room.into();

        if day_of_week.trim().is_empty() {
            return Err(ScheduleError::EmptyDay);
        }
        if room.trim().is_empty() {
            return Err(ScheduleError::EmptyRoom);
        }
        if start_time > end_time {
            return Err(ScheduleError::StartAfterEnd {
                start: start_time.to_string(),
                end: end_time.to_string(),
            });
        }

        Ok(Self {
            day_of_week,
            start_time,
            end_time,
            room,
        })
    }

    #[must_use]
    pub fn day_of_week(&self) -> &str {
        &self.day_of_week
    }

    #[must_use]
    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.end_time
            .signed_duration_since(self.start_time)
            .num_minutes()
    }

    /// `Monday 09:00-10:30 in Room 101`
    #[must_use]
    pub fn formatted(&self) -> String {
        format!(
            "{} {}-{} in {}",
            self.day_of_week,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
            self.room
        )
    }
}

// =============================================================================
// COURSE
// =============================================================================

/// A course offering.
#[derive(Debug, Clone)]
pub struct Course {
    code: String,
    name: String,
    department: Department,
    credits: u32,
    capacity: usize,
    instructor: Option<Rc<Instructor>>,
    schedule: Option<CourseSchedule>,
    prerequisites: BTreeSet<String>,
    roster: BTreeSet<StudentId>,
}

impl Course {
    /// Create a course with [`DEFAULT_CAPACITY`] seats.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        department: Department,
        credits: u32,
    ) -> Self {
        Self::with_capacity(code, name, department, credits, DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(
        code: impl Into<String>,
        name: impl Into<String>,
        department: Department,
        credits: u32,
        capacity: usize,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            department,
            credits,
            capacity,
            instructor: None,
            schedule: None,
            prerequisites: BTreeSet::new(),
            roster: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn department(&self) -> Department {
        self.department
    }

    #[must_use]
    pub fn credits(&self) -> u32 {
        self.credits
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the seat count. Shrinking below the current roster is refused.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), CourseError> {
        if capacity < self.enrolled() {
            return Err(CourseError::CapacityBelowEnrollment {
                course_code: self.code.clone(),
                requested: capacity,
                enrolled: self.enrolled(),
            });
        }
        self.capacity = capacity;
        Ok(())
    }

    #[must_use]
    pub fn enrolled(&self) -> usize {
        self.roster.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.enrolled() >= self.capacity
    }

    #[must_use]
    pub fn available_seats(&self) -> usize {
        self.capacity.saturating_sub(self.enrolled())
    }

    /// Seat a student.
    ///
    /// Returns `Ok(false)` if the student is already on the roster.
    pub fn enroll_student(&mut self, student: StudentId) -> Result<bool, CourseError> {
        if self.is_full() {
            return Err(CourseError::Full {
                course_code: self.code.clone(),
                capacity: self.capacity,
            });
        }
        Ok(self.roster.insert(student))
    }

    /// Free a student's seat. Returns `false` if they held none.
    pub fn remove_student(&mut self, student: StudentId) -> bool {
        self.roster.remove(&student)
    }

    #[must_use]
    pub fn has_student(&self, student: StudentId) -> bool {
        self.roster.contains(&student)
    }

    /// Students currently holding a seat, in id order.
    pub fn roster(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.roster.iter().copied()
    }

    #[must_use]
    pub fn instructor(&self) -> Option<&Instructor> {
        self.instructor.as_deref()
    }

    pub fn set_instructor(&mut self, instructor: Rc<Instructor>) {
        self.instructor = Some(instructor);
    }

    pub fn clear_instructor(&mut self) {
        self.instructor = None;
    }

    #[must_use]
    pub fn schedule(&self) -> Option<&CourseSchedule> {
        self.schedule.as_ref()
    }

    pub fn set_schedule(&mut self, schedule: CourseSchedule) {
        self.schedule = Some(schedule);
    }

    /// Replace the prerequisite list. Informational only; never enforced.
    pub fn set_prerequisites<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = codes.into_iter().map(Into::into).collect();
    }

    pub fn prerequisites(&self) -> impl Iterator<Item = &str> + '_ {
        self.prerequisites.iter().map(String::as_str)
    }

    /// Multi-line human-readable summary.
    #[must_use]
    pub fn course_info(&self) -> String {
        let mut info = String::new();
        info.push_str(&format!("Course: {}\n", self.code));
        info.push_str(&format!("Name: {}\n", self.name));
        info.push_str(&format!("Department: {}\n", self.department.full_name()));
        info.push_str(&format!("Credits: {}\n", self.credits));
        info.push_str(&format!("Enrollment: {}/{}\n", self.enrolled(), self.capacity));

        if let Some(instructor) = &self.instructor {
            info.push_str(&format!("Instructor: {}\n", instructor.full_name()));
        }
        if let Some(schedule) = &self.schedule {
            info.push_str(&format!("Schedule: {}\n", schedule.formatted()));
        }
        if !self.prerequisites.is_empty() {
            let prereqs: Vec<&str> = self.prerequisites().collect();
            info.push_str(&format!("Prerequisites: {}\n", prereqs.join(" ")));
        }

        info
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course{{code='{}', name='{}', enrolled={}/{}}}",
            self.code,
            self.name,
            self.enrolled(),
            self.capacity
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
