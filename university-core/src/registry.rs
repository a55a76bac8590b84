//! In-memory enrollment registry.
//!
//! # Layout
//!
//! ```text
//! Registry
//!   Mutex<State>
//!     students     StudentId  -> Student          (insertion order)
//!     courses      CourseCode -> Course           (insertion order)
//!     enrollments  StudentId  -> {CourseCode}     (one set per student)
//! ```
//!
//! All three stores sit behind one lock, so every check-and-insert sequence
//! is atomic with respect to concurrent callers. The guard is never held
//! across I/O or an `.await`; methods are synchronous and return owned
//! clones.

use std::sync::{Mutex, MutexGuard};

use indexmap::{IndexMap, IndexSet};

use crate::error::RegistryError;
use crate::types::{Course, CourseCode, Enrollment, EnrollmentPair, Roster, Student, StudentId};

/// Entity counts, for logging and status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

#[derive(Debug, Default)]
pub struct Registry {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    students: IndexMap<StudentId, Student>,
    courses: IndexMap<CourseCode, Course>,
    enrollments: IndexMap<StudentId, IndexSet<CourseCode>>,
}

// ---------------------------------------------------------------------------
// 1. Construction
// ---------------------------------------------------------------------------

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a roster, applying students, courses and then
    /// enrollments through the regular checks.
    ///
    /// Fails on the first invariant violation; nothing is returned in that
    /// case, so a bad roster never yields a half-loaded registry.
    pub fn from_roster(roster: &Roster) -> Result<Self, RegistryError> {
        let mut state = State::default();
        for student in &roster.students {
            state.add_student(student.clone())?;
        }
        for course in &roster.courses {
            state.add_course(course.clone())?;
        }
        for pair in &roster.enrollments {
            state.enroll(&pair.student_id, &pair.course_code)?;
        }
        Ok(Self {
            state: Mutex::new(state),
        })
    }

    /// Copy the full registry contents out as a roster.
    ///
    /// Enrollments are listed per student (student insertion order), then in
    /// enrollment order, so `from_roster(&snapshot())` rebuilds an equivalent
    /// registry.
    pub fn snapshot(&self) -> Result<Roster, RegistryError> {
        let state = self.lock()?;
        let enrollments = state
            .enrollments
            .iter()
            .flat_map(|(student_id, codes)| {
                codes
                    .iter()
                    .map(move |code| EnrollmentPair::new(student_id.clone(), code.clone()))
            })
            .collect();
        Ok(Roster {
            students: state.students.values().cloned().collect(),
            courses: state.courses.values().cloned().collect(),
            enrollments,
        })
    }

    pub fn stats(&self) -> Result<RegistryStats, RegistryError> {
        let state = self.lock()?;
        Ok(RegistryStats {
            students: state.students.len(),
            courses: state.courses.len(),
            enrollments: state.enrollments.values().map(IndexSet::len).sum(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RegistryError> {
        self.state
            .lock()
            .map_err(|_| RegistryError::Internal("registry lock poisoned".to_string()))
    }
}

// ---------------------------------------------------------------------------
// 2. Students and courses
// ---------------------------------------------------------------------------

impl Registry {
    /// Insert a new student and open an empty enrollment set for it.
    ///
    /// Returns `RegistryError::StudentExists` if the id is taken; the store
    /// is left untouched in that case.
    pub fn add_student(&self, student: Student) -> Result<Student, RegistryError> {
        self.lock()?.add_student(student)
    }

    pub fn get_student(&self, id: &StudentId) -> Result<Student, RegistryError> {
        let state = self.lock()?;
        state
            .students
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::StudentNotFound { id: id.clone() })
    }

    /// All students, in insertion order.
    pub fn list_students(&self) -> Result<Vec<Student>, RegistryError> {
        Ok(self.lock()?.students.values().cloned().collect())
    }

    /// Insert a new course. Returns `RegistryError::CourseExists` if the code
    /// is taken.
    pub fn add_course(&self, course: Course) -> Result<Course, RegistryError> {
        self.lock()?.add_course(course)
    }

    pub fn get_course(&self, code: &CourseCode) -> Result<Course, RegistryError> {
        let state = self.lock()?;
        state
            .courses
            .get(code)
            .cloned()
            .ok_or_else(|| RegistryError::CourseNotFound { code: code.clone() })
    }

    /// All courses, in insertion order.
    pub fn list_courses(&self) -> Result<Vec<Course>, RegistryError> {
        Ok(self.lock()?.courses.values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// 3. Enrollment index
// ---------------------------------------------------------------------------

impl Registry {
    /// Record that `student_id` takes `course_code`.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// unknown student, unknown course, pair already recorded.
    pub fn enroll(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<Enrollment, RegistryError> {
        self.lock()?.enroll(student_id, course_code)
    }

    /// Courses the student is enrolled in, in enrollment order.
    pub fn courses_for_student(&self, student_id: &StudentId) -> Result<Vec<Course>, RegistryError> {
        let state = self.lock()?;
        if !state.students.contains_key(student_id) {
            return Err(RegistryError::StudentNotFound {
                id: student_id.clone(),
            });
        }
        let Some(codes) = state.enrollments.get(student_id) else {
            return Ok(vec![]);
        };
        Ok(codes
            .iter()
            .filter_map(|code| state.courses.get(code).cloned())
            .collect())
    }

    /// Students enrolled in the course, in student insertion order.
    pub fn students_for_course(
        &self,
        course_code: &CourseCode,
    ) -> Result<Vec<Student>, RegistryError> {
        let state = self.lock()?;
        if !state.courses.contains_key(course_code) {
            return Err(RegistryError::CourseNotFound {
                code: course_code.clone(),
            });
        }
        Ok(state
            .enrollments
            .iter()
            .filter(|(_, codes)| codes.contains(course_code))
            .filter_map(|(student_id, _)| state.students.get(student_id).cloned())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Private helpers (run with the lock held)
// ---------------------------------------------------------------------------

impl State {
    fn add_student(&mut self, student: Student) -> Result<Student, RegistryError> {
        if self.students.contains_key(&student.id) {
            return Err(RegistryError::StudentExists {
                id: student.id.clone(),
            });
        }
        self.enrollments.insert(student.id.clone(), IndexSet::new());
        self.students.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    fn add_course(&mut self, course: Course) -> Result<Course, RegistryError> {
        if self.courses.contains_key(&course.code) {
            return Err(RegistryError::CourseExists {
                code: course.code.clone(),
            });
        }
        self.courses.insert(course.code.clone(), course.clone());
        Ok(course)
    }

    fn enroll(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<Enrollment, RegistryError> {
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound {
                id: student_id.clone(),
            })?;
        let course = self
            .courses
            .get(course_code)
            .ok_or_else(|| RegistryError::CourseNotFound {
                code: course_code.clone(),
            })?;
        let message = format!("{} enrolled in {}", student.first_names, course.title);

        let codes = self.enrollments.get_mut(student_id).ok_or_else(|| {
            RegistryError::Internal(format!("no enrollment set for student {student_id}"))
        })?;
        if !codes.insert(course_code.clone()) {
            return Err(RegistryError::AlreadyEnrolled {
                student_id: student_id.clone(),
                course_code: course_code.clone(),
            });
        }

        Ok(Enrollment {
            pair: EnrollmentPair::new(student_id.clone(), course_code.clone()),
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
