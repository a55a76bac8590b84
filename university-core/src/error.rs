//! Error types for university-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{CourseCode, StudentId};

/// Coarse classification of a [`RegistryError`], used by transports to pick
/// a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    Internal,
}

/// All errors that can arise from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A student with this id was added before.
    #[error("a student with id {id} already exists")]
    StudentExists { id: StudentId },

    /// A course with this code was added before.
    #[error("a course with code {code} already exists")]
    CourseExists { code: CourseCode },

    /// The (student, course) pair is already recorded.
    #[error("student {student_id} is already enrolled in course {course_code}")]
    AlreadyEnrolled {
        student_id: StudentId,
        course_code: CourseCode,
    },

    #[error("student with id {id} not found")]
    StudentNotFound { id: StudentId },

    #[error("course with code {code} not found")]
    CourseNotFound { code: CourseCode },

    /// Bookkeeping failure inside the registry (e.g. a poisoned lock).
    #[error("internal registry error: {0}")]
    Internal(String),

    /// Underlying I/O failure while reading or writing a roster file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (roster save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on roster load; includes file path and line context.
    #[error("failed to parse roster at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("roster not found at {path}")]
    RosterNotFound { path: PathBuf },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::StudentExists { .. }
            | RegistryError::CourseExists { .. }
            | RegistryError::AlreadyEnrolled { .. } => ErrorKind::AlreadyExists,
            RegistryError::StudentNotFound { .. }
            | RegistryError::CourseNotFound { .. }
            | RegistryError::RosterNotFound { .. } => ErrorKind::NotFound,
            RegistryError::Internal(_)
            | RegistryError::Io(_)
            | RegistryError::Yaml(_)
            | RegistryError::Parse { .. } => ErrorKind::Internal,
        }
    }
}
