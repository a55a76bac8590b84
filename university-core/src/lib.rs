//! University core library: domain types, in-memory registry, roster files,
//! errors.
//!
//! Public API surface:
//! - [`types`]: identifier newtypes and domain structs
//! - [`error`]: [`RegistryError`] and its [`ErrorKind`]
//! - [`registry`]: the [`Registry`] and its nine operations
//! - [`roster`]: YAML seed/export files

pub mod error;
pub mod registry;
pub mod roster;
pub mod types;

pub use error::{ErrorKind, RegistryError};
pub use registry::{Registry, RegistryStats};
pub use types::{Course, CourseCode, Enrollment, EnrollmentPair, Roster, Student, StudentId};
