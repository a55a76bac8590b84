//! Conversions between registry types and their protobuf messages.

use university_core::{Course, CourseCode, Student, StudentId};

use crate::proto;

impl From<Student> for proto::Student {
    fn from(s: Student) -> Self {
        Self {
            id: s.id.0,
            first_names: s.first_names,
            last_names: s.last_names,
            program: s.program,
        }
    }
}

impl From<proto::Student> for Student {
    fn from(s: proto::Student) -> Self {
        Self {
            id: StudentId::from(s.id),
            first_names: s.first_names,
            last_names: s.last_names,
            program: s.program,
        }
    }
}

impl From<Course> for proto::Course {
    fn from(c: Course) -> Self {
        Self {
            code: c.code.0,
            title: c.title,
            instructor: c.instructor,
        }
    }
}

impl From<proto::Course> for Course {
    fn from(c: proto::Course) -> Self {
        Self {
            code: CourseCode::from(c.code),
            title: c.title,
            instructor: c.instructor,
        }
    }
}
