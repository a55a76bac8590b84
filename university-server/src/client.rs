//! Typed client for `UniversityService`.
//!
//! Wraps the generated stub and returns registry types, with gRPC statuses
//! folded into [`ClientError`].

use tonic::transport::{Channel, Endpoint};

use university_core::{Course, CourseCode, Student, StudentId};

use crate::config::CONNECT_TIMEOUT;
use crate::error::ClientError;
use crate::proto::{
    self, university_service_client::UniversityServiceClient, CoursesForStudentRequest,
    EnrollRequest, GetCourseRequest, GetStudentRequest, ListCoursesRequest, ListStudentsRequest,
    StudentsForCourseRequest,
};

#[derive(Debug, Clone)]
pub struct UniversityClient {
    inner: UniversityServiceClient<Channel>,
}

impl UniversityClient {
    /// Connect to a server at `uri` (e.g. `http://127.0.0.1:50051`).
    pub async fn connect(uri: impl Into<String>) -> Result<Self, ClientError> {
        let uri = uri.into();
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| ClientError::Transport(format!("invalid server uri '{uri}': {e}")))?
            .connect_timeout(CONNECT_TIMEOUT);
        let channel = endpoint.connect().await?;
        Ok(Self {
            inner: UniversityServiceClient::new(channel),
        })
    }

    pub async fn add_student(&self, student: Student) -> Result<Student, ClientError> {
        let mut client = self.inner.clone();
        let response = client
            .add_student(proto::Student::from(student))
            .await?
            .into_inner();
        response
            .student
            .map(Student::from)
            .ok_or_else(|| empty_response("AddStudent"))
    }

    pub async fn get_student(&self, id: &StudentId) -> Result<Student, ClientError> {
        let mut client = self.inner.clone();
        let response = client
            .get_student(GetStudentRequest { id: id.0.clone() })
            .await?
            .into_inner();
        response
            .student
            .map(Student::from)
            .ok_or_else(|| empty_response("GetStudent"))
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        let mut client = self.inner.clone();
        let response = client.list_students(ListStudentsRequest {}).await?;
        Ok(response
            .into_inner()
            .students
            .into_iter()
            .map(Student::from)
            .collect())
    }

    pub async fn add_course(&self, course: Course) -> Result<Course, ClientError> {
        let mut client = self.inner.clone();
        let response = client
            .add_course(proto::Course::from(course))
            .await?
            .into_inner();
        response
            .course
            .map(Course::from)
            .ok_or_else(|| empty_response("AddCourse"))
    }

    pub async fn get_course(&self, code: &CourseCode) -> Result<Course, ClientError> {
        let mut client = self.inner.clone();
        let response = client
            .get_course(GetCourseRequest {
                code: code.0.clone(),
            })
            .await?
            .into_inner();
        response
            .course
            .map(Course::from)
            .ok_or_else(|| empty_response("GetCourse"))
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, ClientError> {
        let mut client = self.inner.clone();
        let response = client.list_courses(ListCoursesRequest {}).await?;
        Ok(response
            .into_inner()
            .courses
            .into_iter()
            .map(Course::from)
            .collect())
    }

    /// Enroll a student; returns the server's confirmation message.
    pub async fn enroll(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<String, ClientError> {
        let mut client = self.inner.clone();
        let response = client
            .enroll(EnrollRequest {
                student_id: student_id.0.clone(),
                course_code: course_code.0.clone(),
            })
            .await?
            .into_inner();
        if !response.success {
            return Err(ClientError::Internal(format!(
                "enrollment not confirmed: {}",
                response.message
            )));
        }
        Ok(response.message)
    }

    pub async fn courses_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Course>, ClientError> {
        let mut client = self.inner.clone();
        let response = client
            .courses_for_student(CoursesForStudentRequest {
                student_id: student_id.0.clone(),
            })
            .await?;
        Ok(response
            .into_inner()
            .courses
            .into_iter()
            .map(Course::from)
            .collect())
    }

    pub async fn students_for_course(
        &self,
        course_code: &CourseCode,
    ) -> Result<Vec<Student>, ClientError> {
        let mut client = self.inner.clone();
        let response = client
            .students_for_course(StudentsForCourseRequest {
                course_code: course_code.0.clone(),
            })
            .await?;
        Ok(response
            .into_inner()
            .students
            .into_iter()
            .map(Student::from)
            .collect())
    }
}

fn empty_response(operation: &str) -> ClientError {
    ClientError::Internal(format!("{operation} response carried no payload"))
}
