//! gRPC service implementation.
//!
//! Each handler converts the request into registry types, calls the matching
//! [`Registry`] operation and converts the result back. Registry calls are
//! synchronous and short, so they run inline on the request task.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use university_core::{Course, CourseCode, Registry, RegistryError, Student, StudentId};

use crate::error::registry_status;
use crate::proto::{
    self,
    university_service_server::{UniversityService, UniversityServiceServer},
    AddCourseResponse, AddStudentResponse, CoursesForStudentRequest, CoursesForStudentResponse,
    EnrollRequest, EnrollResponse, GetCourseRequest, GetCourseResponse, GetStudentRequest,
    GetStudentResponse, ListCoursesRequest, ListCoursesResponse, ListStudentsRequest,
    ListStudentsResponse, StudentsForCourseRequest, StudentsForCourseResponse,
};

/// gRPC adapter over a shared [`Registry`].
#[derive(Debug, Clone)]
pub struct UniversityGrpcService {
    registry: Arc<Registry>,
}

impl UniversityGrpcService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn into_server(self) -> UniversityServiceServer<Self> {
        UniversityServiceServer::new(self)
    }
}

/// Log a rejected call and turn the error into its status.
fn reject(operation: &'static str, err: RegistryError) -> Status {
    match err {
        RegistryError::Internal(_) => {
            tracing::error!(operation, error = %err, "registry bookkeeping failure")
        }
        _ => tracing::warn!(operation, error = %err, "request rejected"),
    }
    registry_status(&err)
}

fn to_proto_students(students: Vec<Student>) -> Vec<proto::Student> {
    students.into_iter().map(proto::Student::from).collect()
}

fn to_proto_courses(courses: Vec<Course>) -> Vec<proto::Course> {
    courses.into_iter().map(proto::Course::from).collect()
}

#[tonic::async_trait]
impl UniversityService for UniversityGrpcService {
    async fn add_student(
        &self,
        request: Request<proto::Student>,
    ) -> Result<Response<AddStudentResponse>, Status> {
        let student = Student::from(request.into_inner());
        let added = self
            .registry
            .add_student(student)
            .map_err(|e| reject("AddStudent", e))?;
        tracing::info!(student_id = %added.id, name = %added.full_name(), "student added");
        Ok(Response::new(AddStudentResponse {
            student: Some(added.into()),
        }))
    }

    async fn get_student(
        &self,
        request: Request<GetStudentRequest>,
    ) -> Result<Response<GetStudentResponse>, Status> {
        let id = StudentId::from(request.into_inner().id);
        let student = self
            .registry
            .get_student(&id)
            .map_err(|e| reject("GetStudent", e))?;
        Ok(Response::new(GetStudentResponse {
            student: Some(student.into()),
        }))
    }

    async fn list_students(
        &self,
        _request: Request<ListStudentsRequest>,
    ) -> Result<Response<ListStudentsResponse>, Status> {
        let students = self
            .registry
            .list_students()
            .map_err(|e| reject("ListStudents", e))?;
        Ok(Response::new(ListStudentsResponse {
            students: to_proto_students(students),
        }))
    }

    async fn add_course(
        &self,
        request: Request<proto::Course>,
    ) -> Result<Response<AddCourseResponse>, Status> {
        let course = Course::from(request.into_inner());
        let added = self
            .registry
            .add_course(course)
            .map_err(|e| reject("AddCourse", e))?;
        tracing::info!(course_code = %added.code, title = %added.title, "course added");
        Ok(Response::new(AddCourseResponse {
            course: Some(added.into()),
        }))
    }

    async fn get_course(
        &self,
        request: Request<GetCourseRequest>,
    ) -> Result<Response<GetCourseResponse>, Status> {
        let code = CourseCode::from(request.into_inner().code);
        let course = self
            .registry
            .get_course(&code)
            .map_err(|e| reject("GetCourse", e))?;
        Ok(Response::new(GetCourseResponse {
            course: Some(course.into()),
        }))
    }

    async fn list_courses(
        &self,
        _request: Request<ListCoursesRequest>,
    ) -> Result<Response<ListCoursesResponse>, Status> {
        let courses = self
            .registry
            .list_courses()
            .map_err(|e| reject("ListCourses", e))?;
        Ok(Response::new(ListCoursesResponse {
            courses: to_proto_courses(courses),
        }))
    }

    async fn enroll(
        &self,
        request: Request<EnrollRequest>,
    ) -> Result<Response<EnrollResponse>, Status> {
        let req = request.into_inner();
        let student_id = StudentId::from(req.student_id);
        let course_code = CourseCode::from(req.course_code);
        let enrollment = self
            .registry
            .enroll(&student_id, &course_code)
            .map_err(|e| reject("Enroll", e))?;
        tracing::info!(%student_id, %course_code, "enrollment recorded");
        Ok(Response::new(EnrollResponse {
            success: true,
            message: enrollment.message,
        }))
    }

    async fn courses_for_student(
        &self,
        request: Request<CoursesForStudentRequest>,
    ) -> Result<Response<CoursesForStudentResponse>, Status> {
        let student_id = StudentId::from(request.into_inner().student_id);
        let courses = self
            .registry
            .courses_for_student(&student_id)
            .map_err(|e| reject("CoursesForStudent", e))?;
        Ok(Response::new(CoursesForStudentResponse {
            courses: to_proto_courses(courses),
        }))
    }

    async fn students_for_course(
        &self,
        request: Request<StudentsForCourseRequest>,
    ) -> Result<Response<StudentsForCourseResponse>, Status> {
        let course_code = CourseCode::from(request.into_inner().course_code);
        let students = self
            .registry
            .students_for_course(&course_code)
            .map_err(|e| reject("StudentsForCourse", e))?;
        Ok(Response::new(StudentsForCourseResponse {
            students: to_proto_students(students),
        }))
    }
}
