//! End-to-end tests over a real TCP socket: in-process server on an
//! ephemeral port, typed client on the other side.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use university_core::{Course, CourseCode, Registry, Student, StudentId};
use university_server::{serve, ClientError, ServerError, UniversityClient};

struct TestServer {
    uri: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    async fn start(registry: Registry) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(Arc::new(registry), listener, async move {
            let _ = rx.await;
        }));
        Self {
            uri: format!("http://{addr}"),
            shutdown,
            handle,
        }
    }

    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle
            .await
            .expect("server task panicked")
            .expect("server exited with error");
    }
}

fn ros() -> Student {
    Student {
        id: StudentId::from("12345"),
        first_names: "Ros".into(),
        last_names: "Icela".into(),
        program: "Systems Engineering".into(),
    }
}

fn course(code: &str, title: &str, instructor: &str) -> Course {
    Course {
        code: CourseCode::from(code),
        title: title.into(),
        instructor: instructor.into(),
    }
}

#[tokio::test]
async fn university_walkthrough_over_grpc() {
    let server = TestServer::start(Registry::new()).await;
    let client = UniversityClient::connect(server.uri.clone())
        .await
        .expect("connect");

    assert_eq!(client.add_student(ros()).await.expect("student"), ros());
    let sis = course("SIS-103", "Programming Fundamentals", "Dr. Carlos Rodriguez");
    let mat = course("MAT-20", "Differential Calculus", "Dra. Ana Martinez");
    client.add_course(sis.clone()).await.expect("course 1");
    client.add_course(mat.clone()).await.expect("course 2");

    let s = StudentId::from("12345");
    let message = client.enroll(&s, &sis.code).await.expect("enroll 1");
    assert_eq!(message, "Ros enrolled in Programming Fundamentals");
    client.enroll(&s, &mat.code).await.expect("enroll 2");

    let err = client.enroll(&s, &sis.code).await.unwrap_err();
    assert!(matches!(err, ClientError::AlreadyExists(_)), "got: {err}");

    let courses = client.courses_for_student(&s).await.expect("courses");
    let codes: BTreeSet<_> = courses.iter().map(|c| c.code.0.as_str()).collect();
    assert_eq!(codes, BTreeSet::from(["MAT-20", "SIS-103"]));

    let students = client
        .students_for_course(&sis.code)
        .await
        .expect("students");
    assert_eq!(students, vec![ros()]);

    assert_eq!(client.list_students().await.expect("list"), vec![ros()]);
    assert_eq!(client.list_courses().await.expect("list"), vec![sis, mat]);

    server.stop().await;
}

#[tokio::test]
async fn errors_cross_the_wire_with_their_kind() {
    let server = TestServer::start(Registry::new()).await;
    let client = UniversityClient::connect(server.uri.clone())
        .await
        .expect("connect");

    let err = client
        .get_student(&StudentId::from("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)), "got: {err}");

    let err = client
        .enroll(&StudentId::from("x"), &CourseCode::from("y"))
        .await
        .unwrap_err();
    match err {
        ClientError::NotFound(message) => assert!(message.contains("student"), "got: {message}"),
        other => panic!("unexpected error: {other}"),
    }

    client.add_student(ros()).await.expect("student");
    let err = client.add_student(ros()).await.unwrap_err();
    assert!(matches!(err, ClientError::AlreadyExists(_)), "got: {err}");

    server.stop().await;
}

#[tokio::test]
async fn concurrent_clients_race_on_same_id() {
    let server = TestServer::start(Registry::new()).await;
    let client = UniversityClient::connect(server.uri.clone())
        .await
        .expect("connect");

    let attempts: Vec<_> = (0..10)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.add_student(ros()).await })
        })
        .collect();

    let mut successes = 0;
    for attempt in attempts {
        match attempt.await.expect("task") {
            Ok(_) => successes += 1,
            Err(ClientError::AlreadyExists(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(successes, 1);

    server.stop().await;
}

#[tokio::test]
async fn connect_to_closed_port_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = UniversityClient::connect(format!("http://{addr}"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got: {err}");
}
