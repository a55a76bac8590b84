use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn university_cmd(server: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_university"));
    cmd.env("UNIVERSITY_SERVER", server)
        .env_remove("UNIVERSITY_LISTEN_ADDR")
        .env_remove("UNIVERSITY_SEED");
    cmd
}

fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

struct ServerProcess {
    child: Child,
    uri: String,
}

impl ServerProcess {
    fn start(seed: Option<&Path>) -> Self {
        let addr = free_addr();
        let mut cmd = university_cmd("unused");
        cmd.args(["serve", "--listen", &addr.to_string()]);
        if let Some(seed) = seed {
            cmd.arg("--seed").arg(seed);
        }
        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn server");

        let mut server = Self {
            child,
            uri: format!("http://{addr}"),
        };
        let deadline = Instant::now() + Duration::from_secs(10);
        while TcpStream::connect(addr).is_err() {
            if Instant::now() > deadline {
                server.stop();
                panic!("server did not start listening on {addr}");
            }
            sleep(Duration::from_millis(50));
        }
        server
    }

    fn cmd(&self) -> Command {
        university_cmd(&self.uri)
    }

    fn stop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

#[test]
fn help_lists_every_command() {
    let assert = university_cmd("unused").arg("--help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    for command in ["serve", "student", "course", "enroll", "export", "demo"] {
        assert!(stdout.contains(command), "help is missing '{command}'");
    }
}

#[test]
fn client_command_without_server_fails_cleanly() {
    let addr = free_addr();
    university_cmd(&format!("http://{addr}"))
        .args(["student", "list"])
        .assert()
        .failure()
        .stderr(contains("cannot reach university server"));
}

#[test]
fn serve_rejects_invalid_listen_address() {
    university_cmd("unused")
        .args(["serve", "--listen", "not-an-address"])
        .assert()
        .failure()
        .stderr(contains("invalid listen address"));
}

#[test]
fn serve_rejects_missing_seed_file() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("absent.yaml");
    university_cmd("unused")
        .args(["serve", "--listen", "127.0.0.1:0", "--seed"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(contains("roster not found"));
}

#[test]
fn enrollment_session_through_the_binary() {
    let server = ServerProcess::start(None);

    server
        .cmd()
        .args([
            "student",
            "add",
            "12345",
            "--first-names",
            "Ros",
            "--last-names",
            "Icela",
            "--program",
            "Systems Engineering",
        ])
        .assert()
        .success()
        .stdout(contains("Ros Icela"));
    for (code, title) in [
        ("SIS-103", "Programming Fundamentals"),
        ("MAT-20", "Differential Calculus"),
    ] {
        server
            .cmd()
            .args(["course", "add", code, "--title", title, "--instructor", "Dr. X"])
            .assert()
            .success();
    }

    server
        .cmd()
        .args(["enroll", "12345", "SIS-103"])
        .assert()
        .success()
        .stdout(contains("Ros enrolled in Programming Fundamentals"));
    server
        .cmd()
        .args(["enroll", "12345", "MAT-20"])
        .assert()
        .success();
    server
        .cmd()
        .args(["enroll", "12345", "SIS-103"])
        .assert()
        .failure()
        .stderr(contains("already enrolled"));

    let assert = server
        .cmd()
        .args(["student", "courses", "12345", "--json"])
        .assert()
        .success();
    let courses: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json output");
    let codes: Vec<&str> = courses
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["code"].as_str())
        .collect();
    assert_eq!(codes, ["SIS-103", "MAT-20"]);

    server
        .cmd()
        .args(["course", "students", "SIS-103"])
        .assert()
        .success()
        .stdout(contains("12345"));

    server
        .cmd()
        .args(["student", "get", "99999"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn export_then_seed_restores_registry() {
    let dir = TempDir::new().expect("tempdir");
    let roster = dir.path().join("roster.yaml");

    {
        let server = ServerProcess::start(None);
        server.cmd().arg("demo").assert().success().stdout(contains("Demo completed"));
        server
            .cmd()
            .arg("export")
            .arg(&roster)
            .assert()
            .success()
            .stdout(contains("1 students, 2 courses, 2 enrollments"));
    }
    assert!(roster.exists());

    let server = ServerProcess::start(Some(&roster));
    let assert = server
        .cmd()
        .args(["course", "students", "MAT-20", "--json"])
        .assert()
        .success();
    let students: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("json output");
    assert_eq!(students[0]["id"], "12345");

    // Seeded state keeps enforcing uniqueness.
    server
        .cmd()
        .args(["enroll", "12345", "MAT-20"])
        .assert()
        .failure()
        .stderr(contains("already enrolled"));
}
