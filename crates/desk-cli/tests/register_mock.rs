use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn register_cmd(home: &TempDir, url: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("desk");
    cmd.env("DESK_HOME", home.path())
        .env_remove("DESK_SESSION")
        .env("DESK_REGISTER_URL", url);
    cmd
}

#[tokio::test]
async fn test_register_success() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "username": "desk_admin",
            "password": "Aa1!aaaa",
            "role": "admin"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    register_cmd(&home, &format!("{}/register", server.uri()))
        .args([
            "register",
            "--username",
            "desk_admin",
            "--password",
            "Aa1!aaaa",
            "--role",
            "admin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success!"))
        .stdout(predicate::str::contains("as admin"));
}

#[tokio::test]
async fn test_register_url_flag_overrides_env() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    register_cmd(&home, "http://127.0.0.1:9/unused")
        .args([
            "--register-url",
            &format!("{}/signup", server.uri()),
            "register",
            "--username",
            "desk_user",
            "--password",
            "Aa1!aaaa",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("as user"));
}

#[tokio::test]
async fn test_register_conflict_reports_username_taken() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    register_cmd(&home, &server.uri())
        .args(["register", "--username", "taken", "--password", "Aa1!aaaa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username Taken"));
}

#[tokio::test]
async fn test_register_server_error_reports_failure() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    register_cmd(&home, &server.uri())
        .args(["register", "--username", "desk_user", "--password", "Aa1!aaaa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Registration Failed"));
}

#[tokio::test]
async fn test_invalid_input_sends_no_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    register_cmd(&home, &server.uri())
        .args([
            "register",
            "--username",
            "1bad",
            "--password",
            "Aa1!aaaa",
            "--confirm",
            "Aa1!aaab",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid Entry"))
        .stderr(predicate::str::contains("username:"))
        .stderr(predicate::str::contains("confirm:"))
        .stderr(predicate::str::contains("password:").not());
}

#[test]
fn test_unreachable_server_reports_no_response() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = tempdir().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    register_cmd(&home, &format!("http://127.0.0.1:{port}/register"))
        .args(["register", "--username", "desk_user", "--password", "Aa1!aaaa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Server Response"));
}
