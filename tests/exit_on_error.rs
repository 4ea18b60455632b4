//! The default error policy ends the process, so these tests re-run the test
//! binary in a child process and inspect its exit status and stderr.

mod common;

use common::*;
use serde_json::json;
use std::process::Command;

const CHILD_ENV: &str = "VALENCE_EXIT_TEST_CHILD";

/// Re-run a single test of this binary with the child marker set
fn run_child(test_name: &str) -> std::process::Output {
    let exe = std::env::current_exe().expect("test binary path");
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("failed to run child test")
}

fn is_child() -> bool {
    std::env::var(CHILD_ENV).is_ok()
}

#[test]
fn child_request_fails() {
    if !is_child() {
        return;
    }

    let (valence, transport) = session_with(config().with_exit_on_error(true));
    transport.respond(500, json!({"Errors": ["boom"]}));

    let _ = valence.get_course_offering(6606);
    unreachable!("exit-on-error should have ended the process");
}

#[test]
fn child_bootstrap_fails() {
    if !is_child() {
        return;
    }

    let transport = ScriptedTransport::new();
    transport.respond_raw(401, "Invalid token");

    let config = config().with_exit_on_error(true);
    let signer = valence::UserContext::from_config(&config);
    let _ = valence::Valence::with_parts(&config, signer, transport);
    unreachable!("exit-on-error should have ended the process");
}

#[test]
fn child_mutation_fails() {
    if !is_child() {
        return;
    }

    let (valence, transport) = session_with(config().with_exit_on_error(true));
    transport.respond(500, json!({"Errors": ["boom"]}));

    let _ = valence.delete_course_offering(6606);
    unreachable!("exit-on-error should have ended the process");
}

#[test]
fn child_upload_fails() {
    if !is_child() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banner.png");
    std::fs::write(&path, b"png").unwrap();

    let (valence, transport) = session_with(config().with_exit_on_error(true));
    transport.respond(500, json!({"Errors": ["boom"]}));

    let _ = valence.upload_course_image(6606, &path, "banner.png");
    unreachable!("exit-on-error should have ended the process");
}

#[test]
fn test_error_response_exits() {
    if is_child() {
        return;
    }

    let output = run_child("child_request_fails");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(valence::exit::EXIT_STATUS));
    assert!(
        stderr.contains("Error: 500 {\"Errors\":[\"boom\"]} (exiting...)"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_constructor_exits_on_error() {
    if is_child() {
        return;
    }

    let output = run_child("child_bootstrap_fails");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Error: 401 Invalid token (exiting...)"));
}

#[test]
fn test_mutation_exits_on_error() {
    if is_child() {
        return;
    }

    let output = run_child("child_mutation_fails");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Error: 500 {\"Errors\":[\"boom\"]} (exiting...)"));
}

#[test]
fn test_upload_exits_on_error() {
    if is_child() {
        return;
    }

    let output = run_child("child_upload_fails");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Error: 500 {\"Errors\":[\"boom\"]} (exiting...)"));
}
