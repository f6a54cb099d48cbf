//! Tests that run the compiled `echo-target` binary.

use std::process::{Command, Stdio};
use std::time::Duration;

use echo_target::EchoResponse;
use tokio::io::{AsyncBufReadExt, BufReader};

mod common;

const BIN: &str = env!("CARGO_BIN_EXE_echo-target");

#[test]
fn unparsable_port_prints_usage() {
    let output = Command::new(BIN).arg("not-a-port").output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn out_of_range_port_is_rejected() {
    for arg in ["0", "70000", "-5"] {
        let output = Command::new(BIN).arg(arg).output().unwrap();
        assert_eq!(output.status.code(), Some(2), "argument {}", arg);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(stderr.matches("Usage:").count(), 1, "stderr: {}", stderr);
    }
}

#[test]
fn exhausted_range_exits_with_distinct_code() {
    let (base, _held) = common::occupy_consecutive(10);
    let output = Command::new(BIN)
        .arg(base.to_string())
        .stdout(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("{}-{}", base, base + 9)),
        "stderr: {}",
        stderr
    );
}

#[tokio::test]
async fn serves_and_reports_on_stdout() {
    let start = common::free_port();
    let mut child = tokio::process::Command::new(BIN)
        .arg(start.to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .unwrap();

    let stdout = child.stdout.take().unwrap();
    let mut lines = BufReader::new(stdout).lines();

    let url = tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(line) = lines.next_line().await.unwrap() {
            if let Some(url) = line.strip_prefix("Listening on ") {
                return url.to_string();
            }
        }
        panic!("target exited before announcing its address");
    })
    .await
    .expect("no startup banner");

    let body: EchoResponse = common::client()
        .post(format!("{}/sessions/new", url))
        .header("X-User-Id", "u123")
        .body("hello target")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.endpoint, "/sessions/new");
    assert_eq!(body.x_user_id, "u123");
    assert!(body.port >= start);

    let payload = tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(line) = lines.next_line().await.unwrap() {
            if line.starts_with("Payload: ") {
                return line;
            }
        }
        panic!("target exited before logging the request");
    })
    .await
    .expect("no diagnostic block");
    assert_eq!(payload, "Payload: hello target");

    child.kill().await.unwrap();
}
