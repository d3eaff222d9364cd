//! End-to-end CLI integration tests.

use std::io::Write;
use std::net::TcpListener as StdListener;

use assert_cmd::Command;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{json, Value};

fn rfi_compare() -> Command {
    let mut cmd = Command::cargo_bin("rfi-compare").expect("binary not found");
    cmd.env_remove("RFI_BACKEND_URL")
        .env_remove("RFI_TIMEOUT")
        .env_remove("RFI_RETRIES")
        .env("NO_COLOR", "1");
    cmd
}

fn verdict(observed: f64, threshold_db: f64) -> Value {
    let max = 0.01;
    json!({
        "standard": "ITU-R SA.1157",
        "status": if observed <= max { "COMPLIANT" } else { "NON_COMPLIANT" },
        "observed_time_fraction_pct": observed,
        "max_time_fraction_pct": max,
        "threshold_db": threshold_db
    })
}

async fn dynamic(Json(req): Json<Value>) -> Json<Value> {
    let duration = req["duration_s"].as_u64().unwrap_or(0);
    let step = req["time_step_s"].as_u64().unwrap_or(1).max(1);
    let eirp = req["interferer"]["EIRP_int_dbw"].as_f64().unwrap_or(0.0);
    #[allow(clippy::cast_precision_loss)]
    let time: Vec<f64> = (0..=duration / step).map(|k| (k * step) as f64).collect();
    let loss: Vec<f64> = time.iter().map(|t| eirp / 10.0 * (-t / 200.0).exp()).collect();
    Json(json!({ "time_s": time, "snr_loss_db": loss, "overall_compliance": verdict(2.5, 1.0) }))
}

async fn aggregate(Json(req): Json<Value>) -> Json<Value> {
    let eirp = req["interferers"][0]["EIRP_int_dbw"].as_f64().unwrap_or(0.0);
    let scale = eirp.abs() / 10.0 + 0.5;
    let x: Vec<f64> = (0..=16).map(|k| f64::from(k) * 0.5).collect();
    let p: Vec<f64> = x.iter().map(|v| (-v / scale).exp()).collect();
    let observed = if eirp > 25.0 { 0.5 } else { 0.001 };
    Json(json!({ "ccdf": { "snr_loss_db": x, "ccdf": p }, "overall_compliance": verdict(observed, 3.0) }))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "solver exploded")
}

/// Serve `router` on a background thread and return its base URL.
fn spawn_backend(router: Router) -> String {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });
    format!("http://{addr}")
}

fn healthy_backend() -> String {
    spawn_backend(
        Router::new()
            .route("/simulate/dynamic", post(dynamic))
            .route("/simulate/aggregate", post(aggregate)),
    )
}

/// Reserve a port and release it so nothing listens there.
fn dead_backend() -> String {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn help_flag() {
    rfi_compare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scenario"))
        .stdout(predicate::str::contains("--backend-url"));
}

#[test]
fn version_flag() {
    rfi_compare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rfi-compare"));
}

#[test]
fn completion_bash() {
    rfi_compare()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rfi-compare"));
}

#[test]
fn unknown_band_is_usage_error() {
    rfi_compare().args(["--band", "L"]).assert().failure();
}

#[test]
fn text_report_against_stub_backend() {
    let url = healthy_backend();
    rfi_compare()
        .args(["--backend-url", &url, "--eirp-b", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Time domain (threshold 1.00 dB)"))
        .stdout(predicate::str::contains("[FAIL] ITU-R SA.1157"))
        .stdout(predicate::str::contains("Scenario A: 601 samples"))
        .stdout(predicate::str::contains("CCDF"))
        .stdout(predicate::str::contains("> 3 dB"));
}

#[test]
fn quiet_report_shows_selected_badges() {
    let url = healthy_backend();
    // A's aggregate run passes but the CCDF badge follows B, which fails.
    rfi_compare()
        .args(["--backend-url", &url, "-q", "--eirp-b", "30"])
        .assert()
        .success()
        .stdout("time-domain [FAIL]\nccdf [FAIL]\n");

    rfi_compare()
        .args(["--backend-url", &url, "-q", "--eirp-a", "30"])
        .assert()
        .success()
        .stdout("time-domain [FAIL]\nccdf [PASS]\n");
}

#[test]
fn json_report_to_stdout_and_file() {
    let url = healthy_backend();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    let output = rfi_compare()
        .args(["--backend-url", &url, "--json", "--output"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout["time_domain_threshold_db"], 1.0);
    assert_eq!(stdout["ccdf_verdict"]["standard"], "ITU-R SA.1157");
    assert_eq!(stdout["result"]["dynamic_b"]["time_s"].as_array().unwrap().len(), 601);

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, stdout);
}

#[test]
fn scenario_file_sets_horizon() {
    let url = healthy_backend();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"duration_s": 60, "time_step_s": 2}}"#).unwrap();

    let output = rfi_compare()
        .args(["--backend-url", &url, "--json", "--scenario-a"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["result"]["dynamic_a"]["time_s"].as_array().unwrap().len(), 31);
    assert_eq!(report["result"]["dynamic_b"]["time_s"].as_array().unwrap().len(), 601);
}

#[test]
fn invalid_scenario_file_exits_with_config_code() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"time_step_s": 0}}"#).unwrap();

    rfi_compare()
        .args(["--backend-url", &dead_backend(), "--scenario-b"])
        .arg(file.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("scenario B"));
}

#[test]
fn missing_scenario_file_exits_with_config_code() {
    rfi_compare()
        .args(["--scenario-a", "/nonexistent/scenario.json"])
        .assert()
        .code(4);
}

#[test]
fn unreachable_backend_fails() {
    rfi_compare()
        .args(["--backend-url", &dead_backend()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("simulation of scenario"));
}

#[test]
fn backend_error_fails_whole_comparison() {
    let url = spawn_backend(
        Router::new()
            .route("/simulate/dynamic", post(dynamic))
            .route("/simulate/aggregate", post(broken)),
    );
    rfi_compare()
        .args(["--backend-url", &url])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CCDF").not())
        .stderr(predicate::str::contains("aggregate simulation"))
        .stderr(predicate::str::contains("500"));
}
