//! Integration tests for hapticctl
//!
//! Every command runs against the simulated vibrator, so these exercise the
//! whole stack from argument parsing to scheduler completion.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn hapticctl() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("hapticctl")?;
    cmd.env_remove("RUST_LOG").env_remove("HAPTICCTL_CONFIG");
    Ok(cmd)
}

fn json_stdout(output: &std::process::Output) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_cli_help() -> TestResult {
    hapticctl()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulated vibrator"));
    Ok(())
}

#[test]
fn test_caps_json() -> TestResult {
    let output = hapticctl()?
        .args(["caps", "--json", "--no-amplitude-control", "--api-level", "31"])
        .output()?;
    assert!(output.status.success());

    let json = json_stdout(&output)?;
    assert_eq!(json["success"], true);
    assert_eq!(json["capability"]["has_vibrator"], true);
    assert_eq!(json["capability"]["has_amplitude_control"], false);
    assert_eq!(json["capability"]["api_level"], 31);
    Ok(())
}

#[test]
fn test_caps_require_fails_without_vibrator() -> TestResult {
    hapticctl()?.args(["caps", "--require"]).assert().success();

    let output = hapticctl()?
        .args(["--json", "--no-vibrator", "caps", "--require"])
        .output()?;
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(json_stdout(&output)?["error"]["type"], "device");
    Ok(())
}

#[test]
fn test_impact_completes() -> TestResult {
    let output = hapticctl()?.args(["--json", "impact", "medium"]).output()?;
    assert!(output.status.success());

    let json = json_stdout(&output)?;
    assert_eq!(json["outcome"], "completed");
    assert_eq!(json["command"], "impact medium");
    Ok(())
}

#[test]
fn test_unknown_impact_is_validation_error() -> TestResult {
    let output = hapticctl()?.args(["--json", "impact", "bogus"]).output()?;
    assert_eq!(output.status.code(), Some(4));

    let json = json_stdout(&output)?;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["type"], "catalog");
    Ok(())
}

#[test]
fn test_no_vibrator_skips() -> TestResult {
    let output = hapticctl()?
        .args(["--json", "--no-vibrator", "notify", "error"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)?["outcome"], "skipped");
    Ok(())
}

#[test]
fn test_one_shot_rejects_bad_amplitude() -> TestResult {
    hapticctl()?
        .args(["one-shot", "50", "--amplitude", "0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn test_looping_waveform_cancelled() -> TestResult {
    let output = hapticctl()?
        .args([
            "--json",
            "waveform",
            r#"{"timings":[0,100,100],"amplitudes":[0,200,0],"repeat":1}"#,
            "--cancel-after",
            "250",
        ])
        .output()?;
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)?["outcome"], "cancelled");
    Ok(())
}

#[test]
fn test_looping_waveform_requires_cancel_after() -> TestResult {
    hapticctl()?
        .args(["waveform", r#"{"timings":[0,100],"repeat":0}"#])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--cancel-after"));
    Ok(())
}

#[test]
fn test_bad_repeat_index_reported_before_looping_guard() -> TestResult {
    let output = hapticctl()?
        .args(["--json", "waveform", r#"{"timings":[0,400,200],"repeat":5}"#])
        .output()?;
    assert_eq!(output.status.code(), Some(4));

    let json = json_stdout(&output)?;
    assert_eq!(json["error"]["type"], "waveform");
    let message = json["error"]["message"].as_str().unwrap_or_default();
    assert!(!message.contains("--cancel-after"), "got {message}");
    Ok(())
}

#[test]
fn test_waveform_from_file_and_mismatch() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"timings":[0,100,50],"amplitudes":[0,255]}"#)?;

    let output = hapticctl()?
        .args(["--json", "waveform", "--file"])
        .arg(&path)
        .output()?;
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(json_stdout(&output)?["error"]["type"], "waveform");
    Ok(())
}

#[test]
fn test_feedback_suppression_is_sticky() -> TestResult {
    let output = hapticctl()?
        .args(["--json", "feedback", "long-press", "no-haptics", "long-press"])
        .output()?;
    assert!(output.status.success());

    let json = json_stdout(&output)?;
    let performed: Vec<bool> = json["feedback"]
        .as_array()
        .ok_or("feedback array missing")?
        .iter()
        .filter_map(|entry| entry["performed"].as_bool())
        .collect();
    assert_eq!(performed, vec![true, false, false]);
    Ok(())
}

#[test]
fn test_feedback_api_gate_and_accessibility() -> TestResult {
    let output = hapticctl()?
        .args(["--json", "--api-level", "30", "feedback", "toggle-on", "confirm"])
        .output()?;
    let json = json_stdout(&output)?;
    assert_eq!(json["feedback"][0]["performed"], false);
    assert_eq!(json["feedback"][1]["performed"], true);

    let output = hapticctl()?
        .args(["--json", "feedback", "confirm", "--accessibility-off"])
        .output()?;
    assert_eq!(json_stdout(&output)?["feedback"][0]["performed"], false);
    Ok(())
}

#[test]
fn test_config_forces_fallback_and_bad_config_fails() -> TestResult {
    let dir = tempfile::tempdir()?;
    let good = dir.path().join("haptics.yaml");
    fs::write(&good, "catalog:\n  force_waveform_fallback: true\n")?;
    hapticctl()?
        .args(["effect", "click", "--config"])
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));

    let bad = dir.path().join("haptics.json");
    fs::write(&bad, r#"{"schema_version":"other/9"}"#)?;
    hapticctl()?
        .args(["caps", "--config"])
        .arg(&bad)
        .assert()
        .code(3);
    Ok(())
}

#[test]
fn test_demo_reports_stats() -> TestResult {
    let output = hapticctl()?.args(["--json", "demo"]).output()?;
    assert!(output.status.success());

    let json = json_stdout(&output)?;
    assert_eq!(json["stats"]["dispatched"], 10);
    assert_eq!(json["stats"]["completed"], 10);
    Ok(())
}
