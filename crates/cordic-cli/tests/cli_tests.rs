//! Integration tests for the cordicctl binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn cordicctl() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cordicctl")?;
    cmd.env_remove("RUST_LOG").env_remove("CORDICCTL_ENABLED");
    Ok(cmd)
}

fn json_stdout(args: &[&str]) -> Result<Value, Box<dyn std::error::Error>> {
    let output = cordicctl()?.args(args).output()?;
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_cli_help() -> TestResult {
    cordicctl()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CORDIC"));
    Ok(())
}

#[test]
fn test_cli_version() -> TestResult {
    cordicctl()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cordicctl"));
    Ok(())
}

#[test]
fn test_enable_ack() -> TestResult {
    cordicctl()?
        .arg("enable")
        .assert()
        .success()
        .stdout(predicate::str::contains("request  5A E2 B7"))
        .stdout(predicate::str::contains("5A E2 B7").count(2))
        .stdout(predicate::str::contains("transmit: "));
    Ok(())
}

#[test]
fn test_single_suppressed_by_default() -> TestResult {
    cordicctl()?
        .args(["single", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5A D1 BA 16 1C A9 60 08 7B"))
        .stdout(predicate::str::contains("suppressed"));
    Ok(())
}

#[test]
fn test_single_enabled_reply() -> TestResult {
    cordicctl()?
        .args(["--enabled", "single", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "5A D1 8A B0 D0 F5 6C 37 ED FF FF FF FF 1F 68",
        ))
        .stdout(predicate::str::contains("cos=0.866025404 sin=0.500000000"));
    Ok(())
}

#[test]
fn test_burst_request_bytes() -> TestResult {
    cordicctl()?
        .args(["burst", "0", "90", "--enabled"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "5A D2 02 00 00 00 00 00 00 2D 44 54 FB 21 19 66",
        ))
        .stdout(predicate::str::contains("[1] cos=-0.000000000 sin=1.000000000"));
    Ok(())
}

#[test]
fn test_burst_too_long_exits_3() -> TestResult {
    cordicctl()?
        .args(["burst", "1", "2", "3", "4", "5", "6", "7", "8", "9"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Burst count out of range: 9"));
    Ok(())
}

#[test]
fn test_angle_out_of_range_exits_3() -> TestResult {
    cordicctl()?
        .args(["single", "-500"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Angle out of range"));
    Ok(())
}

#[test]
fn test_session_flag_persists() -> TestResult {
    let value = json_stdout(&[
        "--json",
        "session",
        "enable",
        "single:0",
        "disable",
        "burst:0,-45",
    ])?;
    assert_eq!(value["success"], true);
    assert_eq!(value["transmit_enabled"], false);

    let exchanges = value["exchanges"].as_array().ok_or("exchanges missing")?;
    assert_eq!(exchanges.len(), 4);
    assert_eq!(exchanges[0]["response"]["bytes"], "5A E2 B7");
    assert_eq!(exchanges[1]["response"]["results"][0]["cos"], 70_368_744_177_649_i64);
    assert_eq!(exchanges[1]["response"]["results"][0]["sin"], -21);
    assert_eq!(exchanges[2]["response"]["bytes"], "5A E1 81");
    assert!(exchanges[3]["response"].is_null());

    assert_eq!(value["stats"]["rotations"], 3);
    assert_eq!(value["stats"]["suppressed"], 1);
    Ok(())
}

#[test]
fn test_session_invalid_step_exits_2() -> TestResult {
    cordicctl()?
        .args(["session", "enable", "reset"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid session step: reset"));
    Ok(())
}

#[test]
fn test_json_error_output() -> TestResult {
    let output = cordicctl()?
        .args(["--json", "session", "bogus"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["success"], false);
    assert!(
        value["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("bogus"))
    );
    Ok(())
}

#[test]
fn test_rotate_kernel_values() -> TestResult {
    let value = json_stdout(&["rotate", "--json", "0", "-45"])?;
    let results = value["results"].as_array().ok_or("results missing")?;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["angle"], 0);
    assert_eq!(results[0]["raw"]["cos"], 70_368_744_177_649_i64);
    assert_eq!(results[0]["raw"]["sin"], -21);
    assert_eq!(results[1]["raw"]["cos"], 49_758_216_191_586_i64);
    assert_eq!(results[1]["raw"]["sin"], -49_758_216_191_630_i64);
    Ok(())
}

#[test]
fn test_rotate_radians_human() -> TestResult {
    cordicctl()?
        .args(["rotate", "--radians", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cos=1.000000000"))
        .stdout(predicate::str::contains("(raw 70368744177649, -21)"));
    Ok(())
}

#[test]
fn test_decode_error_packet() -> TestResult {
    cordicctl()?
        .args(["decode", "5A", "01", "26"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error"));
    Ok(())
}

#[test]
fn test_decode_bad_crc_exits_3() -> TestResult {
    cordicctl()?
        .args(["decode", "5A", "E2", "00"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Integrity mismatch"));
    Ok(())
}

#[test]
fn test_decode_bad_hex_exits_2() -> TestResult {
    cordicctl()?
        .args(["decode", "5A", "zz"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid hex byte"));
    Ok(())
}

#[test]
fn test_verbose_logs_go_to_stderr() -> TestResult {
    let output = cordicctl()?
        .args(["--json", "-vv", "enable"])
        .output()?;
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["transmit_enabled"], true);
    Ok(())
}
