//! CLI integration tests for simd-upcase
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;

fn simd_upcase() -> Command {
    let mut cmd = Command::cargo_bin("simd-upcase").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    simd_upcase()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upcase"))
        .stdout(predicate::str::contains("bench"));
}

#[test]
fn test_version() {
    simd_upcase()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("simd-upcase"));
}

#[test]
fn test_missing_subcommand() {
    simd_upcase().assert().failure();
}

// ============================================================================
// upcase
// ============================================================================

#[test]
fn test_upcase_stdin() {
    simd_upcase()
        .arg("upcase")
        .write_stdin("abcXYZ123")
        .assert()
        .success()
        .stdout("ABCXYZ123");
}

#[test]
fn test_upcase_long_stdin() {
    let input = "the quick brown fox jumps over the lazy dog\n".repeat(50);
    simd_upcase()
        .arg("upcase")
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(input.to_ascii_uppercase());
}

#[test]
fn test_upcase_non_ascii_uses_unicode_rules() {
    simd_upcase()
        .arg("upcase")
        .write_stdin("straße")
        .assert()
        .success()
        .stdout("STRASSE");
}

#[test]
fn test_upcase_file_to_file() {
    let dir = std::env::temp_dir();
    let input = dir.join(format!("simd-upcase-cli-in-{}.txt", std::process::id()));
    let output = dir.join(format!("simd-upcase-cli-out-{}.txt", std::process::id()));
    std::fs::write(&input, "file contents 42").unwrap();

    simd_upcase()
        .arg("upcase")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    assert_eq!(std::fs::read(&output).unwrap(), b"FILE CONTENTS 42");
    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();
}

#[test]
fn test_upcase_missing_file() {
    simd_upcase()
        .args(["upcase", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_upcase_forced_scalar_tier() {
    simd_upcase()
        .args(["upcase", "--tier", "default"])
        .write_stdin("forced")
        .assert()
        .success()
        .stdout("FORCED");
}

#[test]
fn test_upcase_unknown_tier_suggests() {
    simd_upcase()
        .args(["upcase", "--tier", "avx3"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tier 'avx3'"))
        .stderr(predicate::str::contains("did you mean"));
}

#[test]
fn test_upcase_forced_tier_non_ascii_note() {
    simd_upcase()
        .args(["upcase", "--tier", "default"])
        .write_stdin("café")
        .assert()
        .success()
        .stdout("CAFÉ")
        .stderr(predicate::str::contains("bypassed"));
}

#[test]
fn test_upcase_quiet_suppresses_note() {
    simd_upcase()
        .args(["-q", "upcase", "--tier", "default"])
        .write_stdin("café")
        .assert()
        .success()
        .stderr("");
}

// ============================================================================
// info
// ============================================================================

#[test]
fn test_info() {
    simd_upcase()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(std::env::consts::ARCH))
        .stdout(predicate::str::contains("DEFAULT"));
}

#[test]
fn test_info_json() {
    let output = simd_upcase().args(["info", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["arch"], std::env::consts::ARCH);
    assert_eq!(value["tiers"][0], "default");
    assert!(value["capabilities"]["narrow"].is_boolean());
}

#[test]
fn test_max_tier_caps_selection() {
    simd_upcase()
        .args(["--max-tier", "default", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: DEFAULT"));
}

#[test]
fn test_max_tier_invalid() {
    simd_upcase()
        .args(["--max-tier", "sse9", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tier"));
}

// ============================================================================
// bench
// ============================================================================

#[test]
fn test_bench_small() {
    simd_upcase()
        .args([
            "bench", "--size", "100", "--size", "1000", "-n", "2", "--warmup", "0", "--seed", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("100 bytes:"))
        .stdout(predicate::str::contains("1000 bytes:"))
        .stdout(predicate::str::contains("std"))
        .stdout(predicate::str::contains("DEFAULT"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_toml() {
    simd_upcase()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[bench]"))
        .stdout(predicate::str::contains("iterations"));
}

#[test]
fn test_config_json() {
    let output = simd_upcase().args(["config", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["bench"]["sizes"].is_array());
}

#[test]
fn test_explicit_config_applies() {
    let path = std::env::temp_dir().join(format!("simd-upcase-cli-cfg-{}.toml", std::process::id()));
    std::fs::write(&path, "[dispatch]\nmax_tier = \"default\"\n").unwrap();

    simd_upcase()
        .arg("--config")
        .arg(&path)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: DEFAULT"));

    std::fs::remove_file(&path).ok();
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("simd-upcase-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_broken_local_config_is_skipped() {
    let dir = temp_dir("bad-local");
    std::fs::write(
        dir.join("simd-upcase.toml"),
        "[dispatch]\nmax_tier = \"avx9\"\n",
    )
    .unwrap();

    simd_upcase()
        .current_dir(&dir)
        .arg("upcase")
        .write_stdin("abc")
        .assert()
        .success()
        .stdout("ABC")
        .stderr(predicate::str::contains("Warning: skipping local config"))
        .stderr(predicate::str::contains("unknown tier 'avx9'"))
        .stderr(predicate::str::contains("error:").not());

    std::fs::remove_dir_all(&dir).ok();
}

#[cfg(target_os = "linux")]
#[test]
fn test_broken_user_config_is_skipped() {
    let dir = temp_dir("bad-user");
    let config_dir = dir.join("simd-upcase");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[bench\niterations = 3\n").unwrap();

    simd_upcase()
        .env("XDG_CONFIG_HOME", &dir)
        .arg("upcase")
        .write_stdin("user layer")
        .assert()
        .success()
        .stdout("USER LAYER")
        .stderr(predicate::str::contains("Warning: skipping user config"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_broken_explicit_config_fails() {
    let dir = temp_dir("bad-explicit");
    let path = dir.join("explicit.toml");
    std::fs::write(&path, "[log]\nlevel = 7\n").unwrap();

    simd_upcase()
        .arg("--config")
        .arg(&path)
        .arg("upcase")
        .write_stdin("abc")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("invalid config"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_explicit_config_missing() {
    simd_upcase()
        .args(["--config", "/definitely/not/here.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
