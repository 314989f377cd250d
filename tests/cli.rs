//! CLI integration tests
//!
//! These spawn the actual binary to verify argument parsing, fatal
//! configuration errors and exit codes. No test here reaches the build
//! executor: every invocation fails before the hand-off.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the modforge binary
fn modforge_bin() -> PathBuf {
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .to_path_buf();

    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("modforge")
}

#[test]
fn test_cli_help() {
    let output = Command::new(modforge_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute modforge");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("modforge"));
    assert!(stdout.contains("--ispc"));
    assert!(stdout.contains("--work-dir"));
}

#[test]
fn test_cli_requires_mod_dir() {
    let output = Command::new(modforge_bin())
        .args(["--root", "/tmp"])
        .output()
        .expect("Failed to execute modforge");

    assert!(!output.status.success());
}

#[test]
fn test_cli_rejects_conflicting_host_backends() {
    let output = Command::new(modforge_bin())
        .args(["--root", "/tmp", "--ispc", "--omp", "mods"])
        .output()
        .expect("Failed to execute modforge");

    assert!(!output.status.success());
}

#[test]
fn test_cli_gpu_with_mod2c_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let mods = dir.path().join("mods");
    let work = dir.path().join("output");
    fs::create_dir_all(&mods).unwrap();

    let output = Command::new(modforge_bin())
        .args([
            "--root",
            dir.path().to_str().unwrap(),
            "--gpu",
            "cuda",
            "--work-dir",
            work.to_str().unwrap(),
            mods.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute modforge");

    assert_eq!(output.status.code(), Some(1));
    assert!(!work.exists());
}

#[test]
fn test_cli_missing_shared_directory_fails() {
    let dir = TempDir::new().unwrap();
    let mods = dir.path().join("mods");
    fs::create_dir_all(&mods).unwrap();

    let output = Command::new(modforge_bin())
        .args([
            "--root",
            dir.path().join("no-root").to_str().unwrap(),
            mods.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute modforge");

    assert_eq!(output.status.code(), Some(1));
}
