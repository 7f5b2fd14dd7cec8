//! Integration tests for the envcheck binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the operator's own config.
fn envcheck(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("envcheck"));
    cmd.current_dir(temp.path());
    cmd.env("HOME", temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("envcheck"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage: envcheck"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("envcheck"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_unknown_check_lists_known_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = envcheck(&temp);
    cmd.args(["git", "svn"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("I don't know how to check for 'svn'"))
        .stdout(predicate::str::contains("I do know how to check for:"))
        .stdout(predicate::str::contains("  git                  (Git)"))
        .stdout(predicate::str::contains("check Git").not());
    Ok(())
}

#[test]
fn cli_list_shows_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = envcheck(&temp);
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("  virtual-shell        (command line shell)"))
        .stdout(predicate::str::contains("  pip\n"));
    Ok(())
}

#[test]
fn cli_list_defaults_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dir = temp.path().join(".envcheck");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("config.yml"), "checks: [git, make]\n")?;

    let mut cmd = envcheck(&temp);
    cmd.args(["list", "--defaults"]);
    cmd.assert().success().stdout("git\nmake\n");
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("envcheck"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("envcheck"));
    Ok(())
}

#[cfg(not(target_os = "macos"))]
#[test]
fn cli_missing_application_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = envcheck(&temp);
    cmd.arg("xcode");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("check Xcode (xcode)...\tfail"))
        .stdout(predicate::str::contains("check for Xcode (xcode) failed:"))
        .stdout(predicate::str::contains("/Applications/Xcode.app"))
        .stdout(predicate::str::contains("System information"));
    Ok(())
}

#[cfg(not(target_os = "macos"))]
#[test]
fn cli_quiet_omits_progress_and_system_info() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = envcheck(&temp);
    cmd.args(["--quiet", "xcode"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Failures:"))
        .stdout(predicate::str::contains("check Xcode").not())
        .stdout(predicate::str::contains("System information").not());
    Ok(())
}

#[cfg(not(target_os = "macos"))]
#[test]
fn cli_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = envcheck(&temp);
    cmd.args(["--json", "xcode"]);
    let output = cmd.assert().failure().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["passed"], false);
    assert_eq!(report["failures"][0]["check"], "xcode");
    assert_eq!(report["failures"][0]["full_name"], "Xcode (xcode)");
    Ok(())
}

#[test]
fn cli_rejects_unknown_minimum_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("extra.yml");
    fs::write(&config, "minimum_versions:\n  svn: '1.7'\n")?;

    let mut cmd = envcheck(&temp);
    cmd.arg("--config").arg(&config).arg("git");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("svn"));
    Ok(())
}

#[test]
fn cli_reports_malformed_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dir = temp.path().join(".envcheck");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("config.yml"), "checks: [git\n")?;

    let mut cmd = envcheck(&temp);
    cmd.arg("git");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_finds_config_from_subdirectory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dir = temp.path().join(".envcheck");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("config.yml"), "checks: [git, make]\n")?;
    let nested = temp.path().join("sub").join("dir");
    fs::create_dir_all(&nested)?;

    let mut cmd = envcheck(&temp);
    cmd.current_dir(&nested);
    cmd.args(["list", "--defaults"]);
    cmd.assert().success().stdout("git\nmake\n");
    Ok(())
}

#[test]
fn cli_editor_task_prompts_on_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = envcheck(&temp);
    cmd.arg("other-editor").write_stdin("\n");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Open your favorite text editor"))
        .stderr(predicate::str::contains("swc-installation-test.txt"))
        .stdout(predicate::str::contains("check other-editor...\tfail"))
        .stdout(predicate::str::contains("Open your favorite text editor").not());
    Ok(())
}

#[test]
fn cli_editor_task_passes_after_answer() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("swc-installation-test.txt"), "Hello, world!\n")?;

    let mut cmd = envcheck(&temp);
    cmd.arg("other-editor").write_stdin("done\n");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Open your favorite text editor"))
        .stdout(predicate::str::contains("check other-editor...\tpass"));
    Ok(())
}

#[test]
fn cli_editor_task_accepts_closed_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("swc-installation-test.txt"), "Hello, world!")?;

    let mut cmd = envcheck(&temp);
    cmd.arg("other-editor").write_stdin("");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("check other-editor...\tpass"));
    Ok(())
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn cli_tolerates_non_utf8_environment() -> Result<(), Box<dyn std::error::Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new()?;
    let mut cmd = envcheck(&temp);
    cmd.env("ENVCHECK_BAD_BYTES", OsStr::from_bytes(b"caf\xe9"));
    cmd.arg("xcode");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("System information"));
    Ok(())
}
