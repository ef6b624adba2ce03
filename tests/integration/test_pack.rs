//! End-to-end tests for the pack flow
//!
//! The pack command is replaced by a `sh -c` script via pack.toml, so these
//! run on Unix only.

#![cfg(unix)]

use crate::helpers::{TestPackage, run_filosign_pack, run_filosign_pack_raw};
use anyhow::Result;

#[test]
fn test_first_pack_creates_releases() -> Result<()> {
  let pkg = TestPackage::new("0.1.0")?;
  pkg.use_fake_npm("0.1.0")?;

  let output = run_filosign_pack(&pkg.path, &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(pkg.releases()?, ["filosign-sdk-0.1.0.tgz"]);
  assert!(!pkg.file_exists("dist"), "build output should be removed");
  assert!(stdout.contains("Packed filosign-sdk-0.1.0.tgz"));

  Ok(())
}

#[test]
fn test_not_newer_skips_with_exit_zero() -> Result<()> {
  let pkg = TestPackage::new("1.5.0")?;
  pkg.add_releases(&["1.0.0", "1.2.0", "2.0.0"])?;
  pkg.use_pack_script("touch packed-anyway")?;

  let output = run_filosign_pack(&pkg.path, &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains(
    "Current version 1.5.0 is not greater than the latest packed version 2.0.0. Use --force to pack anyway."
  ));
  assert!(stdout.contains("Aborting."));
  assert!(!pkg.file_exists("packed-anyway"), "pack command must not run");
  assert!(pkg.file_exists("dist"));

  Ok(())
}

#[test]
fn test_numeric_comparison_not_lexical() -> Result<()> {
  let pkg = TestPackage::new("1.10.0")?;
  pkg.add_releases(&["1.9.0"])?;
  pkg.use_fake_npm("1.10.0")?;

  run_filosign_pack(&pkg.path, &[])?;

  assert_eq!(pkg.releases()?, ["filosign-sdk-1.10.0.tgz", "filosign-sdk-1.9.0.tgz"]);

  Ok(())
}

#[test]
fn test_retains_ten_newest() -> Result<()> {
  let pkg = TestPackage::new("1.15.0")?;
  let old: Vec<String> = (0..15).map(|i| format!("1.{}.0", i)).collect();
  let old: Vec<&str> = old.iter().map(String::as_str).collect();
  pkg.add_releases(&old)?;
  std::fs::write(pkg.path.join("releases/notes.txt"), "not an archive")?;
  pkg.use_fake_npm("1.15.0")?;

  run_filosign_pack(&pkg.path, &[])?;

  let releases = pkg.releases()?;
  assert_eq!(releases.len(), 11, "ten archives plus the foreign file");
  assert!(releases.contains(&"notes.txt".to_string()));
  for kept in 6..=15 {
    assert!(releases.contains(&format!("filosign-sdk-1.{}.0.tgz", kept)));
  }
  for dropped in 0..=5 {
    assert!(!releases.contains(&format!("filosign-sdk-1.{}.0.tgz", dropped)));
  }

  Ok(())
}

#[test]
fn test_force_yes_repacks_same_version() -> Result<()> {
  let pkg = TestPackage::new("1.0.0")?;
  pkg.add_releases(&["1.0.0"])?;
  pkg.use_pack_script("echo repacked > {releases}/filosign-sdk-1.0.0.tgz")?;

  run_filosign_pack(&pkg.path, &["--force", "-y"])?;

  let content = std::fs::read_to_string(pkg.path.join("releases/filosign-sdk-1.0.0.tgz"))?;
  assert_eq!(content.trim(), "repacked");

  Ok(())
}

#[test]
fn test_missing_manifest_fails() -> Result<()> {
  let pkg = TestPackage::new("1.0.0")?;
  std::fs::remove_file(pkg.path.join("package.json"))?;

  let output = run_filosign_pack_raw(&pkg.path, &[])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("Manifest not found"));

  Ok(())
}

#[test]
fn test_pack_failure_is_fatal() -> Result<()> {
  let pkg = TestPackage::new("2.0.0")?;
  pkg.add_releases(&["1.0.0"])?;
  pkg.use_pack_script("exit 7")?;

  let output = run_filosign_pack_raw(&pkg.path, &[])?;

  assert_eq!(output.status.code(), Some(2));
  assert_eq!(pkg.releases()?, ["filosign-sdk-1.0.0.tgz"]);
  assert!(pkg.file_exists("dist"), "cleanup must not run after a failed pack");

  Ok(())
}

#[test]
fn test_dry_run_changes_nothing() -> Result<()> {
  let pkg = TestPackage::new("3.0.0")?;
  let old: Vec<String> = (0..10).map(|i| format!("2.{}.0", i)).collect();
  let old: Vec<&str> = old.iter().map(String::as_str).collect();
  pkg.add_releases(&old)?;
  pkg.use_pack_script("touch packed-anyway")?;

  let output = run_filosign_pack(&pkg.path, &["--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Would pack filosign-sdk-3.0.0.tgz"));
  assert!(stdout.contains("Would remove old release filosign-sdk-2.0.0.tgz"));
  assert_eq!(pkg.releases()?.len(), 10);
  assert!(!pkg.file_exists("packed-anyway"));
  assert!(pkg.file_exists("dist"));

  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let pkg = TestPackage::new("2.1.0")?;
  pkg.add_releases(&["2.0.0"])?;
  pkg.use_fake_npm("2.1.0")?;

  let output = run_filosign_pack(&pkg.path, &["--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["version"], "2.1.0");
  assert_eq!(json["latest"], "2.0.0");
  assert_eq!(json["outcome"], "build");
  assert_eq!(json["archive"], "filosign-sdk-2.1.0.tgz");
  assert_eq!(json["retained"], 2);

  Ok(())
}

#[test]
fn test_dir_flag_and_explicit_config() -> Result<()> {
  let pkg = TestPackage::new("0.2.0")?;
  std::fs::write(
    pkg.path.join("ci-pack.toml"),
    "releases_dir = \"out\"\nretain = 1\npack_command = [\"sh\", \"-c\", \"touch {releases}/filosign-sdk-0.2.0.tgz\"]\n",
  )?;
  std::fs::create_dir_all(pkg.path.join("out"))?;
  std::fs::write(pkg.path.join("out/filosign-sdk-0.1.0.tgz"), b"")?;

  let elsewhere = tempfile::TempDir::new()?;
  let dir = pkg.path.to_string_lossy().to_string();
  run_filosign_pack(elsewhere.path(), &["-C", &dir, "--config", "ci-pack.toml"])?;

  let mut out: Vec<String> = std::fs::read_dir(pkg.path.join("out"))?
    .map(|e| e.map(|e| e.file_name().to_string_lossy().to_string()))
    .collect::<std::io::Result<_>>()?;
  out.sort();
  assert_eq!(out, ["filosign-sdk-0.2.0.tgz"]);

  Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
  let pkg = TestPackage::new("1.0.0")?;
  std::fs::write(pkg.path.join("pack.toml"), "retain = 0\n")?;

  let output = run_filosign_pack_raw(&pkg.path, &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("retain"));

  Ok(())
}
