//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch SDK package with a manifest and a releases directory
pub struct TestPackage {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestPackage {
  /// Create a package at `version` with a `dist/` build directory
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    let package = Self { _root: root, path };
    package.set_version(version)?;
    std::fs::create_dir_all(package.path.join("dist"))?;
    std::fs::write(package.path.join("dist/index.js"), "export {};\n")?;

    Ok(package)
  }

  /// Rewrite package.json with a new version
  pub fn set_version(&self, version: &str) -> Result<()> {
    std::fs::write(
      self.path.join("package.json"),
      format!(
        r#"{{
  "name": "@filosign/sdk",
  "version": "{}",
  "main": "dist/index.js"
}}
"#,
        version
      ),
    )?;
    Ok(())
  }

  /// Put existing archives into releases/
  pub fn add_releases(&self, versions: &[&str]) -> Result<()> {
    let dir = self.path.join("releases");
    std::fs::create_dir_all(&dir)?;
    for version in versions {
      std::fs::write(dir.join(format!("filosign-sdk-{}.tgz", version)), b"archive")?;
    }
    Ok(())
  }

  /// Write pack.toml with a shell pack command standing in for `npm pack`
  pub fn use_pack_script(&self, script: &str) -> Result<()> {
    let config = format!("pack_command = [\"sh\", \"-c\", {:?}]\n", script);
    std::fs::write(self.path.join("pack.toml"), config)?;
    Ok(())
  }

  /// Pack script producing the archive for `version`
  pub fn use_fake_npm(&self, version: &str) -> Result<()> {
    self.use_pack_script(&format!("touch {{releases}}/filosign-sdk-{}.tgz", version))
  }

  /// Sorted file names in releases/
  pub fn releases(&self) -> Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(self.path.join("releases"))?
      .map(|entry| entry.map(|e| e.file_name().to_string_lossy().to_string()))
      .collect::<std::io::Result<_>>()?;
    names.sort();
    Ok(names)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }
}

/// Run filosign-pack, failing on a non-zero exit
pub fn run_filosign_pack(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_filosign_pack_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "filosign-pack failed: filosign-pack {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run filosign-pack and return its output whatever the exit status
pub fn run_filosign_pack_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_filosign-pack");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run filosign-pack")
}
