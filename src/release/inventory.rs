//! Release inventory: the archives currently present in the releases directory

use crate::core::error::{PackResult, ResultExt};
use crate::release::Version;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Naming convention for release archives: `<prefix><version><suffix>`
#[derive(Debug, Clone, Copy)]
pub struct ArchiveNaming<'a> {
  pub prefix: &'a str,
  pub suffix: &'a str,
}

impl<'a> ArchiveNaming<'a> {
  pub fn new(prefix: &'a str, suffix: &'a str) -> Self {
    Self { prefix, suffix }
  }

  /// Extract the version from a conforming file name
  pub fn parse(&self, file_name: &str) -> Option<Version> {
    let raw = file_name.strip_prefix(self.prefix)?.strip_suffix(self.suffix)?;
    raw.parse().ok()
  }
}

/// One archive on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseArchive {
  pub version: Version,
  pub file_name: String,
}

/// Archives in the releases directory, newest first
#[derive(Debug, Clone)]
pub struct ReleaseInventory {
  dir: PathBuf,
  archives: Vec<ReleaseArchive>,
}

impl ReleaseInventory {
  /// Create the releases directory if needed (idempotent)
  pub fn ensure_dir(dir: &Path) -> PackResult<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create releases directory {}", dir.display()))
  }

  /// List conforming archives in `dir`
  ///
  /// Files that do not follow the naming convention, or whose embedded version
  /// does not parse, are skipped.
  pub fn scan(dir: &Path, naming: ArchiveNaming<'_>) -> PackResult<Self> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut archives = Vec::new();
    for entry in entries {
      let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
      // Follows symlinks; dangling links are skipped
      if !entry.path().is_file() {
        continue;
      }

      let Some(file_name) = entry.file_name().to_str().map(String::from) else {
        continue;
      };

      match naming.parse(&file_name) {
        Some(version) => archives.push(ReleaseArchive { version, file_name }),
        None => tracing::debug!(%file_name, "ignoring non-release file"),
      }
    }

    Ok(Self::from_archives(dir.to_path_buf(), archives))
  }

  /// Build an inventory from known archives (sorted newest first)
  pub fn from_archives(dir: PathBuf, mut archives: Vec<ReleaseArchive>) -> Self {
    archives.sort_by(|a, b| b.version.cmp(&a.version).then_with(|| a.file_name.cmp(&b.file_name)));
    Self { dir, archives }
  }

  /// Highest packed version, `None` when nothing has been packed yet
  pub fn latest(&self) -> Option<&Version> {
    self.archives.first().map(|a| &a.version)
  }

  /// Archives, newest first
  pub fn archives(&self) -> &[ReleaseArchive] {
    &self.archives
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn len(&self) -> usize {
    self.archives.len()
  }

  pub fn is_empty(&self) -> bool {
    self.archives.is_empty()
  }
}
