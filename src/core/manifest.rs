//! Manifest reader
//!
//! The SDK's `package.json` is the single source of the version being packed.

use crate::core::error::{ManifestError, PackResult};
use crate::release::Version;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// package.json structure (minimal fields we care about)
#[derive(Debug, Deserialize)]
struct PackageJson {
  #[serde(default)]
  name: Option<String>,
  version: String,
}

/// Package identity read from the manifest
#[derive(Debug, Clone)]
pub struct Manifest {
  pub name: Option<String>,
  pub version: Version,
}

impl Manifest {
  /// Read and parse the manifest at `path`
  ///
  /// Any failure is fatal for the run: there is nothing sensible to pack
  /// without a version.
  pub fn load(path: &Path) -> PackResult<Self> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
      io::ErrorKind::NotFound => ManifestError::NotFound {
        path: path.to_path_buf(),
      },
      _ => ManifestError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
      },
    })?;

    Self::parse(path, &content)
  }

  fn parse(path: &Path, content: &str) -> PackResult<Self> {
    let pkg: PackageJson = serde_json::from_str(content).map_err(|e| ManifestError::Malformed {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;

    let version = pkg.version.parse::<Version>().map_err(|e| ManifestError::InvalidVersion {
      version: pkg.version.clone(),
      reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), %version, "read manifest");

    Ok(Self {
      name: pkg.name,
      version,
    })
  }
}
