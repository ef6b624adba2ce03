use crate::core::error::{ConfigError, PackError, PackResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder in `pack_command` arguments replaced by the releases directory
pub const RELEASES_PLACEHOLDER: &str = "{releases}";

/// Configuration for filosign-pack
/// Searched in order: pack.toml, .pack.toml, .config/pack.toml
///
/// Every field is optional. An absent file yields the defaults, which pack
/// `filosign-sdk-<version>.tgz` into `releases/` with `npm pack` and keep ten
/// archives.
///
/// # Example
///
/// ```toml
/// manifest = "package.json"
/// releases_dir = "releases"
/// archive_prefix = "filosign-sdk-"
/// archive_suffix = ".tgz"
/// retain = 10
/// pack_command = ["npm", "pack", "--pack-destination", "{releases}"]
/// clean_dirs = ["dist"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
  /// Manifest holding the current version (relative to the working directory)
  #[serde(default = "default_manifest")]
  pub manifest: PathBuf,

  /// Directory receiving release archives
  #[serde(default = "default_releases_dir")]
  pub releases_dir: PathBuf,

  /// Archive file name prefix, up to the version
  #[serde(default = "default_archive_prefix")]
  pub archive_prefix: String,

  /// Archive file name suffix, after the version
  #[serde(default = "default_archive_suffix")]
  pub archive_suffix: String,

  /// Number of most recent archives kept after a build
  #[serde(default = "default_retain")]
  pub retain: usize,

  /// Program and arguments producing the archive
  #[serde(default = "default_pack_command")]
  pub pack_command: Vec<String>,

  /// Transient build directories removed after packing
  #[serde(default = "default_clean_dirs")]
  pub clean_dirs: Vec<PathBuf>,
}

fn default_manifest() -> PathBuf {
  PathBuf::from("package.json")
}

fn default_releases_dir() -> PathBuf {
  PathBuf::from("releases")
}

fn default_archive_prefix() -> String {
  "filosign-sdk-".to_string()
}

fn default_archive_suffix() -> String {
  ".tgz".to_string()
}

fn default_retain() -> usize {
  10
}

fn default_pack_command() -> Vec<String> {
  ["npm", "pack", "--pack-destination", RELEASES_PLACEHOLDER]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_clean_dirs() -> Vec<PathBuf> {
  vec![PathBuf::from("dist")]
}

impl Default for PackConfig {
  fn default() -> Self {
    Self {
      manifest: default_manifest(),
      releases_dir: default_releases_dir(),
      archive_prefix: default_archive_prefix(),
      archive_suffix: default_archive_suffix(),
      retain: default_retain(),
      pack_command: default_pack_command(),
      clean_dirs: default_clean_dirs(),
    }
  }
}

impl PackConfig {
  /// Find config file in search order: pack.toml, .pack.toml, .config/pack.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("pack.toml"),
      path.join(".pack.toml"),
      path.join(".config").join("pack.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config for a working directory
  ///
  /// An explicit path must exist. Without one, the search locations are tried
  /// and the defaults are used when none exists.
  pub fn load(root: &Path, explicit: Option<&Path>) -> PackResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        let path = root.join(path);
        if !path.is_file() {
          return Err(PackError::Config(ConfigError::NotFound { path }));
        }
        path
      }
      None => match Self::find_config_path(root) {
        Some(path) => path,
        None => {
          tracing::debug!(root = %root.display(), "no pack.toml found, using defaults");
          return Ok(Self::default());
        }
      },
    };

    tracing::debug!(path = %config_path.display(), "loading config");
    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).map_err(|e| match e {
      PackError::Config(ConfigError::Parse { reason, .. }) => PackError::Config(ConfigError::Parse {
        path: config_path.clone(),
        reason,
      }),
      other => other,
    })?;

    Ok(config)
  }

  /// Parse and validate TOML config content
  pub fn parse(content: &str) -> PackResult<Self> {
    let config: PackConfig = toml_edit::de::from_str(content).map_err(|e| {
      PackError::Config(ConfigError::Parse {
        path: PathBuf::from("pack.toml"),
        reason: e.to_string(),
      })
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Validate configuration values
  pub fn validate(&self) -> PackResult<()> {
    if self.retain == 0 {
      return Err(invalid("retain", "must keep at least one archive"));
    }
    if self.pack_command.first().is_none_or(|program| program.trim().is_empty()) {
      return Err(invalid("pack_command", "must name a program to run"));
    }
    if self.archive_prefix.is_empty() {
      return Err(invalid("archive_prefix", "must not be empty"));
    }
    if self.archive_suffix.is_empty() {
      return Err(invalid("archive_suffix", "must not be empty"));
    }
    Ok(())
  }

  /// Pack command with `{releases}` expanded to the releases directory
  pub fn resolved_pack_command(&self) -> Vec<String> {
    let releases = self.releases_dir.to_string_lossy();
    self
      .pack_command
      .iter()
      .map(|arg| arg.replace(RELEASES_PLACEHOLDER, &releases))
      .collect()
  }

  /// Archive file name for a version
  pub fn archive_name(&self, version: &impl std::fmt::Display) -> String {
    format!("{}{}{}", self.archive_prefix, version, self.archive_suffix)
  }
}

fn invalid(field: &str, reason: &str) -> PackError {
  PackError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}
