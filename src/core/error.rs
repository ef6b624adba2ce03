//! Error types for filosign-pack with contextual messages and exit codes
//!
//! Skipping a build or declining the prompt are not errors. Everything in here
//! is fatal: the program prints the error and exits with a non-zero code.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for filosign-pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, manifest, invalid input)
  User = 1,
  /// System error (I/O, subprocess)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for filosign-pack
#[derive(Debug)]
pub enum PackError {
  /// Configuration errors
  Config(ConfigError),

  /// Manifest (package.json) errors
  Manifest(ManifestError),

  /// External command errors
  Command(CommandError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PackError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PackError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Structured variants are flattened into a message so the context line is
  /// never lost. Their help text is kept.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PackError::Message { message, context, help } => PackError::Message {
        message: ctx_str,
        context: Some(context.map(|c| format!("{}\n{}", message, c)).unwrap_or(message)),
        help,
      },
      other => {
        let help = other.help_message();
        let exit_code = other.exit_code();
        let wrapped = PackError::Message {
          message: ctx_str,
          context: Some(other.to_string()),
          help,
        };
        if exit_code == ExitCode::System {
          PackError::Io(io::Error::other(wrapped.to_string()))
        } else {
          wrapped
        }
      }
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PackError::Config(_) => ExitCode::User,
      PackError::Manifest(_) => ExitCode::User,
      PackError::Command(_) => ExitCode::System,
      PackError::Io(_) => ExitCode::System,
      PackError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PackError::Config(e) => e.help_message(),
      PackError::Manifest(e) => e.help_message(),
      PackError::Command(e) => e.help_message(),
      PackError::Message { help, .. } => help.clone(),
      PackError::Io(_) => None,
    }
  }
}

impl fmt::Display for PackError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackError::Config(e) => write!(f, "{}", e),
      PackError::Manifest(e) => write!(f, "{}", e),
      PackError::Command(e) => write!(f, "{}", e),
      PackError::Io(e) => write!(f, "I/O error: {}", e),
      PackError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PackError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PackError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PackError {
  fn from(err: io::Error) -> Self {
    PackError::Io(err)
  }
}

impl From<ConfigError> for PackError {
  fn from(err: ConfigError) -> Self {
    PackError::Config(err)
  }
}

impl From<ManifestError> for PackError {
  fn from(err: ManifestError) -> Self {
    PackError::Manifest(err)
  }
}

impl From<CommandError> for PackError {
  fn from(err: CommandError) -> Self {
    PackError::Command(err)
  }
}

impl From<serde_json::Error> for PackError {
  fn from(err: serde_json::Error) -> Self {
    PackError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit --config path does not exist
  NotFound { path: PathBuf },

  /// Config file could not be parsed
  Parse { path: PathBuf, reason: String },

  /// A field holds a value the tool cannot work with
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to use pack.toml from the working directory, or the built-in defaults.".to_string())
      }
      ConfigError::Parse { .. } => Some("Check the TOML syntax and field names in the config file.".to_string()),
      ConfigError::InvalidField { field, .. } => Some(format!("Fix or remove `{}` in pack.toml.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to parse config {}: {}", path.display(), reason)
      }
      ConfigError::InvalidField { field, reason } => write!(f, "Invalid config field `{}`: {}", field, reason),
    }
  }
}

/// Manifest (package.json) errors
#[derive(Debug)]
pub enum ManifestError {
  /// Manifest file not found
  NotFound { path: PathBuf },

  /// Manifest is not valid JSON or lacks a version
  Malformed { path: PathBuf, reason: String },

  /// The version field is not a dotted integer sequence
  InvalidVersion { version: String, reason: String },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::NotFound { .. } => Some("Run filosign-pack from the SDK package directory.".to_string()),
      ManifestError::Malformed { .. } => {
        Some("The manifest must be a JSON object with a string `version` field.".to_string())
      }
      ManifestError::InvalidVersion { .. } => {
        Some("Use a dotted numeric version such as 1.4.0 (pre-release tags are not supported).".to_string())
      }
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::NotFound { path } => write!(f, "Manifest not found: {}", path.display()),
      ManifestError::Malformed { path, reason } => {
        write!(f, "Malformed manifest {}: {}", path.display(), reason)
      }
      ManifestError::InvalidVersion { version, reason } => {
        write!(f, "Invalid version '{}': {}", version, reason)
      }
    }
  }
}

/// External command errors
#[derive(Debug)]
pub enum CommandError {
  /// Command could not be started
  SpawnFailed { command: String, reason: String },

  /// Command exited with a non-zero status
  Failed { command: String, status: String },
}

impl CommandError {
  fn help_message(&self) -> Option<String> {
    match self {
      CommandError::SpawnFailed { command, .. } => Some(format!(
        "Make sure `{}` is installed and on PATH, or change pack_command in pack.toml.",
        command.split_whitespace().next().unwrap_or(command)
      )),
      CommandError::Failed { .. } => None,
    }
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandError::SpawnFailed { command, reason } => {
        write!(f, "Failed to run `{}`: {}", command, reason)
      }
      CommandError::Failed { command, status } => write!(f, "Command `{}` failed ({})", command, status),
    }
  }
}

/// Result type alias for filosign-pack
pub type PackResult<T> = Result<T, PackError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PackResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PackError>,
{
  fn context(self, ctx: impl Into<String>) -> PackResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PackResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error to stderr with help text
pub fn print_error(error: &PackError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
