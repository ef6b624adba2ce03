//! External side effects behind a trait
//!
//! The pack flow only talks to the outside world through [`CommandRunner`],
//! so the decision logic can be exercised with a recording double.

use crate::core::error::{CommandError, PackError, PackResult, ResultExt};
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

/// Runs external programs and removes build directories
pub trait CommandRunner {
  /// Run `program args..` in `cwd`; a non-zero exit is an error
  fn run(&mut self, cwd: &Path, program: &str, args: &[String]) -> PackResult<()>;

  /// Recursively remove `path`; a missing path is not an error
  fn remove_dir_all(&mut self, path: &Path) -> PackResult<()>;
}

/// Runner backed by real subprocesses and the filesystem
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&mut self, cwd: &Path, program: &str, args: &[String]) -> PackResult<()> {
    let command_line = display_command(program, args);
    tracing::info!(command = %command_line, cwd = %cwd.display(), "running");

    // Output is inherited: npm's own progress is what the operator wants to see
    let status = Command::new(program)
      .current_dir(cwd)
      .args(args)
      .status()
      .map_err(|e| CommandError::SpawnFailed {
        command: command_line.clone(),
        reason: e.to_string(),
      })?;

    if !status.success() {
      return Err(PackError::Command(CommandError::Failed {
        command: command_line,
        status: status.to_string(),
      }));
    }

    Ok(())
  }

  fn remove_dir_all(&mut self, path: &Path) -> PackResult<()> {
    match fs::remove_dir_all(path) {
      Ok(()) => {
        tracing::info!(path = %path.display(), "removed build output");
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
  }
}

/// Side effect recorded by [`RecordingRunner`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
  Run { program: String, args: Vec<String> },
  RemoveDir(std::path::PathBuf),
}

/// Test double recording invocations, optionally creating a file on `run`
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRunner {
  pub invocations: Vec<Invocation>,
  /// Written (empty) on every successful `run`, mimicking the archiver
  pub produces: Option<std::path::PathBuf>,
  /// Make `run` fail with this exit status
  pub fail_with: Option<String>,
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
  fn run(&mut self, cwd: &Path, program: &str, args: &[String]) -> PackResult<()> {
    self.invocations.push(Invocation::Run {
      program: program.to_string(),
      args: args.to_vec(),
    });
    if let Some(status) = &self.fail_with {
      return Err(PackError::Command(CommandError::Failed {
        command: display_command(program, args),
        status: status.clone(),
      }));
    }
    if let Some(file) = &self.produces {
      fs::write(cwd.join(file), b"")?;
    }
    Ok(())
  }

  fn remove_dir_all(&mut self, path: &Path) -> PackResult<()> {
    self.invocations.push(Invocation::RemoveDir(path.to_path_buf()));
    Ok(())
  }
}

fn display_command(program: &str, args: &[String]) -> String {
  std::iter::once(program)
    .chain(args.iter().map(String::as_str))
    .collect::<Vec<_>>()
    .join(" ")
}
