//! Produces the archive via the configured pack command

use crate::core::config::PackConfig;
use crate::core::error::{PackError, PackResult};
use crate::core::runner::CommandRunner;
use std::path::Path;

/// Run the pack command, then clear transient build output
///
/// Any failure aborts. An archive the pack command already wrote stays in
/// place.
pub fn build(root: &Path, config: &PackConfig, runner: &mut dyn CommandRunner) -> PackResult<()> {
  let command = config.resolved_pack_command();
  let (program, args) = command
    .split_first()
    .ok_or_else(|| PackError::with_help("pack_command is empty", "Set pack_command in pack.toml"))?;

  runner.run(root, program, args)?;

  for dir in &config.clean_dirs {
    runner.remove_dir_all(&root.join(dir))?;
  }

  Ok(())
}
