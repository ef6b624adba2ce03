//! Version gate: decides whether the current version gets packed
//!
//! | force | yes | current newer (or nothing packed) | decision |
//! |-------|-----|-----------------------------------|----------|
//! | no    | any | yes                               | build    |
//! | no    | any | no                                | skip     |
//! | yes   | yes | any                               | build    |
//! | yes   | no  | any                               | confirm  |
//!
//! `--force` overrides the monotonic check so an unchanged version can be
//! re-packed; without `--yes` the operator has to confirm with a keypress.

use crate::core::error::PackResult;
use crate::release::Version;
use serde::Serialize;

/// Flags steering the gate, read once from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateOptions {
  /// Pack even when the version is not newer than the latest archive
  pub force: bool,
  /// Skip the confirmation prompt when forcing
  pub yes: bool,
}

/// Gate decision before any interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
  Build,
  Confirm,
  Skip,
}

/// Final outcome once the operator has been asked (if needed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Build,
  /// Version not newer and no `--force`
  Skipped,
  /// Operator answered anything but 'y' at the prompt
  Declined,
}

/// Source of an interactive yes/no answer
pub trait Confirm {
  /// Ask to re-pack `version`; returns true to proceed
  fn confirm(&mut self, version: &Version) -> PackResult<bool>;
}

/// True when `current` is strictly newer than everything packed so far
pub fn is_newer(current: &Version, latest: Option<&Version>) -> bool {
  latest.is_none_or(|latest| current > latest)
}

/// Pure gate decision
pub fn decide(current: &Version, latest: Option<&Version>, options: GateOptions) -> Decision {
  match (options.force, options.yes) {
    (true, true) => Decision::Build,
    (true, false) => Decision::Confirm,
    (false, _) if is_newer(current, latest) => Decision::Build,
    (false, _) => Decision::Skip,
  }
}

/// Turn a decision into an outcome, prompting only for `Decision::Confirm`
pub fn resolve(decision: Decision, current: &Version, confirm: &mut dyn Confirm) -> PackResult<Outcome> {
  let outcome = match decision {
    Decision::Build => Outcome::Build,
    Decision::Skip => Outcome::Skipped,
    Decision::Confirm => {
      if confirm.confirm(current)? {
        Outcome::Build
      } else {
        Outcome::Declined
      }
    }
  };

  tracing::debug!(?decision, ?outcome, %current, "gate resolved");
  Ok(outcome)
}
