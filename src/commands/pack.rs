//! Pack command implementation
//!
//! Reads the manifest version, gates it against the packed history, builds the
//! archive and prunes old releases. Skipping and declining are normal outcomes
//! and exit with status 0.

use crate::core::config::PackConfig;
use crate::core::error::PackResult;
use crate::core::manifest::Manifest;
use crate::core::runner::{CommandRunner, SystemRunner};
use crate::release::{
  ArchiveNaming, Confirm, Decision, GateOptions, Outcome, ReleaseArchive, ReleaseInventory, Version, builder, gate,
  retention,
};
use crate::ui::prompt::{CrosstermTerminal, KeypressConfirm};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Command-line options, fixed for the whole run
#[derive(Debug, Clone)]
pub struct PackOptions {
  /// Directory holding the manifest and the releases directory
  pub root: PathBuf,
  /// Explicit config file (relative to `root`)
  pub config_path: Option<PathBuf>,
  pub gate: GateOptions,
  /// Report the plan without building, prompting or deleting
  pub dry_run: bool,
  /// Print the report as JSON
  pub json: bool,
}

/// What a run did (or would do, for a dry run)
#[derive(Debug, Clone, Serialize)]
pub struct PackReport {
  pub package: Option<String>,
  pub version: Version,
  pub latest: Option<Version>,
  pub decision: Decision,
  /// `None` for dry runs
  pub outcome: Option<Outcome>,
  pub dry_run: bool,
  /// Archive for the current version, when present after the build
  pub archive: Option<String>,
  /// Archives deleted (or that would be deleted) by retention
  pub pruned: Vec<String>,
  pub retained: usize,
}

/// Run the pack command
pub fn run_pack(options: PackOptions) -> PackResult<()> {
  let config = PackConfig::load(&options.root, options.config_path.as_deref())?;

  let mut runner = SystemRunner;
  // Keep stdout clean for the JSON report
  let prompt_out: Box<dyn Write> = if options.json {
    Box::new(io::stderr())
  } else {
    Box::new(io::stdout())
  };
  let mut confirm = KeypressConfirm::new(CrosstermTerminal, prompt_out);

  let report = execute(&options, &config, &mut runner, &mut confirm)?;

  if options.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    for line in summary_lines(&report) {
      println!("{}", line);
    }
  }

  Ok(())
}

/// Pack flow with injected side effects
pub fn execute(
  options: &PackOptions,
  config: &PackConfig,
  runner: &mut dyn CommandRunner,
  confirm: &mut dyn Confirm,
) -> PackResult<PackReport> {
  let manifest = Manifest::load(&options.root.join(&config.manifest))?;
  let releases_dir = options.root.join(&config.releases_dir);
  let naming = ArchiveNaming::new(&config.archive_prefix, &config.archive_suffix);

  let inventory = if options.dry_run && !releases_dir.is_dir() {
    ReleaseInventory::from_archives(releases_dir.clone(), Vec::new())
  } else {
    ReleaseInventory::ensure_dir(&releases_dir)?;
    ReleaseInventory::scan(&releases_dir, naming)?
  };

  if inventory.is_empty() {
    tracing::debug!(dir = %releases_dir.display(), "no release archives packed yet");
  }

  let latest = inventory.latest().cloned();
  let decision = gate::decide(&manifest.version, latest.as_ref(), options.gate);
  tracing::debug!(
    version = %manifest.version,
    latest = ?latest.as_ref().map(ToString::to_string),
    archives = inventory.len(),
    ?decision,
    "gate decided"
  );

  let mut report = PackReport {
    package: manifest.name.clone(),
    version: manifest.version.clone(),
    latest,
    decision,
    outcome: None,
    dry_run: options.dry_run,
    archive: None,
    pruned: Vec::new(),
    retained: inventory.len(),
  };

  if options.dry_run {
    if decision != Decision::Skip {
      let after = with_planned_archive(&inventory, config, &manifest.version);
      let pruned = retention::select_for_pruning(&after, config.retain);
      report.archive = Some(config.archive_name(&manifest.version));
      report.retained = after.len() - pruned.len();
      report.pruned = pruned.iter().map(|a| a.file_name.clone()).collect();
    }
    return Ok(report);
  }

  let outcome = gate::resolve(decision, &manifest.version, confirm)?;
  report.outcome = Some(outcome);
  if outcome != Outcome::Build {
    return Ok(report);
  }

  builder::build(&options.root, config, runner)?;

  let inventory = ReleaseInventory::scan(&releases_dir, naming)?;
  let expected = config.archive_name(&manifest.version);
  if inventory.archives().iter().any(|a| a.file_name == expected) {
    report.archive = Some(expected);
  } else {
    tracing::warn!(archive = %expected, "pack command finished but the expected archive is missing");
  }

  let pruned = retention::prune(&inventory, config.retain)?;
  report.retained = inventory.len() - pruned.len();
  report.pruned = pruned.into_iter().map(|a| a.file_name).collect();

  Ok(report)
}

/// Inventory as it would look once the current version is packed
fn with_planned_archive(inventory: &ReleaseInventory, config: &PackConfig, version: &Version) -> ReleaseInventory {
  let file_name = config.archive_name(version);
  let mut archives = inventory.archives().to_vec();
  if !archives.iter().any(|a| a.file_name == file_name) {
    archives.push(ReleaseArchive {
      version: version.clone(),
      file_name,
    });
  }
  ReleaseInventory::from_archives(inventory.dir().to_path_buf(), archives)
}

/// Human-readable lines for a finished run
pub fn summary_lines(report: &PackReport) -> Vec<String> {
  let mut lines = Vec::new();
  let latest = report
    .latest
    .as_ref()
    .map(ToString::to_string)
    .unwrap_or_else(|| "none".to_string());

  if report.dry_run {
    lines.push("🔍 Dry-run mode (no changes applied)".to_string());
    lines.push(format!("   Current: {}", report.version));
    lines.push(format!("   Latest:  {}", latest));
    match report.decision {
      Decision::Skip => lines.push("   Would skip: version is not newer (use --force to pack anyway)".to_string()),
      Decision::Build | Decision::Confirm => {
        let confirm = if report.decision == Decision::Confirm {
          " after confirmation"
        } else {
          ""
        };
        if let Some(archive) = &report.archive {
          lines.push(format!("   Would pack {}{}", archive, confirm));
        }
        for name in &report.pruned {
          lines.push(format!("   Would remove old release {}", name));
        }
      }
    }
    return lines;
  }

  match report.outcome {
    Some(Outcome::Skipped) => {
      lines.push(format!(
        "Current version {} is not greater than the latest packed version {}. Use --force to pack anyway.",
        report.version, latest
      ));
      lines.push("\nAborting.".to_string());
    }
    // The prompt has already printed its own abort message
    Some(Outcome::Declined) | None => {}
    Some(Outcome::Build) => {
      match &report.archive {
        Some(archive) => lines.push(format!("✅ Packed {}", archive)),
        None => lines.push(format!("✅ Packed version {}", report.version)),
      }
      for name in &report.pruned {
        lines.push(format!("   Removed old release {}", name));
      }
      lines.push(format!("   Keeping {} release(s)", report.retained));
    }
  }

  lines
}
