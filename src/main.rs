mod commands;
mod core;
mod release;
mod ui;

use clap::Parser;
use commands::PackOptions;
use core::error::{PackError, print_error};
use release::GateOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pack the Filosign SDK into a versioned release archive, keeping a bounded history
#[derive(Parser)]
#[command(name = "filosign-pack")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Pack even if the version is not newer than the latest packed archive
  #[arg(long)]
  force: bool,

  /// Do not ask for confirmation when --force is given
  #[arg(short, long)]
  yes: bool,

  /// Show what would happen without packing, prompting or deleting
  #[arg(long)]
  dry_run: bool,

  /// Output the result as JSON
  #[arg(long)]
  json: bool,

  /// Run as if started in this directory
  #[arg(short = 'C', long, value_name = "PATH")]
  dir: Option<PathBuf>,

  /// Config file (default: pack.toml, .pack.toml or .config/pack.toml if present)
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,
}

fn get_styles() -> clap::builder::Styles {
  let heading = anstyle::Style::new()
    .bold()
    .underline()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)));
  let failure = anstyle::Style::new()
    .bold()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red)));

  clap::builder::Styles::styled()
    .usage(heading)
    .header(heading)
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(failure)
    .error(failure)
    .valid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing() {
  // stdout carries the verbatim messages and the JSON report
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing();

  let root = match cli.dir {
    Some(dir) => dir,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(PackError::Io(e)),
    },
  };

  let options = PackOptions {
    root,
    config_path: cli.config,
    gate: GateOptions {
      force: cli.force,
      yes: cli.yes,
    },
    dry_run: cli.dry_run,
    json: cli.json,
  };

  if let Err(err) = commands::run_pack(options) {
    handle_error(err);
  }
}

fn handle_error(err: PackError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
