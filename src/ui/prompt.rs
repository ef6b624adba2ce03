//! Single-keypress confirmation prompt
//!
//! The terminal is switched to raw mode only for the duration of one key read.
//! [`RawModeGuard`] restores the previous mode when dropped, so every exit path
//! (answer, read error, panic) leaves the terminal usable.

use crate::core::error::{PackResult, ResultExt};
use crate::release::{Confirm, Version};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::{self, Write};

/// Terminal capable of raw single-key reads
pub trait RawTerminal {
  fn enable_raw_mode(&mut self) -> io::Result<()>;
  fn disable_raw_mode(&mut self) -> io::Result<()>;
  /// Block until one key is pressed and return it as a character
  fn read_key(&mut self) -> io::Result<char>;
}

/// Raw mode held for the guard's lifetime
pub struct RawModeGuard<'a, T: RawTerminal> {
  terminal: &'a mut T,
}

impl<'a, T: RawTerminal> RawModeGuard<'a, T> {
  pub fn enter(terminal: &'a mut T) -> io::Result<Self> {
    terminal.enable_raw_mode()?;
    Ok(Self { terminal })
  }

  pub fn read_key(&mut self) -> io::Result<char> {
    self.terminal.read_key()
  }
}

impl<T: RawTerminal> Drop for RawModeGuard<'_, T> {
  fn drop(&mut self) {
    if let Err(e) = self.terminal.disable_raw_mode() {
      tracing::warn!(error = %e, "failed to restore terminal mode");
    }
  }
}

/// Read exactly one key with the terminal in raw mode
pub fn read_single_key<T: RawTerminal>(terminal: &mut T) -> io::Result<char> {
  let mut guard = RawModeGuard::enter(terminal)?;
  guard.read_key()
}

/// The process's controlling terminal, via crossterm
#[derive(Debug, Default)]
pub struct CrosstermTerminal;

impl RawTerminal for CrosstermTerminal {
  fn enable_raw_mode(&mut self) -> io::Result<()> {
    crossterm::terminal::enable_raw_mode()
  }

  fn disable_raw_mode(&mut self) -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()
  }

  fn read_key(&mut self) -> io::Result<char> {
    loop {
      let Event::Key(key) = event::read()? else {
        continue;
      };
      if key.kind != KeyEventKind::Press {
        continue;
      }
      // Raw mode swallows SIGINT; Ctrl-C arrives as a key and counts as "no"
      if key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok('\u{3}');
      }
      return Ok(match key.code {
        KeyCode::Char(c) => c,
        KeyCode::Enter => '\r',
        KeyCode::Esc => '\u{1b}',
        _ => '\0',
      });
    }
  }
}

/// Prompt text shown before re-packing a version
pub fn force_prompt(version: &Version) -> String {
  format!(
    "Force flag is present. Packing the version {} again, are you sure to proceed? (y/n). ",
    version
  )
}

/// Asks the operator on `out`, reading the answer from `terminal`
pub struct KeypressConfirm<T: RawTerminal, W: Write> {
  terminal: T,
  out: W,
}

impl<T: RawTerminal, W: Write> KeypressConfirm<T, W> {
  pub fn new(terminal: T, out: W) -> Self {
    Self { terminal, out }
  }
}

impl<T: RawTerminal, W: Write> Confirm for KeypressConfirm<T, W> {
  fn confirm(&mut self, version: &Version) -> PackResult<bool> {
    write!(self.out, "{}", force_prompt(version))?;
    self.out.flush()?;

    let key = read_single_key(&mut self.terminal).context("Failed to read confirmation key")?;
    let accepted = key.eq_ignore_ascii_case(&'y');
    tracing::debug!(?key, accepted, "confirmation answered");

    if accepted {
      writeln!(self.out)?;
    } else {
      writeln!(self.out, "\nAborting.")?;
    }
    self.out.flush()?;

    Ok(accepted)
  }
}
