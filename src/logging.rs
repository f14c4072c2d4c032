//! # Logging Module
//!
//! User-facing output control for the licenseid CLI: a global output level
//! (normal, quiet, verbose), a color mode backed by owo-colors' override
//! mechanism, and the tracing subscriber used for diagnostic logging.
//!
//! Diagnostics go to stderr through `tracing`; result output goes to stdout
//! so it stays pipeable. The detection core itself never logs.

use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const NORMAL: u8 = 0;
const QUIET: u8 = 1;
const VERBOSE: u8 = 2;

/// Global output level, set once at startup from the CLI flags.
static OUTPUT_LEVEL: AtomicU8 = AtomicU8::new(NORMAL);

/// Suppress everything except errors and scriptable output.
pub fn set_quiet() {
  OUTPUT_LEVEL.store(QUIET, Ordering::SeqCst);
}

/// Show per-file detail that is normally elided.
pub fn set_verbose() {
  OUTPUT_LEVEL.store(VERBOSE, Ordering::SeqCst);
}

pub fn is_quiet() -> bool {
  OUTPUT_LEVEL.load(Ordering::SeqCst) == QUIET
}

pub fn is_verbose() -> bool {
  OUTPUT_LEVEL.load(Ordering::SeqCst) == VERBOSE
}

/// When to color terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
  /// Color when the stream is a terminal.
  #[default]
  Auto,
  /// Never color.
  Never,
  /// Always color.
  Always,
}

impl ColorMode {
  /// Applies the mode through owo-colors' global override.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

impl std::fmt::Display for ColorMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ColorMode::Auto => write!(f, "auto"),
      ColorMode::Never => write!(f, "never"),
      ColorMode::Always => write!(f, "always"),
    }
  }
}

/// Initializes the tracing subscriber for diagnostic logging.
///
/// Verbosity maps to levels the usual way: `-q` shows only errors, no flag
/// shows warnings, `-v` info, `-vv` debug, `-vvv` trace. `RUST_LOG`
/// overrides all of it.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let level = if quiet {
    LevelFilter::ERROR
  } else {
    match verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Writes a diagnostic line to stderr, but only in verbose mode.
///
/// Takes the same format arguments as [`eprintln!`]. Anything logged this
/// way is detail the default output deliberately elides.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Writes a status line to stdout, suppressed in quiet mode.
///
/// Takes the same format arguments as [`println!`]. Used for progress
/// messages a scripting caller would not want to parse; quiet mode keeps
/// stdout down to the scriptable output alone.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_status(&format!($($arg)*));
        }
    };
}

/// Backend of [`info_log!`]: one status line, colorized when stdout
/// supports it.
pub fn print_status(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.cyan()));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_output_level_transitions() {
    set_quiet();
    assert!(is_quiet());
    assert!(!is_verbose());

    set_verbose();
    assert!(is_verbose());
    assert!(!is_quiet());
  }
}
