//! # Output Module
//!
//! Centralizes user-facing terminal output for the licenseid CLI: the scan
//! banner, per-file match lines, and the closing summary. Stdout stays
//! predictable for piping; diagnostics live on stderr.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::matcher::LicenseMatch;

/// Symbols used in output.
pub mod symbols {
  /// License detected.
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// No license detected.
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the detections for one file.
///
/// Quiet mode prints nothing for matched files; the scriptable signal for
/// unmatched files comes from [`print_no_match`] and the exit code.
pub fn print_file_matches(path: &Path, matches: &[LicenseMatch]) {
  if is_quiet() {
    return;
  }

  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    path.display()
  );
  for m in matches {
    let line = format!(
      "    {} {:.1}% [{}..{})",
      m.identifier,
      m.confidence * 100.0,
      m.start,
      m.end
    );
    println!("{}", line.if_supports_color(Stream::Stdout, |l| l.dimmed()));
    if is_verbose() {
      println!("      {} tokens claimed over {:?}", m.tokens_claimed, m.token_range);
    }
  }
}

/// Print a file in which nothing was detected.
///
/// In quiet mode only the bare path is printed, for scripting.
pub fn print_no_match(path: &Path) {
  if is_quiet() {
    println!("{}", path.display());
    return;
  }
  println!(
    "{} {} {}",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    path.display(),
    "no license detected".if_supports_color(Stream::Stdout, |t| t.dimmed())
  );
}

/// Print the closing summary line.
pub fn print_summary(scanned: usize, matched: usize, elapsed_ms: u128) {
  if is_quiet() {
    return;
  }
  let unmatched = scanned - matched;
  println!();
  if unmatched == 0 {
    println!(
      "{} {} of {} files identified in {}ms",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      matched,
      scanned,
      elapsed_ms
    );
  } else {
    println!(
      "{} {} of {} files identified, {} without a detectable license ({}ms)",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      matched,
      scanned,
      unmatched,
      elapsed_ms
    );
  }
}
