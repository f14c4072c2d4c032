//! # CLI Module
//!
//! Command-line interface for licenseid. Argument parsing uses clap with a
//! default, subcommand-less invocation that runs the scan; subcommands
//! exist for future extensibility.

mod scan;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
pub use scan::{ScanArgs, run_scan};

const HELP_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Magenta))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = HELP_STYLES,
  after_help = "Examples:
  # Identify the licenses in a LICENSE file
  licenseid --corpus-dir /usr/share/spdx LICENSE

  # Scan several files at a stricter confidence threshold
  licenseid --corpus-dir ./refs --threshold 0.97 LICENSE COPYING NOTICE

  # Write a JSON report alongside the terminal output
  licenseid --corpus-dir ./refs --report-json licenses.json LICENSE

  # Quiet mode: print only the paths of files without a detectable license
  licenseid -q --corpus-dir ./refs vendored/*/LICENSE
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub scan_args: ScanArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Identify licenses in the given files (default)
  Scan(ScanArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Get the effective scan arguments, whether from a subcommand or
  /// top-level
  pub fn into_scan_args(self) -> ScanArgs {
    match self.command {
      Some(Command::Scan(args)) => args,
      None => self.scan_args,
    }
  }
}
