//! # Scan Command
//!
//! This module implements the scan command: load the reference corpus,
//! run one pure detection per input file (in parallel), print the results
//! and optionally write reports. This is the default command when no
//! subcommand is specified.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Args;
use rayon::prelude::*;
use tracing::debug;

use crate::config::load_config;
use crate::corpus::Corpus;
use crate::detector::Detector;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::matcher::LicenseMatch;
use crate::info_log;
use crate::output::{print_file_matches, print_no_match, print_summary};
use crate::report::{FileReport, ReportFormat, ReportGenerator, ScanReport};

/// Threshold used when neither the CLI nor the config file names one.
const DEFAULT_THRESHOLD: f64 = 0.9;

/// Arguments for the scan command
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
  /// Files to scan for license texts
  #[arg(required = false, value_name = "FILE")]
  pub inputs: Vec<PathBuf>,

  /// Directory of reference licenses, one `<SPDX-ID>.txt` per license
  /// (repeatable)
  #[arg(long, short = 'd', value_name = "DIR")]
  pub corpus_dir: Vec<PathBuf>,

  /// Confidence threshold in (0, 1]
  #[arg(long, short = 't', value_name = "FRACTION")]
  pub threshold: Option<f64>,

  /// Path to config file (default: .licenseid.toml in the working
  /// directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Write a JSON report of all detections to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Write a CSV report of all detections to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and unmatched file paths
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl ScanArgs {
  /// Validate the arguments and return an error if invalid
  fn validate(&self) -> Result<(), String> {
    if self.inputs.is_empty() {
      return Err("Missing required argument: <FILE>...".to_string());
    }
    if let Some(threshold) = self.threshold {
      if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(format!("--threshold {threshold} is outside (0, 1]"));
      }
    }
    Ok(())
  }
}

/// Run the scan command with the given arguments.
///
/// Returns `true` when every input file produced at least one match.
pub fn run_scan(args: ScanArgs) -> Result<bool> {
  if let Err(e) = args.validate() {
    eprintln!("ERROR: {e}");
    process::exit(2);
  }

  init_tracing(args.quiet, args.verbose);
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let config = load_config(args.config.as_deref(), args.no_config)?;

  let threshold = args.threshold.or(config.threshold).unwrap_or(DEFAULT_THRESHOLD);
  let corpus_dirs = if args.corpus_dir.is_empty() {
    config.corpus_dirs.clone()
  } else {
    args.corpus_dir.clone()
  };
  if corpus_dirs.is_empty() {
    bail!("No reference corpus: pass --corpus-dir or set corpus-dirs in {}", crate::config::DEFAULT_CONFIG_FILENAME);
  }

  let start = Instant::now();
  let corpus = Corpus::load(&corpus_dirs)?;
  debug!(references = corpus.len(), "corpus loaded");
  let detector = Detector::new(corpus)?;

  let files_word = if args.inputs.len() == 1 { "file" } else { "files" };
  info_log!("Scanning {} {files_word} (threshold {threshold})...", args.inputs.len());

  // The corpus is immutable after load, so detections fan out freely.
  let results: Vec<(PathBuf, Vec<LicenseMatch>)> = args
    .inputs
    .par_iter()
    .map(|path| -> Result<(PathBuf, Vec<LicenseMatch>)> {
      let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
      let matches = detector.detect(&text, threshold)?;
      debug!(path = %path.display(), matches = matches.len(), "scanned");
      Ok((path.clone(), matches))
    })
    .collect::<Result<_>>()?;

  let mut files = Vec::with_capacity(results.len());
  let mut matched = 0usize;
  for (path, matches) in &results {
    if matches.is_empty() {
      print_no_match(path);
    } else {
      matched += 1;
      print_file_matches(path, matches);
    }
    files.push(FileReport {
      path: path.clone(),
      matches: matches.iter().map(Into::into).collect(),
    });
  }

  let report = ScanReport::new(threshold, files);
  if let Some(path) = args.report_json.as_deref().or(config.reports.json.as_deref()) {
    ReportGenerator::new(ReportFormat::Json, path).generate(&report)?;
  }
  if let Some(path) = args.report_csv.as_deref().or(config.reports.csv.as_deref()) {
    ReportGenerator::new(ReportFormat::Csv, path).generate(&report)?;
  }

  print_summary(results.len(), matched, start.elapsed().as_millis());
  Ok(matched == results.len())
}
