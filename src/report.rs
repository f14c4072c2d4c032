//! # Report Module
//!
//! Machine-readable reports of a scan: which licenses were detected in
//! which files, with confidence and byte offsets. JSON is the structured
//! format; CSV is one row per detected match for spreadsheet use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::matcher::LicenseMatch;

/// One detected license occurrence, as reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
  /// SPDX identifier of the detected license.
  pub identifier: String,
  /// Detection confidence in `[0, 1]`.
  pub confidence: f64,
  /// Byte offset in the scanned file where the match begins.
  pub start: usize,
  /// Byte offset in the scanned file where the match ends.
  pub end: usize,
}

impl From<&LicenseMatch> for MatchRecord {
  fn from(m: &LicenseMatch) -> Self {
    MatchRecord {
      identifier: m.identifier.clone(),
      confidence: m.confidence,
      start: m.start,
      end: m.end,
    }
  }
}

/// Detection results for one scanned file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path of the scanned file.
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Matches in byte-position order; empty when nothing was detected.
  pub matches: Vec<MatchRecord>,
}

impl FileReport {
  pub fn has_matches(&self) -> bool {
    !self.matches.is_empty()
  }
}

/// The full scan report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
  /// When the scan ran, local time.
  pub generated_at: String,
  /// Confidence threshold the scan used.
  pub threshold: f64,
  /// Per-file results, in scan order.
  pub files: Vec<FileReport>,
}

impl ScanReport {
  pub fn new(threshold: f64, files: Vec<FileReport>) -> Self {
    ScanReport {
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      threshold,
      files,
    }
  }
}

/// Helper module for serializing/deserializing PathBuf as a plain string.
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON for machine readability.
  Json,
  /// CSV for spreadsheet compatibility.
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Error returned when parsing a string into a ReportFormat fails.
#[derive(Debug, thiserror::Error)]
#[error("Invalid report format: {0}")]
pub struct ParseReportFormatError(pub String);

impl std::str::FromStr for ReportFormat {
  type Err = ParseReportFormatError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "json" => Ok(ReportFormat::Json),
      "csv" => Ok(ReportFormat::Csv),
      _ => Err(ParseReportFormatError(s.to_string())),
    }
  }
}

/// Writes a [`ScanReport`] to disk in one format.
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    ReportGenerator { format, output_path }
  }

  /// Renders the report and writes it to the configured path.
  pub fn generate(&self, report: &ScanReport) -> Result<()> {
    let rendered = match self.format {
      ReportFormat::Json => render_json(report)?,
      ReportFormat::Csv => render_csv(report),
    };
    fs::write(self.output_path, rendered)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))?;
    Ok(())
  }
}

fn render_json(report: &ScanReport) -> Result<String> {
  serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
}

/// One CSV row per match; files with no matches get a single row with an
/// empty identifier so they still show up in the output.
fn render_csv(report: &ScanReport) -> String {
  let mut out = String::from("path,identifier,confidence,start,end\n");
  for file in &report.files {
    let path = csv_escape(&file.path.to_string_lossy());
    if file.matches.is_empty() {
      out.push_str(&format!("{path},,,,\n"));
      continue;
    }
    for m in &file.matches {
      out.push_str(&format!(
        "{path},{},{:.4},{},{}\n",
        csv_escape(&m.identifier),
        m.confidence,
        m.start,
        m.end
      ));
    }
  }
  out
}

fn csv_escape(field: &str) -> String {
  if field.contains([',', '"', '\n']) {
    format!("\"{}\"", field.replace('"', "\"\""))
  } else {
    field.to_string()
  }
}
