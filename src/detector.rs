//! # Detector Module
//!
//! The public detection API. A [`Detector`] wraps an immutable [`Corpus`]
//! and answers "which licenses are in this text" as an ordered list of
//! non-overlapping [`LicenseMatch`]es.
//!
//! Detection is pure and single-threaded per call: no I/O, no logging, no
//! shared mutable state, so one detector may serve any number of threads.

use crate::arbiter;
use crate::candidates;
use crate::corpus::Corpus;
use crate::matcher::{self, LicenseMatch};
use crate::ngram::{self, IndexedLicense};
use crate::tokenizer;

/// Error raised at the detection API boundary.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
  /// The confidence threshold must lie in `(0, 1]`. Out-of-range values
  /// are rejected rather than clamped.
  #[error("confidence threshold {0} is outside (0, 1]")]
  InvalidThreshold(f64),

  /// Detection against an empty corpus can never match anything.
  #[error("the reference corpus is empty")]
  EmptyCorpus,
}

/// License detector over an immutable reference corpus.
#[derive(Debug)]
pub struct Detector {
  corpus: Corpus,
}

impl Detector {
  /// Wraps a corpus for detection.
  ///
  /// # Errors
  ///
  /// Returns [`DetectError::EmptyCorpus`] when the corpus has no references.
  pub fn new(corpus: Corpus) -> Result<Self, DetectError> {
    if corpus.is_empty() {
      return Err(DetectError::EmptyCorpus);
    }
    Ok(Detector { corpus })
  }

  /// The wrapped corpus.
  pub fn corpus(&self) -> &Corpus {
    &self.corpus
  }

  /// Detects the licenses present in `text` at the given confidence
  /// threshold.
  ///
  /// The result is ordered by byte position, non-overlapping, and empty
  /// when nothing clears the threshold; no match is not an error. Byte
  /// offsets in each match refer to `text`.
  ///
  /// # Errors
  ///
  /// Returns [`DetectError::InvalidThreshold`] when `threshold` is outside
  /// `(0, 1]` (NaN included).
  pub fn detect(&self, text: &str, threshold: f64) -> Result<Vec<LicenseMatch>, DetectError> {
    if !(threshold > 0.0 && threshold <= 1.0) {
      return Err(DetectError::InvalidThreshold(threshold));
    }

    let unknown = tokenizer::tokenize_filtered(text);
    if unknown.is_empty() {
      return Ok(Vec::new());
    }

    let granularity = ngram::compute_granularity(threshold);
    let indexed: Vec<IndexedLicense<'_>> = self
      .corpus
      .licenses()
      .iter()
      .map(|license| IndexedLicense::parse(license, granularity))
      .collect();

    let shortlist = candidates::select_candidates(&unknown, &indexed, threshold);
    let scored = shortlist
      .iter()
      .filter_map(|candidate| matcher::align(&unknown, candidate, threshold))
      .collect();

    Ok(arbiter::arbitrate(scored))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::license::License;

  fn detector() -> Detector {
    let corpus = Corpus::from_licenses(vec![
      License::parse(
        "Example",
        "permission to use copy modify and distribute this software for any purpose is hereby granted",
      )
      .unwrap(),
    ]);
    Detector::new(corpus).unwrap()
  }

  #[test]
  fn test_empty_corpus_is_rejected() {
    let err = Detector::new(Corpus::from_licenses(Vec::new())).unwrap_err();
    assert!(matches!(err, DetectError::EmptyCorpus));
  }

  #[test]
  fn test_out_of_range_thresholds_are_rejected() {
    let d = detector();
    assert!(matches!(d.detect("text", 0.0), Err(DetectError::InvalidThreshold(_))));
    assert!(matches!(d.detect("text", -0.5), Err(DetectError::InvalidThreshold(_))));
    assert!(matches!(d.detect("text", 1.5), Err(DetectError::InvalidThreshold(_))));
    assert!(matches!(d.detect("text", f64::NAN), Err(DetectError::InvalidThreshold(_))));
  }

  #[test]
  fn test_empty_input_detects_nothing() {
    assert!(detector().detect("", 0.9).unwrap().is_empty());
  }

  #[test]
  fn test_copyright_only_input_detects_nothing() {
    let text = "Copyright (c) 2020 First Author\nCopyright (c) 2021 Second Author\n";
    assert!(detector().detect(text, 0.9).unwrap().is_empty());
  }

  #[test]
  fn test_detection_is_deterministic() {
    let d = detector();
    let text = "permission to use copy modify and distribute this software for any purpose is hereby granted";
    let a = d.detect(text, 0.9).unwrap();
    let b = d.detect(text, 0.9).unwrap();
    assert_eq!(a.len(), b.len());
    assert_eq!(a[0].identifier, b[0].identifier);
    assert_eq!(a[0].token_range, b[0].token_range);
  }
}
