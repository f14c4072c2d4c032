//! # Matcher Module
//!
//! Token-level alignment and scoring of one shortlisted candidate. The
//! anchor set pins down where in the unknown stream the reference could
//! live; a minimal edit script over that region then locates the tightest
//! matching sub-range and yields the confidence score.
//!
//! Confidence is the fraction of equal tokens inside the aligned region, so
//! text before and after the match (other licenses, prose, file headers)
//! costs nothing, while edits inside it count against the score.

use std::ops::Range;

use similar::{Algorithm, DiffOp, capture_diff_slices};

use crate::candidates::Candidate;
use crate::tokenizer::Token;

/// Kind of one edit-script entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
  /// Token present in both streams.
  Equal,
  /// Token present only in the unknown stream.
  Insert,
  /// Token present only in the reference stream.
  Delete,
}

/// One per-token entry of the edit script between the reference stream and
/// the aligned region of the unknown stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
  pub kind: DiffKind,
  /// Absolute token index in the unknown stream (`Equal` and `Insert`).
  pub unknown_index: Option<usize>,
  /// Token index in the reference stream (`Equal` and `Delete`).
  pub reference_index: Option<usize>,
}

/// One detected license occurrence.
#[derive(Debug, Clone)]
pub struct LicenseMatch {
  /// SPDX identifier of the matched reference.
  pub identifier: String,
  /// Fraction of equal tokens inside the aligned region, in `[0, 1]`.
  pub confidence: f64,
  /// The matched slice of the unknown stream, inserts included.
  pub tokens: Vec<Token>,
  /// Full edit script computed for the candidate region.
  pub diffs: Vec<DiffEntry>,
  /// Entries of `diffs` between the first and last equal token.
  pub diff_range: Range<usize>,
  /// Token indices claimed in the unknown stream, half-open.
  pub token_range: Range<usize>,
  /// Number of claimed tokens: `token_range.end - token_range.start`.
  pub tokens_claimed: usize,
  /// Byte offset in the original input where the match begins.
  pub start: usize,
  /// Byte offset in the original input where the match ends.
  pub end: usize,
}

/// Aligns a candidate against the unknown stream and scores it.
///
/// Returns `None` when no token of the reference aligns at all or when the
/// confidence falls below `threshold`.
pub fn align(unknown: &[Token], candidate: &Candidate<'_, '_>, threshold: f64) -> Option<LicenseMatch> {
  if candidate.anchors.is_empty() {
    return None;
  }
  let reference = candidate.license.license;
  let region = candidate_region(unknown, candidate);

  let diffs = diff_region(unknown, region.clone(), &reference.tokens);

  // Trim leading and trailing non-equal runs; what's outside describes
  // extraneous prefix/suffix text and does not count against the score.
  let first_equal = diffs.iter().position(|d| d.kind == DiffKind::Equal)?;
  let last_equal = diffs.iter().rposition(|d| d.kind == DiffKind::Equal)?;
  let diff_range = first_equal..last_equal + 1;

  let mut equal = 0usize;
  let mut edits = 0usize;
  for entry in &diffs[diff_range.clone()] {
    match entry.kind {
      DiffKind::Equal => equal += 1,
      DiffKind::Insert | DiffKind::Delete => edits += 1,
    }
  }
  let confidence = equal as f64 / (equal + edits) as f64;
  if confidence < threshold {
    return None;
  }

  let token_start = diffs[first_equal].unknown_index.expect("equal entry carries an unknown index");
  let token_end = diffs[last_equal].unknown_index.expect("equal entry carries an unknown index") + 1;
  let token_range = token_start..token_end;
  let tokens = unknown[token_range.clone()].to_vec();

  Some(LicenseMatch {
    identifier: reference.identifier.clone(),
    confidence,
    start: unknown[token_start].span.start,
    end: unknown[token_end - 1].span.end,
    tokens,
    diffs,
    diff_range,
    tokens_claimed: token_range.end - token_range.start,
    token_range,
  })
}

/// Derives the unknown-stream region to diff from the anchor set.
///
/// The outermost anchors are projected back to the reference's bounds, which
/// widens the region by up to one reference length on either side to capture
/// prefix and suffix drift.
fn candidate_region(unknown: &[Token], candidate: &Candidate<'_, '_>) -> Range<usize> {
  let reference_len = candidate.license.license.tokens.len();
  let mut start = usize::MAX;
  let mut end = 0usize;
  for anchor in &candidate.anchors {
    start = start.min(anchor.unknown_start.saturating_sub(anchor.reference_start));
    end = end.max(anchor.unknown_start + (reference_len - anchor.reference_start));
  }
  start.min(unknown.len())..end.min(unknown.len())
}

/// Computes the minimal token edit script between the reference stream and
/// `unknown[region]`, expanded to one entry per token. A substitution shows
/// up as one delete plus one insert.
fn diff_region(unknown: &[Token], region: Range<usize>, reference: &[Token]) -> Vec<DiffEntry> {
  let unknown_values: Vec<&str> = unknown[region.clone()].iter().map(|t| t.value.as_str()).collect();
  let reference_values: Vec<&str> = reference.iter().map(|t| t.value.as_str()).collect();

  let ops = capture_diff_slices(Algorithm::Myers, &reference_values, &unknown_values);

  let mut entries = Vec::new();
  for op in ops {
    match op {
      DiffOp::Equal {
        old_index, new_index, len, ..
      } => {
        for offset in 0..len {
          entries.push(DiffEntry {
            kind: DiffKind::Equal,
            unknown_index: Some(region.start + new_index + offset),
            reference_index: Some(old_index + offset),
          });
        }
      }
      DiffOp::Delete { old_index, old_len, .. } => {
        push_deletes(&mut entries, old_index, old_len);
      }
      DiffOp::Insert {
        new_index, new_len, ..
      } => {
        push_inserts(&mut entries, region.start + new_index, new_len);
      }
      DiffOp::Replace {
        old_index,
        old_len,
        new_index,
        new_len,
      } => {
        push_deletes(&mut entries, old_index, old_len);
        push_inserts(&mut entries, region.start + new_index, new_len);
      }
    }
  }
  entries
}

fn push_deletes(entries: &mut Vec<DiffEntry>, reference_index: usize, len: usize) {
  for offset in 0..len {
    entries.push(DiffEntry {
      kind: DiffKind::Delete,
      unknown_index: None,
      reference_index: Some(reference_index + offset),
    });
  }
}

fn push_inserts(entries: &mut Vec<DiffEntry>, unknown_index: usize, len: usize) {
  for offset in 0..len {
    entries.push(DiffEntry {
      kind: DiffKind::Insert,
      unknown_index: Some(unknown_index + offset),
      reference_index: None,
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::candidates::select_candidates;
  use crate::license::License;
  use crate::ngram::IndexedLicense;
  use crate::tokenizer::tokenize;

  const REFERENCE: &str = "permission to use copy modify and distribute this software \
    for any purpose with or without fee is hereby granted";

  fn best_match(unknown_text: &str, n: usize, threshold: f64) -> Option<LicenseMatch> {
    let license = License::parse("Example", REFERENCE).unwrap();
    let indexed = IndexedLicense::parse(&license, n);
    let unknown = tokenize(unknown_text);
    let candidates = select_candidates(&unknown, std::slice::from_ref(&indexed), threshold);
    let candidate = candidates.first()?;
    align(&unknown, candidate, threshold)
  }

  #[test]
  fn test_exact_copy_scores_full_confidence() {
    let m = best_match(REFERENCE, 3, 0.9).expect("exact copy must match");
    assert_eq!(m.confidence, 1.0);
    assert_eq!(m.token_range, 0..19);
    assert_eq!(m.tokens_claimed, 19);
    assert_eq!(m.identifier, "Example");
  }

  #[test]
  fn test_surrounding_prose_is_trimmed_away() {
    let text = format!("this file is distributed under the following terms {REFERENCE} end of file");
    let m = best_match(&text, 3, 0.9).expect("embedded copy must match");
    assert_eq!(m.confidence, 1.0);
    assert_eq!(m.token_range, 8..27);
    assert_eq!(m.tokens[0].value, "permission");
    assert_eq!(m.tokens.last().unwrap().value, "granted");
  }

  #[test]
  fn test_byte_offsets_come_from_token_spans() {
    let text = format!("leading words {REFERENCE}");
    let m = best_match(&text, 3, 0.9).unwrap();
    assert_eq!(&text[m.start..m.end], REFERENCE);
  }

  #[test]
  fn test_substitution_counts_as_insert_plus_delete() {
    // One token swapped out of nineteen: E = 18, M = 2.
    let mutated = REFERENCE.replace(" software ", " hardware ");
    let m = best_match(&mutated, 3, 0.5).expect("lightly edited copy must match");
    let expected = 18.0 / 20.0;
    assert!((m.confidence - expected).abs() < 1e-9);
  }

  #[test]
  fn test_missing_tokens_count_as_deletes() {
    let mutated = REFERENCE.replace(" with or without fee ", " ");
    let m = best_match(&mutated, 2, 0.5).expect("shortened copy must match");
    let expected = 15.0 / 19.0;
    assert!((m.confidence - expected).abs() < 1e-9);
  }

  #[test]
  fn test_low_confidence_is_rejected() {
    let mutated = REFERENCE.replace(" software ", " hardware ");
    assert!(best_match(&mutated, 3, 0.95).is_none());
  }

  #[test]
  fn test_confidence_stays_in_unit_interval() {
    let text = format!("noise words before {REFERENCE} noise words after");
    let m = best_match(&text, 2, 0.5).unwrap();
    assert!(m.confidence > 0.0 && m.confidence <= 1.0);
  }
}
