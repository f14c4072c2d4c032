//! # Arbiter Module
//!
//! Composes the per-candidate matches into the final answer: a set of
//! non-overlapping regions ordered by position. Same-identifier duplicates
//! (a reference loaded with and without its optional tail, for instance)
//! collapse to the longer hit first, then higher-confidence matches claim
//! their ranges greedily.

use std::ops::Range;

use crate::matcher::LicenseMatch;

/// Two same-identifier matches whose token ranges overlap by more than this
/// fraction of the shorter range are considered duplicates.
const DUPLICATE_OVERLAP: f64 = 0.5;

/// Resolves duplicates and overlaps among scored matches.
///
/// The result is deterministic for a given input: non-overlapping, ordered
/// by `token_range.start`.
pub fn arbitrate(mut matches: Vec<LicenseMatch>) -> Vec<LicenseMatch> {
  // Longer claims first so the shorter duplicate is the one dropped.
  matches.sort_by(|a, b| {
    b.tokens_claimed
      .cmp(&a.tokens_claimed)
      .then_with(|| a.identifier.cmp(&b.identifier))
  });

  let mut deduped: Vec<LicenseMatch> = Vec::with_capacity(matches.len());
  for m in matches {
    let duplicate = deduped
      .iter()
      .any(|kept| kept.identifier == m.identifier && overlap_fraction(&kept.token_range, &m.token_range) > DUPLICATE_OVERLAP);
    if !duplicate {
      deduped.push(m);
    }
  }

  // Strongest matches claim their token ranges first.
  deduped.sort_by(|a, b| {
    b.confidence
      .total_cmp(&a.confidence)
      .then_with(|| b.tokens_claimed.cmp(&a.tokens_claimed))
      .then_with(|| a.identifier.cmp(&b.identifier))
  });

  let mut accepted: Vec<LicenseMatch> = Vec::with_capacity(deduped.len());
  for m in deduped {
    if accepted.iter().all(|kept| !ranges_overlap(&kept.token_range, &m.token_range)) {
      accepted.push(m);
    }
  }

  accepted.sort_by_key(|m| m.token_range.start);
  accepted
}

fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
  a.start < b.end && b.start < a.end
}

/// Overlap length as a fraction of the shorter of the two ranges.
fn overlap_fraction(a: &Range<usize>, b: &Range<usize>) -> f64 {
  let overlap = a.end.min(b.end).saturating_sub(a.start.max(b.start));
  let shorter = (a.end - a.start).min(b.end - b.start);
  if shorter == 0 {
    return 0.0;
  }
  overlap as f64 / shorter as f64
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::matcher::LicenseMatch;

  fn hit(identifier: &str, range: Range<usize>, confidence: f64) -> LicenseMatch {
    LicenseMatch {
      identifier: identifier.to_string(),
      confidence,
      tokens: Vec::new(),
      diffs: Vec::new(),
      diff_range: 0..0,
      tokens_claimed: range.end - range.start,
      token_range: range,
      start: 0,
      end: 0,
    }
  }

  #[test]
  fn test_same_identifier_duplicates_keep_the_longer_span() {
    let out = arbitrate(vec![hit("AGPL-3.0", 0..80, 1.0), hit("AGPL-3.0", 0..120, 1.0)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].tokens_claimed, 120);
  }

  #[test]
  fn test_barely_overlapping_same_identifier_hits_survive_dedup() {
    // 20 of 100 tokens overlap: below the duplicate epsilon, so both reach
    // the greedy phase, where the second loses on overlap anyway.
    let out = arbitrate(vec![hit("MIT", 0..100, 1.0), hit("MIT", 80..180, 0.9)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].token_range, 0..100);
  }

  #[test]
  fn test_cross_identifier_overlap_resolves_by_confidence() {
    let out = arbitrate(vec![hit("BSD-3-Clause", 10..60, 0.97), hit("MIT", 40..90, 0.99)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].identifier, "MIT");
  }

  #[test]
  fn test_disjoint_matches_are_ordered_by_position() {
    let out = arbitrate(vec![hit("BSD-3-Clause", 200..350, 0.99), hit("MIT", 0..160, 0.96)]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].identifier, "MIT");
    assert_eq!(out[1].identifier, "BSD-3-Clause");
  }

  #[test]
  fn test_confidence_tie_breaks_on_claimed_tokens() {
    let out = arbitrate(vec![hit("Zlib", 0..40, 0.95), hit("MIT", 20..180, 0.95)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].identifier, "MIT");
  }

  #[test]
  fn test_empty_input_stays_empty() {
    assert!(arbitrate(Vec::new()).is_empty());
  }
}
