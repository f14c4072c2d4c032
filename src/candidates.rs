//! # Candidate Selection Module
//!
//! The only phase that sweeps the whole corpus. The unknown text's n-grams
//! are checked against every reference's checksum map; each hit anchors a
//! position in the unknown stream to a position in the reference. References
//! whose anchor density clears a coarse prefilter move on to the expensive
//! alignment phase.

use std::collections::HashMap;

use crate::ngram::{self, IndexedLicense, NGram};
use crate::tokenizer::Token;

/// Fraction of the confidence threshold a reference's normalised anchor
/// score must reach to stay on the shortlist.
const PREFILTER_FACTOR: f64 = 0.5;

/// One checksum hit: a window of the unknown stream that also occurs in the
/// reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
  /// Token index of the window start in the unknown stream.
  pub unknown_start: usize,
  /// Token index of the window start in the reference stream.
  pub reference_start: usize,
}

/// A shortlisted reference with its anchor set.
#[derive(Debug)]
pub struct Candidate<'i, 'c> {
  pub license: &'i IndexedLicense<'c>,
  pub anchors: Vec<Anchor>,
}

/// Ranks corpus references against the unknown stream and returns those
/// whose anchor score clears the prefilter, best first.
///
/// References indexed at a degenerate (shorter) granularity are scanned
/// with windows of their own width, so one-line licenses still anchor on an
/// exact occurrence.
pub fn select_candidates<'i, 'c>(
  unknown: &[Token],
  corpus: &'i [IndexedLicense<'c>],
  threshold: f64,
) -> Vec<Candidate<'i, 'c>> {
  if unknown.is_empty() {
    return Vec::new();
  }

  // Unknown-side n-grams per window width; all non-degenerate references
  // share one width, degenerate ones each get their own scan.
  let mut grams_by_width: HashMap<usize, Vec<NGram>> = HashMap::new();

  let mut shortlist: Vec<(f64, Candidate<'i, 'c>)> = Vec::new();
  for indexed in corpus {
    if indexed.granularity == 0 {
      continue;
    }
    let grams = grams_by_width
      .entry(indexed.granularity)
      .or_insert_with(|| ngram::ngrams_of(unknown, indexed.granularity));

    let mut anchors = Vec::new();
    for gram in grams.iter() {
      if let Some(positions) = indexed.checksum_map.get(&gram.checksum) {
        for &position in positions {
          anchors.push(Anchor {
            unknown_start: gram.start,
            reference_start: indexed.ngrams[position].start,
          });
        }
      }
    }

    // Anchor density over the reference's window count. A degenerate
    // reference has one window, so an exact occurrence scores 1.0 instead
    // of being drowned by its own token count.
    let score = anchors.len() as f64 / indexed.ngrams.len() as f64;
    if score >= threshold * PREFILTER_FACTOR {
      shortlist.push((score, Candidate { license: indexed, anchors }));
    }
  }

  // Best-scoring references first; identifier breaks ties for determinism.
  shortlist.sort_by(|(a_score, a), (b_score, b)| {
    b_score
      .total_cmp(a_score)
      .then_with(|| a.license.license.identifier.cmp(&b.license.license.identifier))
  });
  shortlist.into_iter().map(|(_, candidate)| candidate).collect()
}
