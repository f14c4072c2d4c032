//! # N-gram Module
//!
//! Sliding-window n-gram indexing over token streams. Each window's text is
//! the space-joined token values with a trailing space, checksummed with
//! CRC-32/IEEE so that indices built on different machines agree. The
//! checksum multimap is what makes candidate selection cheap: an unknown
//! window either hits a reference window in O(1) or it doesn't.
//!
//! All windows are half-open `[start, end)` over token indices.

use std::collections::HashMap;

use crate::license::License;
use crate::tokenizer::Token;

/// Base window used to derive the n-gram width from the confidence
/// threshold. Roughly the smallest token count at which a reference is
/// still expected to match near the bottom of the threshold range.
const GRANULARITY_WINDOW: usize = 10;

/// A contiguous window of token values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGram {
  /// Space-joined token values with a trailing space.
  pub text: String,
  /// CRC-32/IEEE of the UTF-8 bytes of `text`.
  pub checksum: u32,
  /// Index of the first token in the window.
  pub start: usize,
  /// One past the index of the last token in the window.
  pub end: usize,
}

/// A reference license together with its n-gram index.
///
/// There is no production path that needs the index-less form, so every
/// corpus reference is carried through detection in this shape.
#[derive(Debug)]
pub struct IndexedLicense<'c> {
  /// The underlying reference.
  pub license: &'c License,
  /// All windows, in scan order.
  pub ngrams: Vec<NGram>,
  /// Checksum to positions in `ngrams`. CRC-32 collisions coexist in the
  /// list, in scan order.
  pub checksum_map: HashMap<u32, Vec<usize>>,
  /// Effective window width: `min(n, tokens.len())`.
  pub granularity: usize,
}

impl<'c> IndexedLicense<'c> {
  /// Indexes a reference at window width `n`.
  ///
  /// A reference shorter than `n` tokens degenerates to a single window
  /// covering the whole stream, and its `granularity` shrinks to the token
  /// count, which downstream phases use to demand an exact match.
  pub fn parse(license: &'c License, n: usize) -> Self {
    let granularity = n.min(license.tokens.len());
    let ngrams = ngrams_of(&license.tokens, n);

    let mut checksum_map: HashMap<u32, Vec<usize>> = HashMap::with_capacity(ngrams.len());
    for (position, gram) in ngrams.iter().enumerate() {
      checksum_map.entry(gram.checksum).or_default().push(position);
    }

    IndexedLicense {
      license,
      ngrams,
      checksum_map,
      granularity,
    }
  }
}

/// Derives the n-gram width from a confidence threshold in `(0, 1]`.
///
/// Wider windows are cheaper to scan but less tolerant of edits, so the
/// width shrinks as the caller demands more confidence; at a threshold of
/// 1.0 every token participates on its own.
pub fn compute_granularity(threshold: f64) -> usize {
  // The nudge keeps exact decimal thresholds (0.8 * 10 = 2) from flooring
  // one step low under binary floating point.
  ((((1.0 - threshold) * GRANULARITY_WINDOW as f64) + 1e-9).floor() as usize).max(1)
}

/// Builds the sliding-window n-grams of a token stream at width `n`.
///
/// A stream shorter than `n` yields a single degenerate window covering the
/// whole stream; an empty stream yields no windows.
pub fn ngrams_of(tokens: &[Token], n: usize) -> Vec<NGram> {
  if tokens.is_empty() {
    return Vec::new();
  }
  if tokens.len() < n {
    return vec![window(tokens, 0, tokens.len())];
  }
  (0..=tokens.len() - n).map(|i| window(tokens, i, i + n)).collect()
}

fn window(tokens: &[Token], start: usize, end: usize) -> NGram {
  let mut text = String::new();
  for token in &tokens[start..end] {
    text.push_str(&token.value);
    text.push(' ');
  }
  let checksum = crc32fast::hash(text.as_bytes());
  NGram {
    text,
    checksum,
    start,
    end,
  }
}
