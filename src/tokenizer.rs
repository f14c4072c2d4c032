//! # Tokeniser Module
//!
//! This module turns raw license text into the canonical token stream used by
//! every other stage of the detection pipeline. Both reference ingestion and
//! unknown-text analysis go through the same normalisation so that n-gram
//! checksums and diffs compare like with like.
//!
//! Normalisation applied to each whitespace-delimited word, in order:
//!
//! 1. Lowercase.
//! 2. Fold unicode quotation marks to their ASCII equivalents.
//! 3. Strip every character that is not alphanumeric or an apostrophe.
//! 4. Drop the word entirely if nothing is left, or if only digits are left
//!    (copyright years and version numbers are noise for matching purposes).
//!
//! Every emitted token carries the byte span of the word it came from, so
//! detection results can be reported as offsets into the original input.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a full copyright notice line, e.g. `Copyright (c) 2021 Example
/// Corp.` Lines like this are excluded from matching on both the reference
/// and the unknown side.
static COPYRIGHT_LINE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^copyright\s+(\(c\)|©)\s+\d{4}.{0,100}$").expect("copyright line regex must compile")
});

/// One canonical lexical unit of license prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  /// The normalised word.
  pub value: String,
  /// 0-based position of this token within its stream.
  pub index: usize,
  /// Byte range of the source word in the text the stream was built from.
  pub span: Range<usize>,
}

/// Returns `true` if the (trimmed) line is a copyright notice line.
pub fn is_copyright_line(line: &str) -> bool {
  COPYRIGHT_LINE.is_match(line.trim())
}

/// Tokenises raw text into a normalised token stream.
///
/// Deterministic and pure; empty input yields an empty stream. Spans refer
/// to byte offsets in `text`.
pub fn tokenize(text: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  scan_words(text, 0, &mut tokens);
  tokens
}

/// Tokenises unknown input for detection, skipping copyright notice lines.
///
/// The skipped lines never produce tokens, but the spans of the surviving
/// tokens still refer to byte offsets in the original `text`. A text that
/// consists solely of copyright lines therefore yields an empty stream.
pub fn tokenize_filtered(text: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut offset = 0;
  for line in text.split_inclusive('\n') {
    if !is_copyright_line(line) {
      scan_words(line, offset, &mut tokens);
    }
    offset += line.len();
  }
  tokens
}

/// Splits `text` on unicode whitespace and appends one token per surviving
/// word, with spans shifted by `base`.
fn scan_words(text: &str, base: usize, tokens: &mut Vec<Token>) {
  let mut word_start: Option<usize> = None;
  for (i, ch) in text.char_indices() {
    if ch.is_whitespace() {
      if let Some(start) = word_start.take() {
        push_word(&text[start..i], base + start, tokens);
      }
    } else if word_start.is_none() {
      word_start = Some(i);
    }
  }
  if let Some(start) = word_start {
    push_word(&text[start..], base + start, tokens);
  }
}

fn push_word(word: &str, span_start: usize, tokens: &mut Vec<Token>) {
  if let Some(value) = normalize_word(word) {
    let index = tokens.len();
    tokens.push(Token {
      value,
      index,
      span: span_start..span_start + word.len(),
    });
  }
}

/// Normalises one word, returning `None` when the word contributes no token.
fn normalize_word(word: &str) -> Option<String> {
  let mut value = String::with_capacity(word.len());
  for ch in word.chars() {
    let ch = fold_quote(ch);
    if ch.is_alphanumeric() || ch == '\'' {
      for lower in ch.to_lowercase() {
        value.push(lower);
      }
    }
  }
  // Quotes around a word are punctuation; apostrophes inside one are not.
  let value = value.trim_matches('\'');
  if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }
  Some(value.to_string())
}

/// Maps unicode quotation marks to their ASCII equivalents.
fn fold_quote(ch: char) -> char {
  match ch {
    '\u{2018}' | '\u{2019}' => '\'',
    '\u{201C}' | '\u{201D}' => '"',
    _ => ch,
  }
}
