//! # License Module
//!
//! A [`License`] is one known reference text, post-normalisation: the SPDX
//! identifier, the content left after line-level pre-stripping, the token
//! stream of that content, and a per-value token frequency table.
//!
//! References are built once at corpus load and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::tokenizer::{self, Token};

/// Valid SPDX identifiers: letters, digits, `.`, `_`, `+` and `-`.
static IDENTIFIER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._+-]+$").expect("identifier regex must compile"));

/// Error raised while turning raw reference text into a [`License`].
#[derive(Debug, thiserror::Error)]
pub enum LicenseParseError {
  /// The SPDX identifier contains characters outside `[A-Za-z0-9._+-]`.
  #[error("invalid SPDX identifier '{0}'")]
  InvalidIdentifier(String),
}

/// A known SPDX license, tokenised and stripped of copyright boilerplate.
#[derive(Debug, Clone, PartialEq)]
pub struct License {
  /// The SPDX identifier, e.g. `MIT` or `Apache-2.0`.
  pub identifier: String,
  /// The reference text after line-level pre-stripping.
  pub content: String,
  /// Token stream of `content`; spans refer to byte offsets in `content`.
  pub tokens: Vec<Token>,
  /// Occurrence count per token value. Totals equal `tokens.len()`.
  pub token_frequency: HashMap<String, usize>,
}

impl License {
  /// Parses a reference text into a [`License`].
  ///
  /// Line-level pre-stripping removes a leading `"<identifier> license:"`
  /// title line and every copyright notice line, then the remainder is
  /// tokenised and counted.
  ///
  /// # Errors
  ///
  /// Returns [`LicenseParseError::InvalidIdentifier`] when `identifier` does
  /// not match `[A-Za-z0-9._+-]+`.
  pub fn parse(identifier: &str, content: &str) -> Result<Self, LicenseParseError> {
    if !IDENTIFIER.is_match(identifier) {
      return Err(LicenseParseError::InvalidIdentifier(identifier.to_string()));
    }

    let content = strip_boilerplate_lines(identifier, content);
    let tokens = tokenizer::tokenize(&content);

    let mut token_frequency: HashMap<String, usize> = HashMap::with_capacity(tokens.len());
    for token in &tokens {
      *token_frequency.entry(token.value.clone()).or_insert(0) += 1;
    }

    Ok(License {
      identifier: identifier.to_string(),
      content,
      tokens,
      token_frequency,
    })
  }
}

/// Drops the `"<identifier> license:"` title line (first line only) and all
/// copyright notice lines from a reference text.
fn strip_boilerplate_lines(identifier: &str, content: &str) -> String {
  let title = format!("{identifier} license:");
  let mut stripped = String::with_capacity(content.len());
  for (line_no, line) in content.lines().enumerate() {
    if line_no == 0 && line.trim().eq_ignore_ascii_case(&title) {
      continue;
    }
    if tokenizer::is_copyright_line(line) {
      continue;
    }
    stripped.push_str(line);
    stripped.push('\n');
  }
  stripped
}

#[cfg(test)]
mod tests {
  use super::*;

  const NOTICE: &str = "Example License:\n\
    Copyright (c) 2019 Example Industries\n\
    Permission to use, copy, modify, and distribute this software is granted.\n";

  #[test]
  fn test_parse_strips_title_and_copyright_lines() {
    let license = License::parse("Example", NOTICE).unwrap();
    assert!(!license.content.to_lowercase().contains("example license:"));
    assert!(!license.content.contains("Example Industries"));
    assert_eq!(license.tokens[0].value, "permission");
  }

  #[test]
  fn test_title_line_is_only_dropped_at_the_top() {
    let text = "Permission granted.\nExample License:\n";
    let license = License::parse("Example", text).unwrap();
    let values: Vec<_> = license.tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["permission", "granted", "example", "license"]);
  }

  #[test]
  fn test_token_frequency_totals_match_token_count() {
    let license = License::parse("Example", NOTICE).unwrap();
    let total: usize = license.token_frequency.values().sum();
    assert_eq!(total, license.tokens.len());
    assert_eq!(license.token_frequency["and"], 1);
  }

  #[test]
  fn test_parse_is_reproducible() {
    let a = License::parse("Example", NOTICE).unwrap();
    let b = License::parse("Example", NOTICE).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn test_invalid_identifier_is_rejected() {
    let err = License::parse("not valid!", "text").unwrap_err();
    assert!(matches!(err, LicenseParseError::InvalidIdentifier(_)));
  }

  #[test]
  fn test_identifier_charset() {
    assert!(License::parse("Apache-2.0", "x").is_ok());
    assert!(License::parse("GPL-3.0+", "x").is_ok());
    assert!(License::parse("CC_BY", "x").is_ok());
    assert!(License::parse("MIT License", "x").is_err());
  }
}
