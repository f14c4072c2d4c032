//! # licenseid
//!
//! A tool that identifies which known open-source licenses are present in a
//! piece of text, typically a LICENSE file. Given a corpus of canonical
//! license texts named by SPDX identifier, it recognises lightly mutated
//! copies: reformatting, copyright line edits, reflowed whitespace,
//! punctuation drift, and several licenses concatenated in one file.
//!
//! Detection runs in phases: text is normalised into a token stream,
//! n-gram checksums shortlist the plausible references, a token-level diff
//! locates and scores each match, and an arbiter composes the surviving
//! matches into non-overlapping regions.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use licenseid::{Corpus, Detector};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Load every `<SPDX-ID>.txt` in the directory as a reference.
//!     let corpus = Corpus::load(["share/licenses"])?;
//!     let detector = Detector::new(corpus)?;
//!
//!     let text = std::fs::read_to_string("LICENSE")?;
//!     for m in detector.detect(&text, 0.9)? {
//!         println!("{} {:.1}% at bytes {}..{}", m.identifier, m.confidence * 100.0, m.start, m.end);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`tokenizer`] - Normalised tokenisation shared by both sides of a match
//! * [`corpus`] - Loading and holding the reference licenses
//! * [`detector`] - The detection API tying the phases together
//!
//! [`tokenizer`]: crate::tokenizer
//! [`corpus`]: crate::corpus
//! [`detector`]: crate::detector

pub mod arbiter;
pub mod candidates;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod detector;
pub mod license;
pub mod logging;
pub mod matcher;
pub mod ngram;
pub mod output;
pub mod report;
pub mod tokenizer;

pub use corpus::{Corpus, CorpusError};
pub use detector::{DetectError, Detector};
pub use license::License;
pub use matcher::LicenseMatch;
