//! # Corpus Module
//!
//! Loads the reference corpus from disk: every `.txt` file in the supplied
//! directories becomes one reference license, named by its filename stem.
//! The corpus is immutable after construction and may be shared read-only
//! by any number of concurrent detections.

use std::path::{Path, PathBuf};

use crate::license::{License, LicenseParseError};

/// Marker phrase after which some license families carry an optional,
/// instructional tail. References containing it are loaded twice: in full
/// and truncated to end exactly at the phrase.
const TERMS_END_MARKER: &str = "END OF TERMS AND CONDITIONS";

/// Error raised while building a corpus. Fatal to that construction call;
/// a previously built corpus is unaffected.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
  /// A reference directory holds a file that is not a `.txt` file.
  #[error("unsupported corpus file '{}': reference licenses must be .txt files", .0.display())]
  UnsupportedFile(PathBuf),

  /// A reference file is not valid UTF-8.
  #[error("corpus file '{}' is not valid UTF-8", .0.display())]
  InvalidEncoding(PathBuf),

  /// A filename stem is not a valid SPDX identifier.
  #[error(transparent)]
  InvalidIdentifier(#[from] LicenseParseError),

  /// A directory or file could not be read.
  #[error("failed to read '{}'", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// The ordered, immutable collection of reference licenses.
#[derive(Debug)]
pub struct Corpus {
  licenses: Vec<License>,
}

impl Corpus {
  /// Loads every `.txt` reference from the given directories, non-recursive.
  ///
  /// Directory entries are visited in filename order so the corpus comes
  /// out identical run to run. Subdirectories are skipped; any non-`.txt`
  /// file is an error.
  pub fn load<I, P>(directories: I) -> Result<Self, CorpusError>
  where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
  {
    let mut licenses = Vec::new();
    for directory in directories {
      let directory = directory.as_ref();
      let mut paths: Vec<PathBuf> = std::fs::read_dir(directory)
        .map_err(|source| CorpusError::Io {
          path: directory.to_path_buf(),
          source,
        })?
        .map(|entry| {
          entry
            .map(|e| e.path())
            .map_err(|source| CorpusError::Io {
              path: directory.to_path_buf(),
              source,
            })
        })
        .collect::<Result<_, _>>()?;
      paths.sort();

      for path in paths {
        if path.is_dir() {
          continue;
        }
        load_reference(&path, &mut licenses)?;
      }
    }
    Ok(Self::from_licenses(licenses))
  }

  /// Builds a corpus from already-parsed references, sorting by identifier.
  ///
  /// The sort is stable, so a full reference stays ahead of its truncated
  /// sibling.
  pub fn from_licenses(mut licenses: Vec<License>) -> Self {
    licenses.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Corpus { licenses }
  }

  /// The references, sorted by identifier.
  pub fn licenses(&self) -> &[License] {
    &self.licenses
  }

  pub fn len(&self) -> usize {
    self.licenses.len()
  }

  pub fn is_empty(&self) -> bool {
    self.licenses.is_empty()
  }
}

/// Parses one reference file, emitting the truncated sibling when the raw
/// content carries the optional-tail marker.
fn load_reference(path: &Path, licenses: &mut Vec<License>) -> Result<(), CorpusError> {
  if path.extension().and_then(|e| e.to_str()) != Some("txt") {
    return Err(CorpusError::UnsupportedFile(path.to_path_buf()));
  }

  let identifier = path
    .file_stem()
    .and_then(|s| s.to_str())
    .ok_or_else(|| CorpusError::UnsupportedFile(path.to_path_buf()))?
    .to_string();

  let bytes = std::fs::read(path).map_err(|source| CorpusError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  let content = String::from_utf8(bytes).map_err(|_| CorpusError::InvalidEncoding(path.to_path_buf()))?;

  licenses.push(License::parse(&identifier, &content)?);
  if let Some(index) = content.find(TERMS_END_MARKER) {
    let truncated = &content[..index + TERMS_END_MARKER.len()];
    licenses.push(License::parse(&identifier, truncated)?);
  }
  Ok(())
}
