//! # Configuration Module
//!
//! Optional configuration for the licenseid CLI, loaded from a
//! `.licenseid.toml` file in the working directory or from the path named
//! by the `LICENSEID_CONFIG` environment variable. Command-line flags
//! always win over file values.
//!
//! ```toml
//! threshold = 0.9
//! corpus-dirs = ["share/licenses"]
//!
//! [reports]
//! json = "licenses.json"
//! csv = "licenses.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".licenseid.toml";

/// Environment variable for specifying a config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSEID_CONFIG";

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("failed to read config file '{}': {source}", path.display())]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },

  /// The config file contains invalid TOML.
  #[error("failed to parse config file '{}': {source}", path.display())]
  Parse {
    path: PathBuf,
    source: toml::de::Error,
  },

  /// A configured value is out of range.
  #[error("invalid config value for '{field}': {message}")]
  InvalidValue { field: &'static str, message: String },
}

/// Report output paths configured in the file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
  /// Write a JSON report to this path after every scan.
  #[serde(default)]
  pub json: Option<PathBuf>,

  /// Write a CSV report to this path after every scan.
  #[serde(default)]
  pub csv: Option<PathBuf>,
}

/// Main configuration struct for licenseid.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
  /// Default confidence threshold in `(0, 1]`.
  #[serde(default)]
  pub threshold: Option<f64>,

  /// Directories to load reference licenses from.
  #[serde(default, rename = "corpus-dirs")]
  pub corpus_dirs: Vec<PathBuf>,

  /// Report outputs.
  #[serde(default)]
  pub reports: ReportConfig,
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(threshold) = self.threshold {
      if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(ConfigError::InvalidValue {
          field: "threshold",
          message: format!("{threshold} is outside (0, 1]"),
        });
      }
    }
    Ok(())
  }
}

/// Resolve and load the effective configuration.
///
/// Priority: explicit `--config` path, then `LICENSEID_CONFIG`, then a
/// `.licenseid.toml` in the current directory. A missing default file is
/// fine; a missing explicit file is an error. `no_config` skips all of it.
pub fn load_config(explicit: Option<&Path>, no_config: bool) -> Result<Config, ConfigError> {
  if no_config {
    return Ok(Config::default());
  }

  if let Some(path) = explicit {
    return Config::load(path);
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    return Config::load(Path::new(&env_path));
  }

  let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
  if default_path.exists() {
    return Config::load(default_path);
  }

  Ok(Config::default())
}
