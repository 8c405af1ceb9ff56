//! Runtime configuration
//!
//! Read from a YAML file with kebab-case keys. Every key is optional:
//!
//! ```yaml
//! store-dir: ~/.local/share/fretmodes
//! rank-count: 7
//! overlap-tolerance: -1
//! notation:
//!   maj7: △7
//!   m7: "-7"
//! ```

use crate::error::FretError;
use crate::fretboard::TRIO_OVERLAP_TOLERANCE;
use crate::notation::ChordNotation;
use crate::progression::DEFAULT_RANK_COUNT;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "fretmodes";

/// Config as written in the file, before defaults are applied
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    store_dir: Option<PathBuf>,
    rank_count: Option<usize>,
    overlap_tolerance: Option<i32>,
    notation: Option<ChordNotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where progressions are persisted; `None` uses the platform data dir
    pub store_dir: Option<PathBuf>,
    /// How many ranked positions to report per chord
    pub rank_count: usize,
    pub overlap_tolerance: i32,
    pub notation: ChordNotation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            rank_count: DEFAULT_RANK_COUNT,
            overlap_tolerance: TRIO_OVERLAP_TOLERANCE,
            notation: ChordNotation::default(),
        }
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let defaults = Config::default();
        Self {
            store_dir: raw.store_dir,
            rank_count: raw.rank_count.unwrap_or(defaults.rank_count),
            overlap_tolerance: raw.overlap_tolerance.unwrap_or(defaults.overlap_tolerance),
            notation: raw
                .notation
                .map(ChordNotation::sanitized)
                .unwrap_or(defaults.notation),
        }
    }
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self, FretError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig =
            serde_yaml::from_str(source).map_err(|e| FretError::Config(e.to_string()))?;
        let config = Config::from(raw);
        if config.rank_count == 0 || config.rank_count > 7 {
            return Err(FretError::Config(format!(
                "rank-count must be between 1 and 7, got {}",
                config.rank_count
            )));
        }
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, FretError> {
        match fs::read_to_string(path) {
            Ok(source) => {
                debug!(path = %path.display(), "loaded config");
                Self::from_yaml(&source)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(FretError::Config(format!("{}: {}", path.display(), e))),
        }
    }

    /// Configured store directory, or `<data dir>/fretmodes`
    pub fn resolved_store_dir(&self) -> PathBuf {
        match &self.store_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
