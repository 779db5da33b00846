use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::tour::TourOptions;

/// Playback settings. Missing keys in a settings file take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub best: bool,
    pub random: bool,
    /// Fixes the shuffle / starting offset.
    pub seed: Option<u64>,
    /// Pause between transitions; 0 prints them back to back.
    pub interval_ms: u64,
    /// Full rotations to play.
    pub cycles: usize,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            best: true,
            random: false,
            seed: None,
            interval_ms: 0,
            cycles: 1,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tour_options(&self) -> TourOptions {
        TourOptions {
            best: self.best,
            random: self.random,
        }
    }
}
