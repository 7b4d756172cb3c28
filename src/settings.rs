//! Runtime settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CHEAT_CODE, SIM_HZ};
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,
    /// Phrase typed on the splash screen to enable triple shot
    pub cheat_code: String,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// RNG seed; `None` picks a fresh one per process
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            cheat_code: CHEAT_CODE.to_string(),
            tick_rate_hz: SIM_HZ,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.cheat_code = settings.cheat_code.to_uppercase();
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Upper-case the cheat phrase and validate. Invalid settings fall back to
    /// the defaults, keeping the seed.
    pub fn sanitized(mut self) -> Self {
        self.cheat_code = self.cheat_code.to_uppercase();
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self {
                    seed: self.seed,
                    ..Self::default()
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(field) = self.tuning.first_invalid_field() {
            return Err(SettingsError::Invalid(format!("tuning.{field} out of range")));
        }
        if self.tick_rate_hz == 0 {
            return Err(SettingsError::Invalid("tick_rate_hz must be non-zero".into()));
        }
        if self.cheat_code.is_empty() {
            return Err(SettingsError::Invalid("cheat_code must not be empty".into()));
        }
        Ok(())
    }

    /// Duration of one simulation tick in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }
}
