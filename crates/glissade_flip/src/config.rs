//! FLIP engine configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! duration_ms = 300
//! easing = "ease-out"
//! removal = "animation-finished"
//! key_validation = "strict"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glissade_animation::{AnimationOptions, Easing, FillMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// When a removed element is finally detached
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalStrategy {
    /// One-shot timer for the duration captured when `remove` was called
    #[default]
    Timer,
    /// Wait for the host animation's own finish signal
    AnimationFinished,
}

/// How `read` treats two elements with the same key in one batch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyValidation {
    /// Last write wins silently
    Off,
    /// Last write wins, with a warning
    Warn,
    /// The whole batch is rejected
    Strict,
}

impl Default for KeyValidation {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            KeyValidation::Warn
        } else {
            KeyValidation::Off
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse FLIP config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// FLIP engine settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlipConfig {
    /// Animation duration and detachment delay
    pub duration_ms: u32,
    pub easing: Easing,
    pub fill: FillMode,
    /// Vertical distance travelled by entering and leaving elements
    pub offset_px: f32,
    pub removal: RemovalStrategy,
    /// Cancel the previous animation (and pending detachment) of the same
    /// node before starting a new one
    pub cancel_in_flight: bool,
    pub key_validation: KeyValidation,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            easing: Easing::EaseInOut,
            fill: FillMode::Both,
            offset_px: 30.0,
            removal: RemovalStrategy::Timer,
            cancel_in_flight: false,
            key_validation: KeyValidation::default(),
        }
    }
}

impl FlipConfig {
    /// Parse from a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Timing options for every animation the engine starts
    pub fn animation_options(&self) -> AnimationOptions {
        AnimationOptions::new(self.duration_ms)
            .easing(self.easing)
            .fill(self.fill)
    }

    /// Builder: set duration
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builder: set removal strategy
    pub fn with_removal(mut self, removal: RemovalStrategy) -> Self {
        self.removal = removal;
        self
    }

    /// Builder: set in-flight cancellation
    pub fn with_cancel_in_flight(mut self, cancel: bool) -> Self {
        self.cancel_in_flight = cancel;
        self
    }

    /// Builder: set key validation
    pub fn with_key_validation(mut self, validation: KeyValidation) -> Self {
        self.key_validation = validation;
        self
    }
}
