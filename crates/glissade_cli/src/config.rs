//! Runner configuration file handling

use anyhow::{Context, Result};
use glissade_flip::FlipConfig;
use glissade_headless::DEFAULT_VIEWPORT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "glissade.toml";

/// Top-level runner configuration (glissade.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GlissadeConfig {
    #[serde(default)]
    pub flip: FlipConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Size of the headless document's body
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    DEFAULT_VIEWPORT.0
}

fn default_height() -> f32 {
    DEFAULT_VIEWPORT.1
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl GlissadeConfig {
    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).context("Failed to parse glissade.toml")
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load `explicit` if given, else `glissade.toml` in `dir` if present,
    /// else the defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback: PathBuf = dir.join(CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!("using {}", fallback.display());
            return Self::load(&fallback);
        }
        Ok(Self::default())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glissade_flip::RemovalStrategy;

    #[test]
    fn empty_file_uses_defaults() {
        let config = GlissadeConfig::from_toml("").unwrap();
        assert_eq!(config, GlissadeConfig::default());
        assert_eq!(config.viewport.width, 1280.0);
    }

    #[test]
    fn reads_flip_table() {
        let config = GlissadeConfig::from_toml(
            r#"
            [flip]
            duration_ms = 250
            removal = "animation-finished"

            [viewport]
            height = 400
            "#,
        )
        .unwrap();
        assert_eq!(config.flip.duration_ms, 250);
        assert_eq!(config.flip.removal, RemovalStrategy::AnimationFinished);
        assert_eq!(config.viewport.height, 400.0);
        assert_eq!(config.viewport.width, 1280.0);
    }

    #[test]
    fn rejects_unknown_flip_keys() {
        assert!(GlissadeConfig::from_toml("[flip]\nspeed = 2\n").is_err());
    }

    #[test]
    fn missing_default_file_falls_back() {
        let dir = std::env::temp_dir().join("glissade-config-missing");
        let config = GlissadeConfig::resolve(None, &dir).unwrap();
        assert_eq!(config, GlissadeConfig::default());
    }
}
