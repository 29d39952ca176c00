//! Opponent configuration, loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use delegate_engine::DelegateSettings;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Recognized options for the practice opponent.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    /// Fallback search depth in plies (>= 1).
    pub search_depth: u8,
    /// Delegate `Skill Level`, clamped to 0..=20 when sent.
    pub delegate_strength: i32,
    pub delegate_timeout_ms: u64,
    pub handshake_timeout_ms: u64,
    /// UCI engine to consult first. No delegate when unset.
    pub delegate_path: Option<PathBuf>,
    pub delegate_args: Vec<String>,
    pub delegate_depth: Option<u8>,
    pub delegate_movetime_ms: Option<u64>,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            delegate_strength: 10,
            delegate_timeout_ms: 2_000,
            handshake_timeout_ms: 5_000,
            delegate_path: None,
            delegate_args: Vec::new(),
            delegate_depth: None,
            delegate_movetime_ms: None,
        }
    }
}

impl OpponentConfig {
    /// Search-only configuration at the given depth.
    pub fn search_only(search_depth: u8) -> Self {
        Self {
            search_depth,
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth < 1 {
            return Err(ConfigError::InvalidDepth);
        }
        Ok(())
    }

    /// Settings for the delegate process, if one is configured.
    pub fn delegate_settings(&self) -> Option<DelegateSettings> {
        let program = self.delegate_path.as_ref()?;
        let mut settings = DelegateSettings::new(program);
        settings.args = self.delegate_args.clone();
        settings.skill_level = self.delegate_strength;
        settings.depth = self.delegate_depth;
        settings.movetime = self.delegate_movetime_ms.map(Duration::from_millis);
        settings.handshake_timeout = Duration::from_millis(self.handshake_timeout_ms);
        settings.move_timeout = Duration::from_millis(self.delegate_timeout_ms);
        Some(settings)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
