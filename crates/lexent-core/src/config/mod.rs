//! Configuration management for lexent.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `lexent.toml` file
//! 3. User config `~/.config/lexent/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine binding configuration.
    pub engine: EngineConfig,

    /// Parser defaults.
    pub parser: ParserConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            parser: ParserConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./lexent.toml` (project local)
    /// 2. `~/.config/lexent/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(CONFIG_FILE_NAME).exists() {
            return Self::from_file(CONFIG_FILE_NAME);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("lexent").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(strategy) = std::env::var("LEXENT_ENGINE_STRATEGY") {
            self.engine.strategy = strategy;
        }
        if let Ok(path) = std::env::var("LEXENT_ENGINE_PATH") {
            self.engine.path = Some(PathBuf::from(path));
        }
        if let Ok(dir) = std::env::var("LEXENT_ENGINE_DIST_DIR") {
            self.engine.dist_dir = Some(PathBuf::from(dir));
        }
        if let Ok(language) = std::env::var("LEXENT_LANGUAGE") {
            self.parser.default_language = language;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.engine.strategy.as_str() {
            "prebuilt" | "direct" | "local" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "unknown engine strategy {other:?}"
            ))),
        }
    }
}

/// Engine binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Binding strategy: "prebuilt" or "direct".
    pub strategy: String,

    /// Explicit artifact path for the direct strategy.
    pub path: Option<PathBuf>,

    /// Root of the prebuilt dist layout.
    pub dist_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: DEFAULT_ENGINE_STRATEGY.to_string(),
            path: None,
            dist_dir: None,
        }
    }
}

/// Parser defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Language used when a caller does not name one.
    pub default_language: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
