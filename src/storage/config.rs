//! Configuration handling for archsmith
//!
//! Configuration is stored in `~/.config/archsmith/config.toml`. The
//! location can be overridden with `--config` or `ARCHSMITH_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ScaleTier, DEFAULT_SCORE_BONUS};
use crate::render::Direction;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "ARCHSMITH_CONFIG";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Request validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Minimum description length in characters
    pub min_description_length: usize,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            min_description_length: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiagramConfig {
    /// Flowchart direction (TD or LR)
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Score points added when an enhancement pass changes anything
    pub score_bonus: u8,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            score_bonus: DEFAULT_SCORE_BONUS,
        }
    }
}

/// Settings for the external concept-brief generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeationConfig {
    /// Generator executable; discovered on PATH when unset
    pub command: Option<String>,

    /// Instruction sent with every prompt
    pub system_instruction: String,
}

impl Default for IdeationConfig {
    fn default() -> Self {
        Self {
            command: None,
            system_instruction: crate::plugin::DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Scale used by `design` when `--scale` is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_scale: Option<ScaleTier>,

    pub request: RequestConfig,

    pub diagram: DiagramConfig,

    pub enhance: EnhanceConfig,

    pub ideation: IdeationConfig,
}

impl Config {
    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "archsmith", "archsmith")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Resolves the config file path: explicit path, then environment, then global dir
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| {
                std::env::var_os(CONFIG_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| Self::global_config_dir().map(|dir| dir.join(CONFIG_FILE)))
    }

    /// Loads configuration, falling back to defaults when no file exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enhance.score_bonus > 100 {
            return Err(ConfigError::Invalid(format!(
                "enhance.score_bonus must be at most 100, got {}",
                self.enhance.score_bonus
            )));
        }
        if let Some(command) = &self.ideation.command {
            if command.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "ideation.command must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Serializes the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Writes the configuration, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.default_scale, None);
        assert_eq!(config.request.min_description_length, 20);
        assert_eq!(config.diagram.direction, Direction::TD);
        assert_eq!(config.enhance.score_bonus, 5);
        assert!(config.ideation.command.is_none());
        assert!(!config.ideation.system_instruction.is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
default_format = "json"
default_scale = "medium"

[diagram]
direction = "LR"

[enhance]
score_bonus = 10
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.default_scale, Some(ScaleTier::Medium));
        assert_eq!(config.diagram.direction, Direction::LR);
        assert_eq!(config.enhance.score_bonus, 10);
        // untouched sections keep their defaults
        assert_eq!(config.request.min_description_length, 20);
    }

    #[test]
    fn parse_rejects_bad_toml() {
        let result = Config::parse("default_format = [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn parse_rejects_oversized_bonus() {
        let result = Config::parse("[enhance]\nscore_bonus = 150\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn parse_rejects_blank_command() {
        let result = Config::parse("[ideation]\ncommand = \"  \"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ideation.command = Some("archsmith-ideate-echo".to_string());
        config.request.min_description_length = 5;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.ideation.command.as_deref(), Some("archsmith-ideate-echo"));
        assert_eq!(loaded.request.min_description_length, 5);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.enhance.score_bonus, 5);
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/tmp/explicit.toml");
        assert_eq!(Config::resolve_path(Some(path)), Some(path.to_path_buf()));
    }
}
