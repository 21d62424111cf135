use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::builders::patterns::RulePolicy;
use crate::builders::validator::{ConfigValidator, StandardValidator};

/// Config file name used by `init` when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "filterlist-dnr.toml";

/// The only config schema version understood so far.
pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct OutputSettings {
    pub pretty: bool,
    /// Upper bound on emitted rules; the host rejects dynamic rule sets above
    /// its own limit (5000 in current browsers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rules: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConverterConfig {
    pub version: String,
    pub verbose: bool,
    pub rules: RulePolicy,
    pub output: OutputSettings,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            verbose: false,
            rules: RulePolicy::default(),
            output: OutputSettings::default(),
        }
    }
}

/// Serialization format of a config file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<ConverterConfig>;
    fn save_config(&self, config: &ConverterConfig) -> Result<()>;
    fn get_config_path(&self) -> &Path;
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new_at(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Writes a default config unless one already exists.
    ///
    /// Returns `true` when a file was created.
    pub fn initialize(&self) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }

        self.save_config(&ConverterConfig::default())?;
        Ok(true)
    }

    /// Loads the config and fails if the validator reports any issue.
    pub fn load_validated(&self) -> Result<ConverterConfig> {
        let config = self.load_config()?;
        let issues = StandardValidator::new().validate_config(&config)?;

        if !issues.is_empty() {
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            anyhow::bail!(
                "Configuration {} is invalid ({} issues)",
                self.config_path.display(),
                issues.len()
            );
        }
        Ok(config)
    }
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<ConverterConfig> {
        if !self.config_path.exists() {
            return Ok(ConverterConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        match ConfigFormat::from_path(&self.config_path) {
            ConfigFormat::Toml => toml::from_str(&content).context("Failed to parse config file"),
            ConfigFormat::Yaml => {
                serde_yaml::from_str(&content).context("Failed to parse config file")
            }
            ConfigFormat::Json => {
                serde_json::from_str(&content).context("Failed to parse config file")
            }
        }
    }

    fn save_config(&self, config: &ConverterConfig) -> Result<()> {
        let content = match ConfigFormat::from_path(&self.config_path) {
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).context("Failed to serialize config to TOML")?
            }
            ConfigFormat::Yaml => {
                serde_yaml::to_string(config).context("Failed to serialize config to YAML")?
            }
            ConfigFormat::Json => serde_json::to_string_pretty(config)
                .context("Failed to serialize config to JSON")?,
        };

        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
