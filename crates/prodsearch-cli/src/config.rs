//! Configuration management for Prodsearch CLI
//!
//! Stores the catalog endpoint and debounce settings in
//! ~/.config/prodsearch/config.toml. Environment variables override the file.

use anyhow::{Context, Result};
use prodsearch_http::{HttpCatalogConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "prodsearch";
const CONFIG_FILE: &str = "config.toml";

pub const ENV_BASE_URL: &str = "PRODSEARCH_BASE_URL";
pub const ENV_DEBOUNCE_MS: &str = "PRODSEARCH_DEBOUNCE_MS";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_DEBOUNCE_MS).ok(),
        )?;
        Ok(config)
    }

    /// Load config from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Apply override values (environment or flags); `None` keeps the current value
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        debounce_ms: Option<String>,
    ) -> Result<()> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(ms) = debounce_ms {
            self.debounce_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("Invalid debounce value '{}'", ms))?;
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Settings for the HTTP catalog adapter
    pub fn catalog_config(&self) -> HttpCatalogConfig {
        HttpCatalogConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce_ms = 250\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            base_url: "http://localhost:3000".to_string(),
            debounce_ms: 120,
            timeout_secs: 3,
        };

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(Some("http://mirror.test".to_string()), Some(" 75 ".to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://mirror.test");
        assert_eq!(config.debounce_ms, 75);

        assert!(config.apply_overrides(None, Some("soon".to_string())).is_err());
        config.apply_overrides(Some("  ".to_string()), None).unwrap();
        assert_eq!(config.base_url, "http://mirror.test");
    }

    #[test]
    fn test_catalog_config() {
        let config = Config {
            timeout_secs: 4,
            ..Config::default()
        };

        let catalog = config.catalog_config();

        assert_eq!(catalog.base_url, DEFAULT_BASE_URL);
        assert_eq!(catalog.timeout, Duration::from_secs(4));
    }
}
