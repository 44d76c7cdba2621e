//! Configuration loading
//!
//! Built-in defaults, then the root config file, then environment overrides.

use super::{paths, schema::AppConfig};
use anyhow::{Context, Result};
use std::path::Path;
use url::Url;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<AppConfig> {
        let mut config = Self::load_defaults();

        let root = paths::root_config_path();
        if root.exists() {
            match Self::load_file(&root) {
                Ok(file_config) => config = file_config,
                Err(e) => tracing::warn!("Ignoring config file: {:#}", e),
            }
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn load_defaults() -> AppConfig {
        AppConfig::default()
    }

    /// Validate the root config file, if any, and the effective configuration
    pub fn validate_root() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            let config = Self::load_file(&root_path)?;
            Self::validate(&config)
                .with_context(|| format!("Invalid config file: {}", root_path.display()))?;
        }

        let config = Self::load().context("Failed to load configuration")?;
        Self::validate(&config)
    }

    /// Check values that parse but cannot work
    pub fn validate(config: &AppConfig) -> Result<()> {
        validate_service_url("network.timeServiceUrl", &config.network.time_service_url)?;
        validate_service_url("network.probeUrl", &config.network.probe_url)?;

        if config.network.probe_interval_secs == 0 {
            anyhow::bail!("network.probeIntervalSecs must be greater than 0");
        }
        if config.network.timeout_secs == 0 {
            anyhow::bail!("network.timeoutSecs must be greater than 0");
        }
        if config.ui.tick_millis == 0 {
            anyhow::bail!("ui.tickMillis must be greater than 0");
        }

        Ok(())
    }

    fn apply_env_overrides(config: AppConfig) -> AppConfig {
        Self::apply_overrides(config, |name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`
    fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("EBILLR_STORAGE_PATH").filter(|p| !p.is_empty()) {
            config.storage_path = Some(path.into());
        }

        if let Some(url) = lookup("EBILLR_TIME_SERVICE_URL").filter(|u| !u.is_empty()) {
            config.network.time_service_url = url;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &AppConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &AppConfig) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

fn validate_service_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", key, value))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow::anyhow!("{} must use http or https, got '{}'", key, other)),
    }
}
