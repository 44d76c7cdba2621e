//! Application configuration
//!
//! A YAML file in the config directory plus environment overrides. User
//! preferences are not configuration; they live in the key-value store.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{AppConfig, NetworkConfig, ProfileConfig, UiConfig};

use anyhow::Context;

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &AppConfig, key: &str) -> anyhow::Result<String> {
    match key {
        "storagePath" => Ok(config.storage_file().display().to_string()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.tickMillis" => Ok(config.ui.tick_millis.to_string()),
        "ui.scrollDebounceMillis" => Ok(config.ui.scroll_debounce_millis.to_string()),
        "network.timeServiceUrl" => Ok(config.network.time_service_url.clone()),
        "network.probeUrl" => Ok(config.network.probe_url.clone()),
        "network.probeIntervalSecs" => Ok(config.network.probe_interval_secs.to_string()),
        "network.timeoutSecs" => Ok(config.network.timeout_secs.to_string()),
        "profile.minimumDelayMillis" => Ok(config.profile.minimum_delay_millis.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "storagePath" => {
            config.storage_path = if value.is_empty() {
                None
            } else {
                Some(value.into())
            };
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.tickMillis" => {
            config.ui.tick_millis = value.parse().context("ui.tickMillis must be a number")?;
        }
        "ui.scrollDebounceMillis" => {
            config.ui.scroll_debounce_millis = value
                .parse()
                .context("ui.scrollDebounceMillis must be a number")?;
        }
        "network.timeServiceUrl" => {
            config.network.time_service_url = value.to_string();
        }
        "network.probeUrl" => {
            config.network.probe_url = value.to_string();
        }
        "network.probeIntervalSecs" => {
            config.network.probe_interval_secs = value
                .parse()
                .context("network.probeIntervalSecs must be a number")?;
        }
        "network.timeoutSecs" => {
            config.network.timeout_secs = value
                .parse()
                .context("network.timeoutSecs must be a number")?;
        }
        "profile.minimumDelayMillis" => {
            config.profile.minimum_delay_millis = value
                .parse()
                .context("profile.minimumDelayMillis must be a number")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

/// Keys accepted by [`get_config_value`] and [`set_config_value`]
pub const CONFIG_KEYS: &[&str] = &[
    "storagePath",
    "ui.enableMouse",
    "ui.tickMillis",
    "ui.scrollDebounceMillis",
    "network.timeServiceUrl",
    "network.probeUrl",
    "network.probeIntervalSecs",
    "network.timeoutSecs",
    "profile.minimumDelayMillis",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_round_trips() {
        let mut config = AppConfig::default();
        for key in CONFIG_KEYS {
            let value = get_config_value(&config, key).unwrap();
            set_config_value(&mut config, key, &value).unwrap();
        }
    }

    #[test]
    fn test_set_rejects_bad_numbers() {
        let mut config = AppConfig::default();
        let err = set_config_value(&mut config, "ui.tickMillis", "fast").unwrap_err();
        assert!(err.to_string().contains("must be a number"));
        assert!(set_config_value(&mut config, "ui.colour", "x").is_err());
    }

    #[test]
    fn test_clear_storage_path() {
        let mut config = AppConfig::default();
        set_config_value(&mut config, "storagePath", "/tmp/x.json").unwrap();
        assert_eq!(
            get_config_value(&config, "storagePath").unwrap(),
            "/tmp/x.json"
        );
        set_config_value(&mut config, "storagePath", "").unwrap();
        assert!(config.storage_path.is_none());
    }
}
