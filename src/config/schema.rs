//! Configuration schema definitions
//!
//! Application settings that live outside the preference record: where the
//! store is kept, terminal UI behaviour and the live-data services.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Storage file; defaults to `<data_dir>/storage.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub profile: ProfileConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse support
    #[serde(default = "default_false")]
    pub enable_mouse: bool,

    /// Event poll interval of the terminal UI
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// Quiet period before a scroll position is saved
    #[serde(default = "default_scroll_debounce_millis")]
    pub scroll_debounce_millis: u64,
}

/// Live-data services
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// World-time JSON endpoint
    #[serde(default = "default_time_service_url")]
    pub time_service_url: String,

    /// URL probed with HEAD requests to detect connectivity
    #[serde(default = "default_probe_url")]
    pub probe_url: String,

    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfig {
    /// Minimum time the profile loading indicator stays visible
    #[serde(default = "default_minimum_delay_millis")]
    pub minimum_delay_millis: u64,
}

fn default_false() -> bool {
    false
}

fn default_tick_millis() -> u64 {
    250
}

fn default_scroll_debounce_millis() -> u64 {
    300
}

fn default_time_service_url() -> String {
    "https://worldtimeapi.org/api/ip".to_string()
}

fn default_probe_url() -> String {
    "https://httpbin.org/status/200".to_string()
}

fn default_probe_interval_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_minimum_delay_millis() -> u64 {
    1000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_mouse: default_false(),
            tick_millis: default_tick_millis(),
            scroll_debounce_millis: default_scroll_debounce_millis(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            time_service_url: default_time_service_url(),
            probe_url: default_probe_url(),
            probe_interval_secs: default_probe_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            minimum_delay_millis: default_minimum_delay_millis(),
        }
    }
}

impl AppConfig {
    /// Resolved storage file path
    pub fn storage_file(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(super::paths::storage_path)
    }
}
