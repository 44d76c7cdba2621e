//! Version command handler

use crate::config::{AppConfig, paths};

/// Display version information and the resolved file locations
pub fn display_version(config: &AppConfig) {
    println!("ebillr {}", env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("  License: {}", env!("CARGO_PKG_LICENSE"));
    println!("  Config:  {}", paths::root_config_path().display());
    println!("  Storage: {}", config.storage_file().display());
}
