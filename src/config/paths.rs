//! Where EBillr keeps its files
//!
//! `config.yaml` lives in the config directory and the key-value store
//! (`storage.json`) in the data directory. Either directory can be pinned with
//! an environment variable. Otherwise Unix follows `XDG_CONFIG_HOME` /
//! `XDG_DATA_HOME` (falling back to `~/.config` and `~/.local/share`) and
//! Windows uses the roaming and local AppData folders.

use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "ebillr";

/// File name of the root configuration
pub const CONFIG_FILE: &str = "config.yaml";

/// File name of the default key-value store
pub const STORAGE_FILE: &str = "storage.json";

/// The directories EBillr writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    Config,
    Data,
}

impl AppDir {
    fn override_var(self) -> &'static str {
        match self {
            AppDir::Config => "EBILLR_CONFIG_DIR",
            AppDir::Data => "EBILLR_DATA_DIR",
        }
    }

    fn xdg_var(self) -> &'static str {
        match self {
            AppDir::Config => "XDG_CONFIG_HOME",
            AppDir::Data => "XDG_DATA_HOME",
        }
    }

    /// Base below the home directory when no XDG variable is set
    fn home_relative(self) -> &'static [&'static str] {
        match self {
            AppDir::Config => &[".config"],
            AppDir::Data => &[".local", "share"],
        }
    }

    fn known_folder(self) -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", APP_NAME)?;
        Some(match self {
            AppDir::Config => dirs.config_dir().to_path_buf(),
            AppDir::Data => dirs.data_dir().to_path_buf(),
        })
    }

    /// Resolve against the process environment
    pub fn path(self) -> PathBuf {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        self.resolve(|name| std::env::var(name).ok(), home)
    }

    fn resolve<F>(self, lookup: F, home: Option<PathBuf>) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(dir) = set(self.override_var()) {
            return PathBuf::from(dir);
        }

        if cfg!(windows) {
            if let Some(dir) = self.known_folder() {
                return dir;
            }
        } else if let Some(base) = set(self.xdg_var()) {
            return PathBuf::from(base).join(APP_NAME);
        }

        let mut base = home.unwrap_or_else(|| PathBuf::from("."));
        base.extend(self.home_relative());
        base.join(APP_NAME)
    }
}

pub fn config_dir() -> PathBuf {
    AppDir::Config.path()
}

pub fn data_dir() -> PathBuf {
    AppDir::Data.path()
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Default key-value storage file
pub fn storage_path() -> PathBuf {
    data_dir().join(STORAGE_FILE)
}

/// Create `path` and its parents; existing directories are fine
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}
