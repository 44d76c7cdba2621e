//! Wiring shared by the CLI and the terminal UI

use crate::config::AppConfig;
use crate::prefs::PreferenceStore;
use crate::profile::ProfileStore;
use crate::scroll::ScrollMemory;
use crate::storage::{FileStore, KeyValueStore};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Configuration plus the stores built on one storage backend
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub storage: Arc<dyn KeyValueStore>,
    pub prefs: PreferenceStore,
}

impl AppContext {
    /// Open the file-backed store named by `config`
    pub fn open(config: AppConfig) -> Result<Self> {
        let path = config.storage_file();
        let storage = FileStore::open(&path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))?;
        tracing::debug!("Using storage file {}", path.display());
        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    pub fn with_storage(config: AppConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let prefs = PreferenceStore::new(Arc::clone(&storage));
        Self {
            config,
            storage,
            prefs,
        }
    }

    pub fn profiles(&self) -> ProfileStore {
        ProfileStore::new(Arc::clone(&self.storage))
    }

    pub fn scroll_memory(&self) -> ScrollMemory {
        ScrollMemory::new(Arc::clone(&self.storage))
    }
}
