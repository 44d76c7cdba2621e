//! Client-local key-value storage
//!
//! Every persisted piece of client state (the preference record, the user
//! profile, the invoice ledger, transient scroll offsets) lives under a string
//! key in one of these stores. The file-backed store is the native stand-in for
//! browser local storage; the memory store backs tests and throwaway sessions.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

/// Storage key of the preference record
pub const SETTINGS_KEY: &str = "ebilir_settings";

/// Storage key of the signed-in user's profile
pub const USER_DATA_KEY: &str = "userData";

/// Storage key of the invoice ledger
pub const INVOICE_DATA_KEY: &str = "invoiceData";

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read storage file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode storage contents: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A flat string key-value store
///
/// Values are opaque strings; callers serialize JSON into them.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any prior value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key` (no-op when absent)
    fn remove(&self, key: &str) -> StorageResult<()>;
}
