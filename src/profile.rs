//! Signed-in user profile

use crate::storage::{KeyValueStore, StorageResult, USER_DATA_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, alias = "avatarUrl")]
    pub avatar: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            avatar: None,
        }
    }
}

impl UserProfile {
    /// Up to two initials for the avatar placeholder
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Reads and writes the profile under `userData`
#[derive(Clone)]
pub struct ProfileStore {
    storage: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Stored profile, or the placeholder profile when missing or malformed
    pub fn load(&self) -> UserProfile {
        match self.storage.get(USER_DATA_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Stored profile is malformed, using placeholder: {}", e);
                UserProfile::default()
            }),
            Ok(None) => UserProfile::default(),
            Err(e) => {
                tracing::warn!("Failed to read profile: {}", e);
                UserProfile::default()
            }
        }
    }

    pub fn save(&self, profile: &UserProfile) -> StorageResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.storage.set(USER_DATA_KEY, &raw)
    }
}

/// Loads the profile while keeping a loading indicator up for a minimum time
pub struct ProfileLoader {
    store: ProfileStore,
    minimum_delay: Duration,
}

impl ProfileLoader {
    pub fn new(store: ProfileStore, minimum_delay: Duration) -> Self {
        Self {
            store,
            minimum_delay,
        }
    }

    pub async fn fetch(&self) -> UserProfile {
        let started = Instant::now();
        let profile = self.store.load();
        tokio::time::sleep_until(started + self.minimum_delay).await;
        profile
    }
}
