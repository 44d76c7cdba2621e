//! Preference store
//!
//! Owns the single persisted preference record. The record is always read and
//! written whole; `update` is a plain read-modify-write with last-writer-wins
//! semantics.

use super::countries;
use super::schema::{
    DateFormat, LEGACY_KEYS, PREFERENCE_KEYS, Preferences, ThemeChoice, TimeFormat, TimeRange,
};
use crate::observer::{Listeners, Subscription};
use crate::storage::{KeyValueStore, SETTINGS_KEY, StorageError};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Preference store errors
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Unknown preference key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for preference operations
pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Handle to the persisted preference record
///
/// Cheap to clone; clones share the backing storage and the change
/// subscribers.
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStore>,
    listeners: Listeners<Preferences>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            listeners: Listeners::new(),
        }
    }

    /// The storage this store reads from and writes to
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.storage)
    }

    /// Load the record
    ///
    /// Missing or malformed data yields the defaults. Stored keys are
    /// shallow-merged over the defaults one at a time; a key whose value does
    /// not fit the schema is dropped and keeps its default.
    pub fn load(&self) -> Preferences {
        let raw = match self.storage.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Preferences::default(),
            Err(e) => {
                tracing::warn!("Failed to read preferences, using defaults: {}", e);
                return Preferences::default();
            }
        };

        let stored = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::warn!(
                    "Stored preferences are not a JSON object ({}), using defaults",
                    json_kind(&other)
                );
                return Preferences::default();
            }
            Err(e) => {
                tracing::warn!("Stored preferences are malformed, using defaults: {}", e);
                return Preferences::default();
            }
        };

        let mut prefs = merge_over_defaults(stored);
        prefs.normalize();
        prefs
    }

    /// Replace the stored record with `prefs`
    pub fn save(&self, prefs: &Preferences) -> PreferenceResult<()> {
        let json = serde_json::to_string(prefs)?;
        self.storage.set(SETTINGS_KEY, &json)?;
        tracing::debug!("Preferences saved");
        self.listeners.notify(prefs);
        Ok(())
    }

    /// Load, set one key, save, and return the resulting record
    ///
    /// `key` uses the JSON name (`theme`, `dateFormat`, ...).
    pub fn update(&self, key: &str, value: Value) -> PreferenceResult<Preferences> {
        let key = canonical_key(key);
        if !PREFERENCE_KEYS.contains(&key) {
            return Err(PreferenceError::UnknownKey(key.to_string()));
        }
        check_tag(key, &value)?;

        let current = self.load();
        let mut map = match serde_json::to_value(&current)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        map.insert(key.to_string(), value);

        let parsed = serde_json::from_value::<Preferences>(Value::Object(map));
        let mut updated = parsed.map_err(|e| PreferenceError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        updated.normalize();

        self.save(&updated)?;
        Ok(updated)
    }

    /// Read one key of the record as JSON
    pub fn get(&self, key: &str) -> Option<Value> {
        let key = canonical_key(key);
        match serde_json::to_value(self.load()) {
            Ok(Value::Object(mut map)) => map.remove(key),
            _ => None,
        }
    }

    /// Persist a new theme choice
    pub fn set_theme(&self, choice: ThemeChoice) -> PreferenceResult<Preferences> {
        self.update("theme", Value::String(choice.as_str().to_string()))
    }

    /// Currency symbol of the selected country
    pub fn currency_symbol(&self) -> &'static str {
        countries::currency_symbol_for_country(&self.load().country)
    }

    /// Whether an invoice field is enabled
    pub fn is_invoice_field_enabled(&self, key: &str) -> bool {
        self.load().is_invoice_field_enabled(key)
    }

    /// Subscribe to saved records
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&Preferences) + Send + 'static,
    {
        self.listeners.subscribe(callback)
    }
}

/// Reject tags that would otherwise decode leniently to a default
fn check_tag(key: &str, value: &Value) -> PreferenceResult<()> {
    let known: fn(&str) -> bool = match key {
        "country" => |tag: &str| countries::find(tag).is_some(),
        "theme" => |tag: &str| ThemeChoice::parse(tag).is_some(),
        "dateFormat" => |tag: &str| DateFormat::parse(tag).is_some(),
        "timeFormat" => |tag: &str| TimeFormat::parse(tag).is_some(),
        "timeRange" => |tag: &str| TimeRange::parse(tag).is_some(),
        _ => return Ok(()),
    };

    match value.as_str() {
        Some(tag) if known(tag) => Ok(()),
        _ => Err(PreferenceError::InvalidValue {
            key: key.to_string(),
            reason: format!("unrecognised value {}", value),
        }),
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

fn canonical_key(key: &str) -> &str {
    LEGACY_KEYS
        .iter()
        .find(|(legacy, _)| *legacy == key)
        .map(|(_, current)| *current)
        .unwrap_or(key)
}

fn merge_over_defaults(stored: Map<String, Value>) -> Preferences {
    let mut merged = match serde_json::to_value(Preferences::default()) {
        Ok(Value::Object(map)) => map,
        _ => return Preferences::default(),
    };

    for (key, value) in stored {
        let key = canonical_key(&key).to_string();
        if !PREFERENCE_KEYS.contains(&key.as_str()) {
            tracing::debug!("Ignoring unknown stored preference key '{}'", key);
            continue;
        }

        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value);
        match serde_json::from_value::<Preferences>(Value::Object(candidate.clone())) {
            Ok(_) => merged = candidate,
            Err(e) => {
                tracing::warn!("Dropping stored preference '{}': {}", key, e);
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;
    use std::sync::Mutex;

    fn store_with(raw: Option<&str>) -> PreferenceStore {
        let memory = match raw {
            Some(raw) => MemoryStore::with_entries([(SETTINGS_KEY, raw)]),
            None => MemoryStore::new(),
        };
        PreferenceStore::new(Arc::new(memory))
    }

    #[test]
    fn test_load_without_record_yields_defaults() {
        assert_eq!(store_with(None).load(), Preferences::default());
    }

    #[test]
    fn test_load_malformed_yields_defaults() {
        assert_eq!(store_with(Some("{oops")).load(), Preferences::default());
        assert_eq!(store_with(Some("[1,2]")).load(), Preferences::default());
    }

    #[test]
    fn test_partial_record_merges_over_defaults() {
        let prefs = store_with(Some(r#"{"theme":"dark"}"#)).load();
        assert_eq!(
            prefs,
            Preferences {
                theme: ThemeChoice::Dark,
                ..Preferences::default()
            }
        );
    }

    #[test]
    fn test_wrongly_typed_key_keeps_default() {
        let prefs = store_with(Some(r#"{"country":42,"theme":"light"}"#)).load();
        assert_eq!(prefs.country, "in");
        assert_eq!(prefs.theme, ThemeChoice::Light);
    }

    #[test]
    fn test_legacy_keys_are_understood() {
        let prefs =
            store_with(Some(r#"{"currencyCode":"USD","defaultAxisRange":"5000"}"#)).load();
        assert_eq!(prefs.currency, "USD");
        assert_eq!(prefs.axis_range_default, "5000");
    }

    #[test]
    fn test_stored_invoice_fields_keep_builtins() {
        let prefs = store_with(Some(r#"{"invoiceFields":{"custom-tax":true}}"#)).load();
        assert!(prefs.is_invoice_field_enabled("custom-tax"));
        assert!(prefs.is_invoice_field_enabled("name"));
        assert!(prefs.invoice_fields.contains_key("quantity"));
    }

    #[test]
    fn test_update_round_trips_through_storage() {
        let store = store_with(None);
        let updated = store.update("dateFormat", json!("DD/MM/YY")).unwrap();
        assert_eq!(updated.date_format, DateFormat::DayMonthShortYear);
        assert_eq!(store.load().date_format, DateFormat::DayMonthShortYear);
        assert_eq!(store.get("dateFormat"), Some(json!("DD/MM/YY")));
    }

    #[test]
    fn test_update_rejects_unknown_key() {
        let err = store_with(None).update("fontSize", json!(14)).unwrap_err();
        assert!(matches!(err, PreferenceError::UnknownKey(k) if k == "fontSize"));
    }

    #[test]
    fn test_update_rejects_mistyped_value() {
        let err = store_with(None)
            .update("invoiceFields", json!("all"))
            .unwrap_err();
        assert!(matches!(err, PreferenceError::InvalidValue { .. }));
    }

    #[test]
    fn test_update_rejects_unrecognised_tags() {
        let store = store_with(None);
        store.set_theme(ThemeChoice::Dark).unwrap();

        for (key, value) in [
            ("theme", json!("sepia")),
            ("theme", json!(true)),
            ("dateFormat", json!("YY.MM.DD")),
            ("timeFormat", json!("military")),
            ("defaultTimeRange", json!("2w")),
            ("country", json!("zz")),
        ] {
            let err = store.update(key, value).unwrap_err();
            assert!(matches!(err, PreferenceError::InvalidValue { .. }), "{key}");
        }

        assert_eq!(store.load().theme, ThemeChoice::Dark);
        let prefs = store.update("timeRange", json!("3m")).unwrap();
        assert_eq!(prefs.time_range_default, TimeRange::Quarter);
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(store_with(None).currency_symbol(), "₹");
        assert_eq!(
            store_with(Some(r#"{"country":"gb"}"#)).currency_symbol(),
            "£"
        );
        assert_eq!(
            store_with(Some(r#"{"country":"zz"}"#)).currency_symbol(),
            "₹"
        );
    }

    #[test]
    fn test_save_notifies_subscribers() {
        let store = store_with(None);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = store.on_change(move |prefs| {
            seen_clone.lock().unwrap().push(prefs.theme);
        });

        store.set_theme(ThemeChoice::Light).unwrap();
        store.set_theme(ThemeChoice::Dark).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![ThemeChoice::Light, ThemeChoice::Dark]
        );
    }
}
