//! Tests for loading, merging and persisting the preference record

use ebillr::prefs::countries::{self, FALLBACK_CURRENCY_SYMBOL};
use ebillr::prefs::{PreferenceError, PreferenceStore, Preferences, ThemeChoice, TimeRange};
use ebillr::storage::{FileStore, KeyValueStore, MemoryStore, SETTINGS_KEY};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn store_with(raw: &str) -> PreferenceStore {
    PreferenceStore::new(Arc::new(MemoryStore::with_entries([(SETTINGS_KEY, raw)])))
}

fn empty_store() -> PreferenceStore {
    PreferenceStore::new(Arc::new(MemoryStore::new()))
}

#[test]
fn test_defaults_when_nothing_is_stored() {
    let prefs = empty_store().load();
    assert_eq!(prefs, Preferences::default());

    insta::assert_json_snapshot!(prefs, @r#"
    {
      "country": "in",
      "currency": "INR",
      "theme": "auto",
      "dateFormat": "DD-MM-YYYY",
      "timeFormat": "12h",
      "timeRange": "7d",
      "axisRange": "1000",
      "invoiceFields": {
        "name": true,
        "price": true,
        "quantity": false,
        "weight": false
      }
    }
    "#);
}

#[test]
fn test_partial_record_is_merged_over_defaults() {
    let prefs = store_with(r#"{"theme":"dark"}"#).load();
    assert_eq!(
        prefs,
        Preferences {
            theme: ThemeChoice::Dark,
            ..Preferences::default()
        }
    );
}

#[test]
fn test_malformed_record_is_treated_as_absent() {
    assert_eq!(store_with("{not json").load(), Preferences::default());
    assert_eq!(store_with("[1, 2, 3]").load(), Preferences::default());
    assert_eq!(store_with("null").load(), Preferences::default());
}

#[test]
fn test_bad_values_keep_their_defaults() {
    let prefs = store_with(
        r#"{"country":"zz","theme":"sepia","timeRange":"1m","invoiceFields":"yes"}"#,
    )
    .load();

    assert_eq!(prefs.country, "in");
    assert_eq!(prefs.theme, ThemeChoice::Auto);
    assert_eq!(prefs.time_range_default, TimeRange::Month);
    assert_eq!(prefs.invoice_fields, Preferences::default().invoice_fields);
}

#[test]
fn test_builtin_fields_are_always_present() {
    let prefs = store_with(r#"{"invoiceFields":{"weight":true,"custom-gst-no":true}}"#).load();

    assert_eq!(prefs.invoice_fields.get("name"), Some(&true));
    assert_eq!(prefs.invoice_fields.get("price"), Some(&true));
    assert_eq!(prefs.invoice_fields.get("weight"), Some(&true));
    assert_eq!(prefs.invoice_fields.get("quantity"), Some(&false));
    assert_eq!(prefs.invoice_fields.get("custom-gst-no"), Some(&true));
}

#[test]
fn test_legacy_keys_are_read() {
    let prefs = store_with(r#"{"currencyCode":"USD","defaultTimeRange":"1y"}"#).load();
    assert_eq!(prefs.currency, "USD");
    assert_eq!(prefs.time_range_default, TimeRange::Year);
}

#[test]
fn test_update_returns_and_persists_full_record() {
    let store = empty_store();
    let updated = store.update("dateFormat", json!("DD/MM/YY")).unwrap();

    assert_eq!(updated.date_format.as_str(), "DD/MM/YY");
    assert_eq!(updated.country, "in");
    assert_eq!(store.load(), updated);
    assert_eq!(store.get("dateFormat"), Some(json!("DD/MM/YY")));
}

#[test]
fn test_update_rejects_unknown_keys() {
    let store = empty_store();
    let err = store.update("fontSize", json!(14)).unwrap_err();
    assert!(matches!(err, PreferenceError::UnknownKey(ref key) if key == "fontSize"));
    assert_eq!(store.load(), Preferences::default());
}

#[test]
fn test_save_replaces_the_record() {
    let store = empty_store();
    let mut prefs = Preferences::default();
    prefs.country = "us".to_string();
    prefs.currency = "USD".to_string();
    store.save(&prefs).unwrap();

    store.save(&Preferences::default()).unwrap();
    assert_eq!(store.load().country, "in");
}

#[test]
fn test_currency_symbol_follows_country() {
    let store = empty_store();
    assert_eq!(store.currency_symbol(), "₹");

    store.update("country", json!("gb")).unwrap();
    assert_eq!(store.currency_symbol(), "£");
}

#[test]
fn test_unknown_country_symbol_falls_back() {
    assert_eq!(
        countries::currency_symbol_for_country("zz"),
        FALLBACK_CURRENCY_SYMBOL
    );
    assert_eq!(
        countries::currency_symbol_for_country(""),
        FALLBACK_CURRENCY_SYMBOL
    );
    assert_eq!(store_with(r#"{"country":"zz"}"#).currency_symbol(), "₹");
}

#[test]
fn test_last_writer_wins() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let first = PreferenceStore::new(Arc::clone(&storage));
    let second = PreferenceStore::new(Arc::clone(&storage));

    first.update("theme", json!("dark")).unwrap();
    second.update("theme", json!("light")).unwrap();

    assert_eq!(first.load().theme, ThemeChoice::Light);
}

#[test]
fn test_subscribers_see_saved_records() {
    let store = empty_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = store.on_change(move |prefs| {
        sink.lock().unwrap().push(prefs.theme);
    });

    store.set_theme(ThemeChoice::Dark).unwrap();
    drop(subscription);
    store.set_theme(ThemeChoice::Light).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![ThemeChoice::Dark]);
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = PreferenceStore::new(Arc::new(FileStore::open(&path).unwrap()));
        store.update("timeFormat", json!("24h")).unwrap();
    }

    let reopened = PreferenceStore::new(Arc::new(FileStore::open(&path).unwrap()));
    assert_eq!(reopened.load().time_format.as_str(), "24h");
}
