//! User preferences
//!
//! The persisted settings record, the country catalog it draws from, and the
//! store that reads and writes it.

pub mod countries;
pub mod schema;
pub mod store;

pub use countries::{COUNTRIES, Country};
pub use schema::{
    BUILTIN_INVOICE_FIELDS, DateFormat, Preferences, ThemeChoice, TimeFormat, TimeRange,
};
pub use store::{PreferenceError, PreferenceResult, PreferenceStore};

/// Get a preference value by key, rendered for display
///
/// Supports `invoiceFields.<key>` for individual invoice fields.
pub fn get_preference_value(prefs: &Preferences, key: &str) -> anyhow::Result<String> {
    if let Some(field) = key.strip_prefix("invoiceFields.") {
        return prefs
            .invoice_fields
            .get(field)
            .map(|enabled| enabled.to_string())
            .ok_or_else(|| anyhow::anyhow!("Unknown invoice field: {}", field));
    }

    match key {
        "country" => Ok(prefs.country.clone()),
        "currency" => Ok(prefs.currency.clone()),
        "theme" => Ok(prefs.theme.to_string()),
        "dateFormat" => Ok(prefs.date_format.to_string()),
        "timeFormat" => Ok(prefs.time_format.to_string()),
        "timeRange" => Ok(prefs.time_range_default.to_string()),
        "axisRange" => Ok(prefs.axis_range_default.clone()),
        "invoiceFields" => serde_json::to_string(&prefs.invoice_fields)
            .map_err(|e| anyhow::anyhow!("Failed to serialize invoiceFields: {}", e)),
        _ => Err(anyhow::anyhow!("Unknown preference key: {}", key)),
    }
}

/// Set a preference value by key from its textual form and persist it
///
/// Enumerated settings are validated strictly here, unlike lenient decoding of
/// stored records.
pub fn set_preference_value(
    store: &PreferenceStore,
    key: &str,
    value: &str,
) -> anyhow::Result<Preferences> {
    use anyhow::Context;
    use serde_json::Value;

    if let Some(field) = key.strip_prefix("invoiceFields.") {
        let enabled: bool = value
            .parse()
            .with_context(|| format!("{} must be 'true' or 'false'", key))?;
        let mut prefs = store.load();
        if !prefs.invoice_fields.contains_key(field) {
            anyhow::bail!("Unknown invoice field: {}", field);
        }
        prefs.invoice_fields.insert(field.to_string(), enabled);
        store.save(&prefs)?;
        return Ok(prefs);
    }

    let json = match key {
        "country" => {
            let country = countries::find(value)
                .with_context(|| format!("Unknown country code: {}", value))?;
            Value::String(country.code.to_string())
        }
        "currency" => Value::String(value.trim().to_uppercase()),
        "theme" => {
            ThemeChoice::parse(value).context("theme must be 'light', 'dark' or 'auto'")?;
            Value::String(value.trim().to_string())
        }
        "dateFormat" => {
            DateFormat::parse(value).with_context(|| {
                format!(
                    "dateFormat must be one of: {}",
                    tag_list(DateFormat::ALL.iter().map(|f| f.as_str()))
                )
            })?;
            Value::String(value.trim().to_string())
        }
        "timeFormat" => {
            TimeFormat::parse(value).context("timeFormat must be '12h' or '24h'")?;
            Value::String(value.trim().to_string())
        }
        "timeRange" => {
            TimeRange::parse(value).with_context(|| {
                format!(
                    "timeRange must be one of: {}",
                    tag_list(TimeRange::ALL.iter().map(|r| r.as_str()))
                )
            })?;
            Value::String(value.trim().to_string())
        }
        "axisRange" => {
            value
                .trim()
                .parse::<u64>()
                .context("axisRange must be a number")?;
            Value::String(value.trim().to_string())
        }
        _ => anyhow::bail!("Unknown preference key: {}", key),
    };

    store
        .update(key, json)
        .with_context(|| format!("Failed to set {} = {}", key, value))
}

fn tag_list<'a>(tags: impl Iterator<Item = &'a str>) -> String {
    tags.collect::<Vec<_>>().join(", ")
}
