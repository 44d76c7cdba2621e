//! Preference record schema
//!
//! Defines the single persisted settings record. Enumerated settings decode
//! leniently: an unrecognised tag becomes the default value instead of
//! failing the whole record.

use super::countries;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declares a string-tagged settings enum with lenient decoding
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every value, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire tag of this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            /// Parse a wire tag, `None` if unrecognised
            pub fn parse(tag: &str) -> Option<Self> {
                match tag.trim() {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                $name::parse(&tag).unwrap_or_default()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// The user's theme choice
    pub enum ThemeChoice {
        Light => "light",
        Dark => "dark",
        /// Follow the OS colour scheme
        Auto => "auto",
    }
    default = Auto;
}

tag_enum! {
    /// Date rendering format
    pub enum DateFormat {
        DayMonthYearDash => "DD-MM-YYYY",
        DayMonthShortYear => "DD/MM/YY",
        DayMonthYearSlash => "DD/MM/YYYY",
        MonthDayYear => "MM/DD/YYYY",
        Iso => "YYYY-MM-DD",
        DayMonthName => "DD MMM YYYY",
        MonthNameDay => "MMM DD, YYYY",
    }
    default = DayMonthYearDash;
}

tag_enum! {
    /// Clock rendering format
    pub enum TimeFormat {
        TwelveHour => "12h",
        TwentyFourHour => "24h",
    }
    default = TwelveHour;
}

tag_enum! {
    /// Span of the dashboard sales chart
    pub enum TimeRange {
        Week => "7d",
        Month => "1m",
        Quarter => "3m",
        Year => "1y",
    }
    default = Week;
}

impl TimeRange {
    /// Number of days covered by this range
    pub fn days(&self) -> u32 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "Last 7 days",
            TimeRange::Month => "Last month",
            TimeRange::Quarter => "Last 3 months",
            TimeRange::Year => "Last year",
        }
    }
}

/// A built-in invoice field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinField {
    pub key: &'static str,
    pub label: &'static str,
    pub enabled_by_default: bool,
}

/// Built-in invoice fields; always present in [`Preferences::invoice_fields`]
pub const BUILTIN_INVOICE_FIELDS: &[BuiltinField] = &[
    BuiltinField {
        key: "name",
        label: "Name",
        enabled_by_default: true,
    },
    BuiltinField {
        key: "price",
        label: "Price",
        enabled_by_default: true,
    },
    BuiltinField {
        key: "weight",
        label: "Weight",
        enabled_by_default: false,
    },
    BuiltinField {
        key: "quantity",
        label: "Quantity",
        enabled_by_default: false,
    },
];

/// Look up a built-in field by key
pub fn builtin_field(key: &str) -> Option<&'static BuiltinField> {
    BUILTIN_INVOICE_FIELDS.iter().find(|f| f.key == key)
}

/// The persisted preference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Country code from the catalog
    #[serde(default = "default_country")]
    pub country: String,

    /// ISO currency code used for money values
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub theme: ThemeChoice,

    #[serde(default)]
    pub date_format: DateFormat,

    #[serde(default)]
    pub time_format: TimeFormat,

    /// Default span of the dashboard chart
    #[serde(default, rename = "timeRange")]
    pub time_range_default: TimeRange,

    /// Default upper bound of the chart's value axis
    #[serde(default = "default_axis_range", rename = "axisRange")]
    pub axis_range_default: String,

    /// Invoice field key → enabled
    #[serde(default = "default_invoice_fields")]
    pub invoice_fields: BTreeMap<String, bool>,

    /// Display labels of user-added invoice fields, keyed like `invoice_fields`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_field_labels: BTreeMap<String, String>,
}

/// JSON keys of the record, used to reject unknown keys on update
pub const PREFERENCE_KEYS: &[&str] = &[
    "country",
    "currency",
    "theme",
    "dateFormat",
    "timeFormat",
    "timeRange",
    "axisRange",
    "invoiceFields",
    "customFieldLabels",
];

/// Older key spellings still found in stored records
pub const LEGACY_KEYS: &[(&str, &str)] = &[
    ("currencyCode", "currency"),
    ("defaultTimeRange", "timeRange"),
    ("defaultAxisRange", "axisRange"),
];

fn default_country() -> String {
    countries::DEFAULT_COUNTRY_CODE.to_string()
}

fn default_currency() -> String {
    countries::default_country().currency_code.to_string()
}

fn default_axis_range() -> String {
    "1000".to_string()
}

fn default_invoice_fields() -> BTreeMap<String, bool> {
    BUILTIN_INVOICE_FIELDS
        .iter()
        .map(|f| (f.key.to_string(), f.enabled_by_default))
        .collect()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            country: default_country(),
            currency: default_currency(),
            theme: ThemeChoice::default(),
            date_format: DateFormat::default(),
            time_format: TimeFormat::default(),
            time_range_default: TimeRange::default(),
            axis_range_default: default_axis_range(),
            invoice_fields: default_invoice_fields(),
            custom_field_labels: BTreeMap::new(),
        }
    }
}

impl Preferences {
    /// Enforce the record invariants in place
    ///
    /// - the country is a catalog entry (unknown → default country)
    /// - the currency is non-empty (empty → the country's currency)
    /// - every built-in invoice field is present
    /// - every custom label refers to an existing field
    pub fn normalize(&mut self) {
        match countries::find(&self.country) {
            Some(c) => self.country = c.code.to_string(),
            None => {
                tracing::warn!(
                    "Unknown country '{}' in preferences, using '{}'",
                    self.country,
                    countries::DEFAULT_COUNTRY_CODE
                );
                self.country = default_country();
            }
        }

        if self.currency.trim().is_empty() {
            self.currency = self.country_entry().currency_code.to_string();
        }

        for field in BUILTIN_INVOICE_FIELDS {
            self.invoice_fields
                .entry(field.key.to_string())
                .or_insert(field.enabled_by_default);
        }

        let fields = &self.invoice_fields;
        self.custom_field_labels
            .retain(|key, _| fields.contains_key(key));
    }

    /// Catalog entry of the selected country
    pub fn country_entry(&self) -> &'static countries::Country {
        countries::find(&self.country).unwrap_or_else(countries::default_country)
    }

    /// Whether an invoice field is enabled (unknown fields are disabled)
    pub fn is_invoice_field_enabled(&self, key: &str) -> bool {
        self.invoice_fields.get(key).copied().unwrap_or(false)
    }

    /// Display label of an invoice field
    pub fn field_label(&self, key: &str) -> String {
        if let Some(builtin) = builtin_field(key) {
            return builtin.label.to_string();
        }
        self.custom_field_labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.trim_start_matches("custom-").to_string())
    }

    /// Invoice field keys in display order: built-ins first, then custom fields
    pub fn ordered_field_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = BUILTIN_INVOICE_FIELDS
            .iter()
            .map(|f| f.key.to_string())
            .collect();
        keys.extend(
            self.invoice_fields
                .keys()
                .filter(|k| builtin_field(k).is_none())
                .cloned(),
        );
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.country, "in");
        assert_eq!(prefs.currency, "INR");
        assert_eq!(prefs.theme, ThemeChoice::Auto);
        assert_eq!(prefs.date_format, DateFormat::DayMonthYearDash);
        assert_eq!(prefs.time_format, TimeFormat::TwelveHour);
        assert_eq!(prefs.time_range_default, TimeRange::Week);
        assert!(prefs.is_invoice_field_enabled("name"));
        assert!(prefs.is_invoice_field_enabled("price"));
        assert!(!prefs.is_invoice_field_enabled("weight"));
        assert!(!prefs.is_invoice_field_enabled("quantity"));
    }

    #[test]
    fn test_unknown_tags_decode_to_default() {
        let json = r#"{"theme":"purple","dateFormat":"YY.MM","timeFormat":"36h"}"#;
        let prefs: Preferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.theme, ThemeChoice::Auto);
        assert_eq!(prefs.date_format, DateFormat::default());
        assert_eq!(prefs.time_format, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let json = serde_json::to_string(&Preferences::default()).unwrap();
        assert!(json.contains(r#""timeRange":"7d""#));
        assert!(json.contains(r#""axisRange":"1000""#));
        assert!(json.contains(r#""dateFormat":"DD-MM-YYYY""#));
        assert!(!json.contains("customFieldLabels"));
    }

    #[test]
    fn test_normalize_restores_invariants() {
        let mut prefs = Preferences {
            country: "ZZ".to_string(),
            currency: String::new(),
            invoice_fields: BTreeMap::from([("price".to_string(), false)]),
            custom_field_labels: BTreeMap::from([(
                "custom-ghost".to_string(),
                "Ghost".to_string(),
            )]),
            ..Preferences::default()
        };
        prefs.normalize();

        assert_eq!(prefs.country, "in");
        assert_eq!(prefs.currency, "INR");
        assert_eq!(prefs.invoice_fields.len(), 4);
        assert!(!prefs.is_invoice_field_enabled("price"));
        assert!(prefs.is_invoice_field_enabled("name"));
        assert!(prefs.custom_field_labels.is_empty());
    }

    #[test]
    fn test_normalize_canonicalizes_country_case() {
        let mut prefs = Preferences {
            country: "US".to_string(),
            ..Preferences::default()
        };
        prefs.normalize();
        assert_eq!(prefs.country, "us");
    }

    #[test]
    fn test_ordered_field_keys() {
        let mut prefs = Preferences::default();
        prefs.invoice_fields.insert("custom-tax".to_string(), true);
        prefs
            .custom_field_labels
            .insert("custom-tax".to_string(), "Tax".to_string());

        assert_eq!(
            prefs.ordered_field_keys(),
            vec!["name", "price", "weight", "quantity", "custom-tax"]
        );
        assert_eq!(prefs.field_label("custom-tax"), "Tax");
        assert_eq!(prefs.field_label("weight"), "Weight");
    }

    #[test]
    fn test_time_range_days() {
        assert_eq!(TimeRange::Week.days(), 7);
        assert_eq!(TimeRange::parse("1y").map(|r| r.days()), Some(365));
        assert_eq!(TimeRange::parse("2w"), None);
    }
}
