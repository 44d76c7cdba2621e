//! Custom invoice field naming rules

/// Invoice field errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Field name must not be empty")]
    Empty,

    #[error("A field named \"{0}\" already exists")]
    Duplicate(String),

    #[error("Unknown invoice field: {0}")]
    UnknownField(String),

    #[error("No field removal is pending")]
    NothingPending,
}

/// Prefix of every custom field key
pub const CUSTOM_FIELD_PREFIX: &str = "custom-";

/// Normalize a field name into a slug: trimmed, lowercased, whitespace runs → `-`
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Storage key of a custom field named `name`
pub fn custom_field_key(name: &str) -> String {
    format!("{}{}", CUSTOM_FIELD_PREFIX, slugify(name))
}

pub fn is_custom_key(key: &str) -> bool {
    key.starts_with(CUSTOM_FIELD_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Tax   Rate "), "tax-rate");
        assert_eq!(slugify("HSN"), "hsn");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_custom_field_key() {
        assert_eq!(custom_field_key("Discount Code"), "custom-discount-code");
        assert!(is_custom_key("custom-discount-code"));
        assert!(!is_custom_key("price"));
    }
}
