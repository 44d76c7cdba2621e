//! Country catalog
//!
//! The fixed list of countries a user can pick, with the currency each one
//! implies. India is the default entry.

use serde::Serialize;

/// One selectable country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: &'static str,
    pub display_name: &'static str,
    pub currency_code: &'static str,
    pub currency_symbol: &'static str,
    /// Representative offset used when the time service is unreachable
    pub utc_offset_minutes: i32,
}

/// Code of the default country
pub const DEFAULT_COUNTRY_CODE: &str = "in";

/// Symbol used when a country code is not in the catalog
pub const FALLBACK_CURRENCY_SYMBOL: &str = "₹";

const fn country(
    code: &'static str,
    display_name: &'static str,
    currency_code: &'static str,
    currency_symbol: &'static str,
    utc_offset_minutes: i32,
) -> Country {
    Country {
        code,
        display_name,
        currency_code,
        currency_symbol,
        utc_offset_minutes,
    }
}

/// All selectable countries, in display order
pub const COUNTRIES: &[Country] = &[
    country("in", "India", "INR", "₹", 330),
    country("us", "United States", "USD", "$", -300),
    country("gb", "United Kingdom", "GBP", "£", 0),
    country("ca", "Canada", "CAD", "C$", -300),
    country("au", "Australia", "AUD", "A$", 600),
    country("de", "Germany", "EUR", "€", 60),
    country("fr", "France", "EUR", "€", 60),
    country("jp", "Japan", "JPY", "¥", 540),
    country("cn", "China", "CNY", "CN¥", 480),
    country("br", "Brazil", "BRL", "R$", -180),
    country("mx", "Mexico", "MXN", "MX$", -360),
    country("ru", "Russia", "RUB", "₽", 180),
    country("kr", "South Korea", "KRW", "₩", 540),
    country("sa", "Saudi Arabia", "SAR", "ر.س", 180),
    country("ae", "United Arab Emirates", "AED", "د.إ", 240),
    country("sg", "Singapore", "SGD", "S$", 480),
    country("ch", "Switzerland", "CHF", "CHF", 60),
    country("se", "Sweden", "SEK", "SEK", 60),
    country("no", "Norway", "NOK", "NOK", 60),
    country("dk", "Denmark", "DKK", "DKK", 60),
];

/// Look up a country by code (case-insensitive)
pub fn find(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// The default catalog entry (India)
pub fn default_country() -> &'static Country {
    // First entry is the default; kept in sync with DEFAULT_COUNTRY_CODE by a test
    &COUNTRIES[0]
}

/// Symbol for a country code, falling back to [`FALLBACK_CURRENCY_SYMBOL`]
pub fn currency_symbol_for_country(code: &str) -> &'static str {
    find(code)
        .map(|c| c.currency_symbol)
        .unwrap_or(FALLBACK_CURRENCY_SYMBOL)
}

/// Symbol for an ISO currency code, if any catalog country uses it
pub fn symbol_for_currency(currency_code: &str) -> Option<&'static str> {
    let currency_code = currency_code.trim();
    COUNTRIES
        .iter()
        .find(|c| c.currency_code.eq_ignore_ascii_case(currency_code))
        .map(|c| c.currency_symbol)
}

/// Currency option label shown next to a country, e.g. `INR (₹)`
pub fn currency_option_label(country: &Country) -> String {
    format!("{} ({})", country.currency_code, country.currency_symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_country_is_india() {
        let c = default_country();
        assert_eq!(c.code, DEFAULT_COUNTRY_CODE);
        assert_eq!(c.currency_code, "INR");
        assert_eq!(c.currency_symbol, FALLBACK_CURRENCY_SYMBOL);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("US").map(|c| c.currency_code), Some("USD"));
        assert_eq!(find(" gb ").map(|c| c.currency_code), Some("GBP"));
        assert!(find("zz").is_none());
    }

    #[test]
    fn test_unknown_country_symbol_falls_back() {
        assert_eq!(currency_symbol_for_country("zz"), "₹");
        assert_eq!(currency_symbol_for_country("jp"), "¥");
    }

    #[test]
    fn test_symbol_for_currency() {
        assert_eq!(symbol_for_currency("EUR"), Some("€"));
        assert_eq!(symbol_for_currency("usd"), Some("$"));
        assert_eq!(symbol_for_currency("XYZ"), None);
    }

    #[test]
    fn test_each_currency_has_its_own_symbol() {
        let mut seen: Vec<(&str, &str)> = Vec::new();
        for c in COUNTRIES {
            if let Some((code, _)) = seen.iter().find(|(_, sym)| *sym == c.currency_symbol) {
                assert_eq!(*code, c.currency_code, "{}", c.currency_symbol);
            } else {
                seen.push((c.currency_code, c.currency_symbol));
            }
        }
        assert_eq!(symbol_for_currency("SGD"), Some("S$"));
        assert_eq!(symbol_for_currency("MXN"), Some("MX$"));
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = COUNTRIES.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn test_currency_option_label() {
        assert_eq!(currency_option_label(default_country()), "INR (₹)");
    }
}
