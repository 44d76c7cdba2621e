//! Locale formatting
//!
//! Currency, date and time rendering driven by the stored preferences.
//!
//! Money is always shown in whole units (no minor units, whatever the
//! currency) with Indian digit grouping (`1,00,000`), matching the en-IN
//! number format the client has always used.

use crate::prefs::countries;
use crate::prefs::{DateFormat, Preferences, TimeFormat};
use chrono::{Datelike, Timelike};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats values according to a preference snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFormatter {
    currency: String,
    date_format: DateFormat,
    time_format: TimeFormat,
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::from_preferences(&Preferences::default())
    }
}

impl LocaleFormatter {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            currency: prefs.currency.clone(),
            date_format: prefs.date_format,
            time_format: prefs.time_format,
        }
    }

    /// Currency code used when none is passed explicitly
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Format `amount` as whole units of `currency` (or the preferred currency)
    pub fn format_currency(&self, amount: f64, currency: Option<&str>) -> String {
        format_currency(amount, currency.unwrap_or(&self.currency))
    }

    /// Format a date by tag; `None` uses the preferred format and an
    /// unrecognised tag falls back to `DD-MM-YYYY`
    pub fn format_date<D: Datelike>(&self, date: &D, tag: Option<&str>) -> String {
        let format = match tag {
            None => self.date_format,
            Some(tag) => DateFormat::parse(tag).unwrap_or_default(),
        };
        format_date(date, format)
    }

    /// Format a time by tag; `None` uses the preferred format, `"12h"` gives a
    /// 12-hour clock and any other tag a 24-hour clock
    pub fn format_time<T: Timelike>(&self, time: &T, tag: Option<&str>) -> String {
        let format = match tag {
            None => self.time_format,
            Some(tag) => match TimeFormat::parse(tag) {
                Some(TimeFormat::TwelveHour) => TimeFormat::TwelveHour,
                _ => TimeFormat::TwentyFourHour,
            },
        };
        format_time(time, format)
    }
}

/// Format `amount` as whole units of `currency_code`
///
/// Rounds half away from zero. Codes missing from the country catalog are
/// rendered as `CODE 1,234`.
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    let rounded = if amount.is_finite() {
        amount.round()
    } else {
        0.0
    };
    let negative = rounded < 0.0;
    let digits = group_indian(rounded.abs() as u128);

    let code = currency_code.trim().to_uppercase();
    let prefix = match countries::symbol_for_currency(&code) {
        // Alphabetic symbols (CHF, SEK) need a separating space
        Some(symbol) if symbol.ends_with(|c: char| c.is_ascii_alphabetic()) => {
            format!("{} ", symbol)
        }
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", code),
    };

    if negative {
        format!("-{}{}", prefix, digits)
    } else {
        format!("{}{}", prefix, digits)
    }
}

/// Group digits the Indian way: last three, then pairs (`12,34,567`)
pub fn group_indian(value: u128) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Group digits in thousands (`1,234,567`)
pub fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render `date` in `format`
pub fn format_date<D: Datelike>(date: &D, format: DateFormat) -> String {
    let day = format!("{:02}", date.day());
    let month = format!("{:02}", date.month());
    let year = date.year();
    let short_year = format!("{:02}", year.rem_euclid(100));
    let month_name = MONTH_NAMES[date.month0() as usize];

    match format {
        DateFormat::DayMonthYearDash => format!("{}-{}-{}", day, month, year),
        DateFormat::DayMonthShortYear => format!("{}/{}/{}", day, month, short_year),
        DateFormat::DayMonthYearSlash => format!("{}/{}/{}", day, month, year),
        DateFormat::MonthDayYear => format!("{}/{}/{}", month, day, year),
        DateFormat::Iso => format!("{}-{}-{}", year, month, day),
        DateFormat::DayMonthName => format!("{} {} {}", day, month_name, year),
        DateFormat::MonthNameDay => format!("{} {}, {}", month_name, day, year),
    }
}

/// Render `time` in `format`
pub fn format_time<T: Timelike>(time: &T, format: TimeFormat) -> String {
    let minutes = time.minute();
    match format {
        TimeFormat::TwelveHour => {
            let (is_pm, hour) = time.hour12();
            let meridiem = if is_pm { "PM" } else { "AM" };
            format!("{}:{:02} {}", hour, minutes, meridiem)
        }
        TimeFormat::TwentyFourHour => format!("{:02}:{:02}", time.hour(), minutes),
    }
}

/// Short month name (`Jan`..`Dec`) for a 1-based month
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}
