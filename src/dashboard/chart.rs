//! Sales chart model
//!
//! The dashboard builds a [`ChartModel`] and hands it to a [`ChartRenderer`];
//! the terminal UI draws it with a ratatui `Chart`.

use crate::locale::{group_thousands, month_name};
use crate::prefs::TimeRange;
use crate::theme::ColorScheme;
use chrono::{Datelike, Duration, NaiveDate};

/// Daily sales totals with their axis labels
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SalesSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// The `days` dates ending at `today`, oldest first
pub fn series_days(days: u32, today: NaiveDate) -> Vec<NaiveDate> {
    (0..days as i64)
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

/// X-axis label of `date` in a chart spanning `days`
///
/// A week shows weekday names, up to a month shows the day of month, longer
/// spans show `Mar 7`.
pub fn day_label(date: NaiveDate, days: u32) -> String {
    if days == 7 {
        date.format("%a").to_string()
    } else if days <= 30 {
        date.day().to_string()
    } else {
        format!("{} {}", month_name(date.month()), date.day())
    }
}

pub fn range_labels(range: TimeRange, today: NaiveDate) -> Vec<String> {
    let days = range.days();
    series_days(days, today)
        .into_iter()
        .map(|d| day_label(d, days))
        .collect()
}

/// Colors of the chart for one applied scheme, as CSS color strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub line: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
    pub background: &'static str,
}

impl ChartPalette {
    pub const LIGHT: ChartPalette = ChartPalette {
        line: "#000000",
        text: "#171717",
        grid: "rgba(0, 0, 0, 0.1)",
        background: "#ffffff",
    };

    pub const DARK: ChartPalette = ChartPalette {
        line: "#fafafa",
        text: "#fafafa",
        grid: "rgba(255, 255, 255, 0.1)",
        background: "#0a0a0a",
    };

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self::DARK,
            ColorScheme::Light => Self::LIGHT,
        }
    }
}

/// Everything a renderer needs to draw the sales chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub range: TimeRange,
    pub series: SalesSeries,
    /// Upper bound of the value axis
    pub axis_max: f64,
    /// Prefix of value-axis tick labels
    pub currency_symbol: &'static str,
    pub palette: ChartPalette,
}

impl ChartModel {
    /// Tick label for a value-axis position, e.g. `₹12,500`
    pub fn tick_label(&self, value: f64) -> String {
        let whole = if value.is_finite() && value > 0.0 {
            value.round() as u128
        } else {
            0
        };
        format!("{}{}", self.currency_symbol, group_thousands(whole))
    }

    /// Evenly spaced value-axis ticks from zero to `axis_max`
    pub fn ticks(&self, count: usize) -> Vec<String> {
        let count = count.max(2);
        (0..count)
            .map(|i| self.tick_label(self.axis_max * i as f64 / (count - 1) as f64))
            .collect()
    }
}

/// External charting collaborator
#[cfg_attr(test, mockall::automock)]
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartModel);
}
