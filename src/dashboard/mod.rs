//! Dashboard view
//!
//! Totals, recent invoices and the sales chart, all formatted through the
//! current preferences.

pub mod chart;
pub mod invoices;

pub use chart::{ChartModel, ChartPalette, ChartRenderer, SalesSeries, day_label, range_labels};
pub use invoices::{Invoice, InvoiceLedger};

use crate::locale::LocaleFormatter;
use crate::prefs::{PreferenceStore, TimeRange};
use crate::theme::ColorScheme;
use chrono::{DateTime, NaiveDate, Utc};

/// Number of invoices listed under "Recent invoices"
pub const RECENT_INVOICE_COUNT: usize = 5;

/// Fallback upper bound of the value axis
const DEFAULT_AXIS_MAX: f64 = 1000.0;

/// One row of the recent invoices list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentInvoice {
    pub name: String,
    pub date: String,
    pub amount: String,
}

/// Header figures of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_sales: String,
    pub invoices_made: usize,
    /// Newest first; empty when no invoices exist
    pub recent: Vec<RecentInvoice>,
}

pub struct DashboardView {
    store: PreferenceStore,
    ledger: InvoiceLedger,
}

impl DashboardView {
    pub fn new(store: PreferenceStore, ledger: InvoiceLedger) -> Self {
        Self { store, ledger }
    }

    /// Build the view from the invoices kept in the store's backend
    pub fn load(store: PreferenceStore, now: DateTime<Utc>) -> Self {
        let ledger = InvoiceLedger::load(store.storage().as_ref(), now);
        Self::new(store, ledger)
    }

    pub fn ledger(&self) -> &InvoiceLedger {
        &self.ledger
    }

    pub fn set_ledger(&mut self, ledger: InvoiceLedger) {
        self.ledger = ledger;
    }

    pub fn summary(&self) -> DashboardSummary {
        let formatter = LocaleFormatter::from_preferences(&self.store.load());

        let recent = self
            .ledger
            .recent(RECENT_INVOICE_COUNT)
            .map(|invoice| RecentInvoice {
                name: invoice.name.clone(),
                date: formatter.format_date(&invoice.day(), None),
                amount: formatter.format_currency(invoice.amount, None),
            })
            .collect();

        DashboardSummary {
            total_sales: formatter.format_currency(self.ledger.total(), None),
            invoices_made: self.ledger.len(),
            recent,
        }
    }

    /// Daily invoice totals for the `range` days ending at `today`
    pub fn sales_series(&self, range: TimeRange, today: NaiveDate) -> SalesSeries {
        let days = range.days();
        let dates = chart::series_days(days, today);

        SalesSeries {
            labels: dates.iter().map(|d| day_label(*d, days)).collect(),
            values: dates.iter().map(|d| self.ledger.total_on(*d)).collect(),
        }
    }

    /// Chart model for `range` (or the preferred default range)
    pub fn chart_model(
        &self,
        range: Option<TimeRange>,
        today: NaiveDate,
        scheme: ColorScheme,
    ) -> ChartModel {
        let prefs = self.store.load();
        let range = range.unwrap_or(prefs.time_range_default);
        let series = self.sales_series(range, today);

        let preferred_max = prefs
            .axis_range_default
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_AXIS_MAX);

        ChartModel {
            range,
            axis_max: preferred_max.max(series.max()),
            series,
            currency_symbol: prefs.country_entry().currency_symbol,
            palette: ChartPalette::for_scheme(scheme),
        }
    }

    pub fn render_chart(
        &self,
        renderer: &mut dyn ChartRenderer,
        range: Option<TimeRange>,
        today: NaiveDate,
        scheme: ColorScheme,
    ) {
        let model = self.chart_model(range, today, scheme);
        tracing::debug!(
            "Rendering {} chart with {} points",
            model.range,
            model.series.len()
        );
        renderer.render(&model);
    }
}

#[cfg(test)]
mod tests {
    use super::chart::MockChartRenderer;
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use mockall::predicate::function;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, 10, 30, 0).unwrap()
    }

    fn view() -> DashboardView {
        let store = PreferenceStore::new(Arc::new(MemoryStore::new()));
        DashboardView::load(store, now())
    }

    #[test]
    fn test_summary_of_samples() {
        let summary = view().summary();
        assert_eq!(summary.total_sales, "₹23,000");
        assert_eq!(summary.invoices_made, 2);
        assert_eq!(summary.recent[0].name, "SEO Services");
        assert_eq!(summary.recent[0].date, "06-03-2025");
        assert_eq!(summary.recent[1].amount, "₹15,000");
    }

    #[test]
    fn test_week_series_totals_per_day() {
        let series = view().sales_series(TimeRange::Week, now().date_naive());
        assert_eq!(
            series.values,
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 8000.0, 15000.0]
        );
        assert_eq!(series.labels.last().map(String::as_str), Some("Fri"));
    }

    #[test]
    fn test_chart_uses_preferences() {
        let view = view();
        view.store.update("axisRange", "50000".into()).unwrap();
        view.store.update("country", "us".into()).unwrap();

        let model = view.chart_model(None, now().date_naive(), ColorScheme::Dark);
        assert_eq!(model.range, TimeRange::Week);
        assert_eq!(model.axis_max, 50000.0);
        assert_eq!(model.currency_symbol, "$");
        assert_eq!(model.palette, ChartPalette::DARK);
    }

    #[test]
    fn test_axis_grows_past_preferred_max() {
        let model = view().chart_model(
            Some(TimeRange::Month),
            now().date_naive(),
            ColorScheme::Light,
        );
        assert_eq!(model.axis_max, 15000.0);
        assert_eq!(model.series.len(), 30);
    }

    #[test]
    fn test_render_chart_hands_model_to_renderer() {
        let mut renderer = MockChartRenderer::new();
        renderer
            .expect_render()
            .with(function(|m: &ChartModel| {
                m.series.len() == 365 && m.palette == ChartPalette::LIGHT
            }))
            .times(1)
            .return_const(());

        view().render_chart(
            &mut renderer,
            Some(TimeRange::Year),
            now().date_naive(),
            ColorScheme::Light,
        );
    }
}
