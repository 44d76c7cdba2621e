//! Tests for the dashboard figures, the chart model and the terminal screens

use chrono::{NaiveDate, TimeZone, Utc};
use ebillr::dashboard::{ChartModel, ChartRenderer, DashboardView, Invoice, InvoiceLedger};
use ebillr::prefs::{PreferenceStore, TimeRange};
use ebillr::storage::{INVOICE_DATA_KEY, KeyValueStore, MemoryStore};
use ebillr::theme::ColorScheme;
use serde_json::json;
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
}

fn invoice(id: u64, name: &str, day: u32, amount: f64) -> Invoice {
    Invoice {
        id,
        name: name.to_string(),
        date: Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap(),
        amount,
        status: "paid".to_string(),
    }
}

fn ledger() -> InvoiceLedger {
    InvoiceLedger::new(vec![
        invoice(1, "Website Design", 5, 15000.0),
        invoice(2, "SEO Services", 6, 8000.0),
        invoice(3, "Logo", 7, 2500.0),
        invoice(4, "Hosting", 7, 1200.0),
    ])
}

fn view() -> (PreferenceStore, DashboardView) {
    let store = PreferenceStore::new(Arc::new(MemoryStore::new()));
    let view = DashboardView::new(store.clone(), ledger());
    (store, view)
}

/// Captures what would be handed to the charting library
#[derive(Default)]
struct CapturingRenderer {
    drawn: Vec<ChartModel>,
}

impl ChartRenderer for CapturingRenderer {
    fn render(&mut self, chart: &ChartModel) {
        self.drawn.push(chart.clone());
    }
}

#[test]
fn test_summary_uses_locale_preferences() {
    let (store, view) = view();
    let summary = view.summary();

    assert_eq!(summary.total_sales, "₹26,700");
    assert_eq!(summary.invoices_made, 4);
    assert_eq!(summary.recent[0].name, "Hosting");
    assert_eq!(summary.recent[0].date, "07-03-2025");
    assert_eq!(summary.recent[0].amount, "₹1,200");

    store.update("currency", json!("USD")).unwrap();
    store.update("dateFormat", json!("MM/DD/YYYY")).unwrap();
    let summary = view.summary();
    assert_eq!(summary.total_sales, "$26,700");
    assert_eq!(summary.recent[3].date, "03/05/2025");
}

#[test]
fn test_recent_list_is_capped_and_empty_ledger_is_empty() {
    let (store, mut view) = view();
    view.set_ledger(InvoiceLedger::new(
        (1..=8).map(|i| invoice(i, "Item", i as u32, 100.0)).collect(),
    ));
    assert_eq!(view.summary().recent.len(), 5);

    let empty = DashboardView::new(store, InvoiceLedger::default());
    let summary = empty.summary();
    assert!(summary.recent.is_empty());
    assert_eq!(summary.total_sales, "₹0");
}

#[test]
fn test_ledger_is_read_from_storage() {
    let storage = Arc::new(MemoryStore::new());
    ledger().save(storage.as_ref()).unwrap();
    let store = PreferenceStore::new(storage.clone());

    let view = DashboardView::load(store, Utc::now());
    assert_eq!(view.ledger(), &ledger());
}

#[test]
fn test_missing_or_malformed_ledger_shows_samples() {
    let now = Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap();
    let storage = Arc::new(MemoryStore::new());
    let store = PreferenceStore::new(storage.clone());

    let view = DashboardView::load(store.clone(), now);
    assert_eq!(view.ledger().len(), 2);

    storage.set(INVOICE_DATA_KEY, "{oops").unwrap();
    let view = DashboardView::load(store, now);
    assert_eq!(view.ledger(), &InvoiceLedger::sample(now));
}

#[test]
fn test_week_series_sums_each_day() {
    let (_, view) = view();
    let series = view.sales_series(TimeRange::Week, today());

    assert_eq!(
        series.labels,
        vec!["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"]
    );
    assert_eq!(
        series.values,
        vec![0.0, 0.0, 0.0, 0.0, 15000.0, 8000.0, 3700.0]
    );
}

#[test]
fn test_chart_uses_preferred_range_and_axis() {
    let (store, view) = view();
    store.update("timeRange", json!("1m")).unwrap();
    store.update("axisRange", json!("50000")).unwrap();

    let model = view.chart_model(None, today(), ColorScheme::Light);
    assert_eq!(model.range, TimeRange::Month);
    assert_eq!(model.series.len(), 30);
    assert_eq!(model.axis_max, 50000.0);

    let model = view.chart_model(Some(TimeRange::Year), today(), ColorScheme::Light);
    assert_eq!(model.series.len(), 365);
    assert_eq!(
        model.series.labels.last().map(String::as_str),
        Some("Mar 7")
    );
}

#[test]
fn test_axis_grows_to_fit_sales() {
    let (_, view) = view();
    let model = view.chart_model(Some(TimeRange::Week), today(), ColorScheme::Dark);
    assert_eq!(model.axis_max, 15000.0);
    assert_eq!(model.ticks(3), vec!["₹0", "₹7,500", "₹15,000"]);
    assert_eq!(model.palette.background, "#0a0a0a");
}

#[test]
fn test_chart_symbol_follows_country() {
    let (store, view) = view();
    store.update("country", json!("jp")).unwrap();

    let mut renderer = CapturingRenderer::default();
    view.render_chart(&mut renderer, None, today(), ColorScheme::Light);

    assert_eq!(renderer.drawn.len(), 1);
    assert_eq!(renderer.drawn[0].currency_symbol, "¥");
    assert_eq!(renderer.drawn[0].tick_label(1234.0), "¥1,234");
}

#[cfg(feature = "tui")]
mod screens {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ebillr::app::AppContext;
    use ebillr::config::AppConfig;
    use ebillr::theme::ColorSchemeSignal;
    use ebillr::tui::{App, Theme, View, views::TerminalChart};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> (AppContext, App) {
        let storage = Arc::new(MemoryStore::new());
        ledger().save(storage.as_ref()).unwrap();
        let ctx = AppContext::with_storage(AppConfig::default(), storage);
        let app = App::new(ctx.clone(), ColorSchemeSignal::new(ColorScheme::Light));
        (ctx, app)
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_terminal_chart_draws_title_and_ticks() {
        let (_, view) = view();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                let mut chart = TerminalChart::new(f, area, Theme::for_scheme(ColorScheme::Light));
                view.render_chart(
                    &mut chart,
                    Some(TimeRange::Week),
                    today(),
                    ColorScheme::Light,
                );
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Sales: Last 7 days"));
        assert!(text.contains("₹15,000"));
        assert!(text.contains("Sat"));
    }

    #[test]
    fn test_dashboard_screen() {
        let (_, mut app) = app();
        let text = draw(&mut app);

        assert_eq!(app.current_view(), View::Dashboard);
        assert!(text.contains("Total Sales:"));
        assert!(text.contains("₹26,700"));
        assert!(text.contains("Hosting"));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn test_quit_keys() {
        let (_, mut app) = app();
        assert!(!press(&mut app, KeyCode::Char('?')));
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[tokio::test]
    async fn test_disable_builtin_field_from_settings() {
        let (ctx, mut app) = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view(), View::Settings);
        assert!(draw(&mut app).contains("India (in)"));

        // Scalars, theme, then Name and Price
        for _ in 0..8 {
            press(&mut app, KeyCode::Char('j'));
        }
        press(&mut app, KeyCode::Char('d'));
        assert!(draw(&mut app).contains("Are you sure you want to delete \"Price\"?"));

        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Char('s'));
        assert!(draw(&mut app).contains("Settings saved successfully!"));
        assert_eq!(ctx.prefs.load().invoice_fields.get("price"), Some(&false));

        press(&mut app, KeyCode::Enter);
        assert!(!draw(&mut app).contains("Settings saved successfully!"));
    }

    #[tokio::test]
    async fn test_duplicate_field_is_reported() {
        let (ctx, mut app) = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));
        for c in "weight".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(draw(&mut app).contains("A field named \"weight\" already exists"));
        assert_eq!(ctx.prefs.load(), ebillr::Preferences::default());
    }

    #[test]
    fn test_theme_toggle_is_persisted() {
        let (ctx, mut app) = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme().scheme, ColorScheme::Dark);
        assert_eq!(ctx.prefs.load().theme, ebillr::prefs::ThemeChoice::Dark);
    }
}
