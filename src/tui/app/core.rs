//! Application state and wiring

use super::state::{DialogNotifier, SettingsRow, UiState, View};
use crate::app::AppContext;
use crate::dashboard::DashboardView;
use crate::live::{ConnectivityMonitor, LiveClock, LiveData, TimeSource};
use crate::observer::Subscription;
use crate::prefs::TimeRange;
use crate::profile::UserProfile;
use crate::settings::{FormField, MemoryForm, SettingsFormController};
use crate::theme::{ColorSchemeSignal, ThemeResolver};
use crate::timer::Debouncer;
use crate::tui::Theme;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};

/// Main application state
pub struct App {
    pub(crate) ctx: AppContext,
    pub(crate) resolver: ThemeResolver,
    pub(crate) settings: SettingsFormController<MemoryForm, DialogNotifier>,
    pub(crate) dashboard: DashboardView,
    /// Chart range picked on the dashboard; `None` uses the preferred default
    pub(crate) chart_range: Option<TimeRange>,
    pub(crate) ui: UiState,

    pub(crate) live: Arc<Mutex<LiveData>>,
    /// Last live-data snapshot taken without blocking
    pub(crate) live_view: Option<(ConnectivityMonitor, LiveClock)>,
    pub(crate) profile: Option<UserProfile>,
    profile_rx: Option<oneshot::Receiver<UserProfile>>,

    scroll_saver: Debouncer<u64>,
    _country_watch: Option<Subscription>,
}

impl App {
    pub fn new(ctx: AppContext, signal: ColorSchemeSignal) -> Self {
        let prefs = ctx.prefs.load();
        let resolver = ThemeResolver::new(ctx.prefs.clone(), signal);
        let settings = SettingsFormController::new(
            ctx.prefs.clone(),
            MemoryForm::complete(),
            DialogNotifier::default(),
        );
        let dashboard = DashboardView::load(ctx.prefs.clone(), chrono::Utc::now());

        let scroll = ctx.scroll_memory();
        let scroll_saver = scroll.debounced(
            View::Settings.page_key(),
            Duration::from_millis(ctx.config.ui.scroll_debounce_millis),
        );
        let ui = UiState {
            selected: scroll.take(View::Settings.page_key()).unwrap_or(0) as usize,
            ..UiState::default()
        };

        let mut app = Self {
            live: Arc::new(Mutex::new(LiveData::new(prefs.country_entry()))),
            live_view: None,
            profile: None,
            profile_rx: None,
            ctx,
            resolver,
            settings,
            dashboard,
            chart_range: None,
            ui,
            scroll_saver,
            _country_watch: None,
        };
        let last = app.settings_rows().len().saturating_sub(1);
        app.ui.selected = app.ui.selected.min(last);
        app
    }

    pub fn theme(&self) -> Theme {
        Theme::for_scheme(self.resolver.applied())
    }

    pub fn live(&self) -> Arc<Mutex<LiveData>> {
        Arc::clone(&self.live)
    }

    pub fn set_profile_receiver(&mut self, rx: oneshot::Receiver<UserProfile>) {
        self.profile_rx = Some(rx);
    }

    /// Refresh the clock whenever a saved record changes the country
    pub fn watch_country(&mut self, source: Arc<dyn TimeSource>) {
        let live = Arc::clone(&self.live);
        let mut country = self.ctx.prefs.load().country;

        self._country_watch = Some(self.ctx.prefs.on_change(move |prefs| {
            if prefs.country == country {
                return;
            }
            country = prefs.country.clone();
            let entry = prefs.country_entry();
            let live = Arc::clone(&live);
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                live.lock().await.refresh(source.as_ref(), entry).await;
            });
        }));
    }

    /// Pick up results of background work without blocking
    pub fn poll_background(&mut self) {
        if let Some(rx) = self.profile_rx.as_mut() {
            match rx.try_recv() {
                Ok(profile) => {
                    self.profile = Some(profile);
                    self.profile_rx = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.profile_rx = None;
                }
            }
        }

        if let Ok(live) = self.live.try_lock() {
            self.live_view = Some((live.monitor.clone(), live.clock.clone()));
        }
    }

    /// Rows of the settings screen in display order
    pub fn settings_rows(&self) -> Vec<SettingsRow> {
        let mut rows: Vec<SettingsRow> = FormField::SCALARS
            .iter()
            .cloned()
            .map(SettingsRow::Scalar)
            .collect();
        rows.push(SettingsRow::Theme);
        rows.extend(
            self.settings
                .form()
                .invoice_rows()
                .into_iter()
                .map(|row| SettingsRow::Invoice {
                    key: row.key,
                    label: row.label,
                    checked: row.checked,
                }),
        );
        rows
    }

    pub(crate) fn selected_row(&self) -> Option<SettingsRow> {
        self.settings_rows().into_iter().nth(self.ui.selected)
    }

    /// Move the settings selection, remembering it once scrolling settles
    pub(crate) fn select(&mut self, index: usize) {
        let last = self.settings_rows().len().saturating_sub(1);
        let index = index.min(last);
        if index != self.ui.selected {
            self.ui.selected = index;
            self.scroll_saver.call(index as u64);
        }
    }

    pub(crate) fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.ui.status_message = Some((message.into(), is_error));
    }

    pub fn current_view(&self) -> View {
        self.ui.view
    }
}
