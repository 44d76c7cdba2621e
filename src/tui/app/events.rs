//! Keyboard handling

use super::core::App;
use super::state::{InputMode, SettingsRow, View};
use crate::prefs::{COUNTRIES, DateFormat, TimeFormat, TimeRange};
use crate::settings::{FieldError, FieldValue, FormField, SettingsForm};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Axis bounds offered on the settings screen
pub const AXIS_RANGE_PRESETS: &[&str] = &["1000", "5000", "10000", "50000", "100000"];

/// The value `step` places away from `current` in `options`, wrapping around
pub fn cycle(options: &[String], current: &str, step: isize) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as isize;
    let next = match options.iter().position(|o| o.eq_ignore_ascii_case(current)) {
        Some(i) => (i as isize + step).rem_euclid(len),
        None => 0,
    };
    options.get(next as usize).cloned()
}

fn tags(values: impl Iterator<Item = &'static str>) -> Vec<String> {
    values.map(str::to_string).collect()
}

/// Choices of a scalar settings field
pub fn field_options(field: &FormField) -> Vec<String> {
    match field {
        FormField::Country => COUNTRIES.iter().map(|c| c.code.to_string()).collect(),
        FormField::Currency => {
            let mut codes: Vec<String> = Vec::new();
            for country in COUNTRIES {
                if !codes.iter().any(|c| c == country.currency_code) {
                    codes.push(country.currency_code.to_string());
                }
            }
            codes
        }
        FormField::TimeRange => tags(TimeRange::ALL.iter().map(|r| r.as_str())),
        FormField::AxisRange => tags(AXIS_RANGE_PRESETS.iter().copied()),
        FormField::DateFormat => tags(DateFormat::ALL.iter().map(|f| f.as_str())),
        FormField::TimeFormat => tags(TimeFormat::ALL.iter().map(|f| f.as_str())),
        FormField::InvoiceField(_) => Vec::new(),
    }
}

impl App {
    /// Main keyboard event handler; returns `true` to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        // Blocking acknowledgement
        if self.settings.notifier().pending.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.settings.notifier_mut().dismiss();
            }
            return false;
        }

        if self.settings.pending_removal().is_some() {
            self.handle_confirmation_key(key);
            return false;
        }

        if let InputMode::AddField(_) = self.ui.input {
            self.handle_input_key(key);
            return false;
        }

        self.ui.status_message = None;

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                self.ui.view = self.ui.view.next();
                tracing::debug!("Switched to {} view", self.ui.view.title());
            }
            KeyCode::Char('?') => self.ui.show_help = !self.ui.show_help,
            KeyCode::Char('t') => self.toggle_theme(),
            _ => match self.ui.view {
                View::Dashboard => self.handle_dashboard_key(key),
                View::Settings => self.handle_settings_key(key),
            },
        }

        false
    }

    fn toggle_theme(&mut self) {
        match self.resolver.toggle() {
            Ok(state) => tracing::debug!("Theme toggled to {}", state.choice),
            Err(e) => self.set_status(format!("Failed to save theme: {}", e), true),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char('r') = key.code {
            let current = self
                .chart_range
                .unwrap_or(self.ctx.prefs.load().time_range_default);
            let options = field_options(&FormField::TimeRange);
            let next = cycle(&options, current.as_str(), 1);
            self.chart_range = next.and_then(|t| TimeRange::parse(&t));
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        let rows = self.settings_rows().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select(self.ui.selected.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.ui.selected + 1 < rows {
                    self.select(self.ui.selected + 1);
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(rows.saturating_sub(1)),
            KeyCode::Left | KeyCode::Char('h') => self.change_selected(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Enter => {
                self.change_selected(1)
            }
            KeyCode::Char('a') => self.ui.input = InputMode::AddField(String::new()),
            KeyCode::Char('d') | KeyCode::Delete => self.request_removal(),
            KeyCode::Char('s') => {
                if let Err(e) = self.settings.save() {
                    self.set_status(format!("Failed to save settings: {}", e), true);
                }
            }
            KeyCode::Char('c') | KeyCode::Esc => self.settings.cancel(),
            _ => {}
        }
    }

    fn change_selected(&mut self, step: isize) {
        let Some(row) = self.selected_row() else {
            return;
        };

        match row {
            SettingsRow::Scalar(field) => {
                let current = self
                    .settings
                    .form()
                    .text(&field)
                    .unwrap_or_default()
                    .to_string();
                let Some(next) = cycle(&field_options(&field), &current, step) else {
                    return;
                };
                if field == FormField::Country {
                    self.settings.on_country_changed(&next);
                } else {
                    self.settings
                        .form_mut()
                        .write(&field, FieldValue::Text(next));
                }
            }
            SettingsRow::Theme => self.toggle_theme(),
            SettingsRow::Invoice { key, .. } => {
                self.settings.form_mut().toggle_checkbox(&key);
            }
        }
    }

    fn request_removal(&mut self) {
        if let Some(SettingsRow::Invoice { key, .. }) = self.selected_row() {
            let requested = self.settings.request_removal(&key).map(|_| ());
            if let Err(e) = requested {
                self.set_status(e.to_string(), true);
            }
        }
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => match self.settings.confirm_removal() {
                Ok(removed) => {
                    let last = self.settings_rows().len().saturating_sub(1);
                    self.ui.selected = self.ui.selected.min(last);
                    let verb = if removed.custom {
                        "Deleted"
                    } else {
                        "Disabled"
                    };
                    self.set_status(format!("{} \"{}\"", verb, removed.label), false);
                }
                Err(e) => self.set_status(e.to_string(), true),
            },
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.settings.cancel_removal();
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let InputMode::AddField(buffer) = &mut self.ui.input else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.ui.input = InputMode::Normal,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Enter => {
                let name = std::mem::take(buffer);
                self.ui.input = InputMode::Normal;
                match self.settings.add_custom_field(&name) {
                    Ok(_) => {
                        self.select(self.settings_rows().len().saturating_sub(1));
                    }
                    // Already acknowledged through the notifier
                    Err(FieldError::Duplicate(_)) => {}
                    Err(e) => self.set_status(e.to_string(), true),
                }
            }
            _ => {}
        }
    }
}
