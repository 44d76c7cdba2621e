//! Application state structures

use crate::settings::{FormField, Notice, Notifier};

/// Top-level screens
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Dashboard,
    Settings,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Settings => "Settings",
        }
    }

    pub fn next(&self) -> View {
        match self {
            View::Dashboard => View::Settings,
            View::Settings => View::Dashboard,
        }
    }

    /// Key used for scroll memory
    pub fn page_key(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Settings => "settings",
        }
    }
}

/// One selectable row of the settings screen
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SettingsRow {
    Scalar(FormField),
    Theme,
    Invoice {
        key: String,
        label: String,
        checked: bool,
    },
}

/// Keyboard input mode
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing the name of a new invoice field
    AddField(String),
}

/// UI-only state
#[derive(Debug, Default)]
pub struct UiState {
    pub view: View,
    pub input: InputMode,
    /// Selected settings row
    pub selected: usize,
    /// First visible settings row
    pub scroll_offset: usize,
    /// Transient footer message and whether it is an error
    pub status_message: Option<(String, bool)>,
    pub show_help: bool,
}

/// Notifier that keeps the latest notice for a blocking dialog
#[derive(Debug, Default)]
pub struct DialogNotifier {
    pub pending: Option<Notice>,
}

impl DialogNotifier {
    /// Dismiss the dialog
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.pending.take()
    }
}

impl Notifier for DialogNotifier {
    fn acknowledge(&mut self, notice: &Notice) {
        tracing::debug!("Notice: {}", notice);
        self.pending = Some(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Dashboard.next(), View::Settings);
        assert_eq!(View::Settings.next().page_key(), "dashboard");
    }

    #[test]
    fn test_dialog_keeps_latest_notice() {
        let mut notifier = DialogNotifier::default();
        notifier.acknowledge(&Notice::Discarded);
        notifier.acknowledge(&Notice::Saved);
        assert_eq!(notifier.dismiss(), Some(Notice::Saved));
        assert_eq!(notifier.dismiss(), None);
    }
}
