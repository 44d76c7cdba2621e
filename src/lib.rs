//! EBillr library
//!
//! Preferences, theming, locale formatting, the settings form and the
//! dashboard core of the EBillr invoicing client. The binary wraps these in a
//! CLI and a terminal UI; tests drive them directly.

pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod live;
pub mod locale;
pub mod observer;
pub mod prefs;
pub mod profile;
pub mod scroll;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod timer;
#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use app::AppContext;
pub use locale::LocaleFormatter;
pub use prefs::{PreferenceStore, Preferences};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{ColorScheme, ColorSchemeSignal, ThemeResolver};
