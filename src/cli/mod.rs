//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;
mod version;

pub use commands::{
    ConfigSubcommand, FieldsSubcommand, FormatSubcommand, PrefsSubcommand, ThemeSubcommand,
    handle_config_command, handle_dashboard_command, handle_fields_command, handle_format_command,
    handle_prefs_command, handle_theme_command,
};
pub use logging::*;
pub use version::display_version;
