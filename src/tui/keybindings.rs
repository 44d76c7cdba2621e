//! Centralized keybindings
//!
//! Single source for the footer hints and the help overlay.

use super::app::View;

/// Keybinding with its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCommand {
    /// The keybinding string (e.g., "j/k", "Enter")
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyCommand {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Keys available on every screen
pub const GENERAL_COMMANDS: &[KeyCommand] = &[
    KeyCommand::new("Tab", "Switch view"),
    KeyCommand::new("t", "Toggle theme"),
    KeyCommand::new("?", "Help"),
    KeyCommand::new("q", "Quit"),
];

pub const DASHBOARD_COMMANDS: &[KeyCommand] = &[KeyCommand::new("r", "Chart range")];

pub const SETTINGS_COMMANDS: &[KeyCommand] = &[
    KeyCommand::new("j/k", "Navigate"),
    KeyCommand::new("h/l", "Change"),
    KeyCommand::new("a", "Add field"),
    KeyCommand::new("d", "Delete field"),
    KeyCommand::new("s", "Save"),
    KeyCommand::new("c", "Cancel"),
];

/// Commands specific to `view`
pub fn view_commands(view: View) -> &'static [KeyCommand] {
    match view {
        View::Dashboard => DASHBOARD_COMMANDS,
        View::Settings => SETTINGS_COMMANDS,
    }
}

/// Footer hints for `view`: its own commands first, then the general ones
pub fn footer_commands(view: View) -> Vec<KeyCommand> {
    view_commands(view)
        .iter()
        .chain(GENERAL_COMMANDS)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_commands_end_with_general() {
        let commands = footer_commands(View::Dashboard);
        assert_eq!(commands[0].key, "r");
        assert_eq!(commands.last().map(|c| c.label), Some("Quit"));
        assert_eq!(
            footer_commands(View::Settings).len(),
            SETTINGS_COMMANDS.len() + GENERAL_COMMANDS.len()
        );
    }
}
