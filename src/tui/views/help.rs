//! Help overlay rendering

use super::helpers::{centered_rect, create_themed_block};
use crate::tui::keybindings::{
    DASHBOARD_COMMANDS, GENERAL_COMMANDS, KeyCommand, SETTINGS_COMMANDS,
};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

/// Render the help overlay with one column per key group
pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let rows = GENERAL_COMMANDS
        .len()
        .max(DASHBOARD_COMMANDS.len())
        .max(SETTINGS_COMMANDS.len()) as u16;
    let popup = centered_rect(area.width.saturating_sub(4).min(90), rows + 4, area);

    f.render_widget(Clear, popup);
    f.render_widget(create_themed_block(" Help (? to close) ", theme), popup);

    let inner = Rect {
        x: popup.x + 1,
        y: popup.y + 1,
        width: popup.width.saturating_sub(2),
        height: popup.height.saturating_sub(2),
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(inner);

    render_help_column(f, columns[0], "GENERAL", GENERAL_COMMANDS, theme);
    render_help_column(f, columns[1], "DASHBOARD", DASHBOARD_COMMANDS, theme);
    render_help_column(f, columns[2], "SETTINGS", SETTINGS_COMMANDS, theme);
}

fn render_help_column(
    f: &mut Frame,
    area: Rect,
    title: &str,
    commands: &[KeyCommand],
    theme: &Theme,
) {
    let heading = Span::styled(title.to_string(), theme.title_style());
    let mut lines = vec![Line::from(heading)];
    lines.extend(commands.iter().map(|cmd| {
        Line::from(vec![
            Span::styled(format!("<{}>", cmd.key), theme.key_style()),
            Span::styled(format!(" {}", cmd.label), theme.muted_style()),
        ])
    }));
    f.render_widget(Paragraph::new(lines).style(theme.base_style()), area);
}
