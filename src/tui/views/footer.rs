//! Footer view rendering

use crate::tui::app::View;
use crate::tui::keybindings::footer_commands;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render key hints, or the status message when one is set
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    view: View,
    status_message: &Option<(String, bool)>,
    theme: &Theme,
) {
    let spans: Vec<Span> = match status_message {
        Some((msg, is_error)) => vec![Span::styled(
            msg.clone(),
            if *is_error {
                theme.error_style()
            } else {
                theme.success_style()
            },
        )],
        None => footer_commands(view)
            .into_iter()
            .flat_map(|cmd| {
                [
                    Span::styled(format!("<{}>", cmd.key), theme.key_style()),
                    Span::styled(format!(" {}  ", cmd.label), theme.muted_style()),
                ]
            })
            .collect(),
    };

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .wrap(Wrap { trim: true })
        .style(theme.base_style());
    f.render_widget(footer, area);
}
