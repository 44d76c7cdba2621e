//! Modal dialogs: removal confirmation, notices and the add-field prompt

use super::helpers::{centered_rect, create_themed_block};
use crate::settings::{Notice, PendingRemoval};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

fn render_dialog(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, theme: &Theme) {
    let width = area.width.clamp(30, 60);
    let height = lines.len() as u16 + 2;
    let popup = centered_rect(width, height, area);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .block(create_themed_block(title, theme))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(theme.base_style()),
        popup,
    );
}

/// Render the confirmation dialog for a pending invoice field removal
pub fn render_confirmation(f: &mut Frame, area: Rect, pending: &PendingRemoval, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("⚠ CONFIRMATION REQUIRED", theme.warning_style())),
        Line::from(""),
        Line::from(pending.confirmation_message()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("y", theme.success_style()),
            Span::raw(" to confirm, "),
            Span::styled("n", theme.error_style()),
            Span::raw(" or "),
            Span::styled("Esc", theme.error_style()),
            Span::raw(" to cancel"),
        ]),
    ];
    render_dialog(f, area, " Delete Field ", lines, theme);
}

/// Render a notice that must be acknowledged
pub fn render_notice(f: &mut Frame, area: Rect, notice: &Notice, theme: &Theme) {
    let style = match notice {
        Notice::DuplicateField { .. } => theme.error_style(),
        Notice::Saved => theme.success_style(),
        Notice::Discarded => theme.title_style(),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(notice.to_string(), style)),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", theme.key_style()),
            Span::raw(" to continue"),
        ]),
    ];
    render_dialog(f, area, " EBillr ", lines, theme);
}

/// Render the prompt for a new invoice field name
pub fn render_add_field(f: &mut Frame, area: Rect, buffer: &str, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Field name: ", theme.muted_style()),
            Span::styled(format!("{}_", buffer), theme.title_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", theme.key_style()),
            Span::raw(" add · "),
            Span::styled("Esc", theme.key_style()),
            Span::raw(" cancel"),
        ]),
    ];
    render_dialog(f, area, " Add Invoice Field ", lines, theme);
}
