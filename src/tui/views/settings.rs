//! Settings view rendering

use super::helpers::{create_themed_block, update_scroll_offset};
use crate::prefs::countries;
use crate::settings::{FormField, MemoryForm};
use crate::theme::ThemeState;
use crate::tui::app::SettingsRow;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Rows kept visible above and below the selection while scrolling
const SCROLL_BUFFER: usize = 2;

/// Label and value columns of one settings row
pub fn row_text(row: &SettingsRow, form: &MemoryForm, theme: ThemeState) -> (String, String) {
    match row {
        SettingsRow::Scalar(field) => {
            let raw = form.text(field).unwrap_or_default();
            let value = match field {
                FormField::Country => countries::find(raw)
                    .map(|c| format!("{} ({})", c.display_name, c.code))
                    .unwrap_or_else(|| raw.to_string()),
                FormField::Currency => match countries::symbol_for_currency(raw) {
                    Some(symbol) => format!("{} ({})", raw, symbol),
                    None => raw.to_string(),
                },
                _ => raw.to_string(),
            };
            (field.label().to_string(), value)
        }
        SettingsRow::Theme => (
            "Theme".to_string(),
            format!("{} (applied: {})", theme.choice, theme.applied),
        ),
        SettingsRow::Invoice { label, checked, .. } => {
            let mark = if *checked { "[x]" } else { "[ ]" };
            (format!("Invoice field: {}", label), mark.to_string())
        }
    }
}

/// Render the settings rows with the selection highlighted
#[allow(clippy::too_many_arguments)]
pub fn render_settings(
    f: &mut Frame,
    area: Rect,
    rows: &[SettingsRow],
    form: &MemoryForm,
    theme_state: ThemeState,
    selected: usize,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let block = create_themed_block(
        " Settings (←/→ change · a add · d delete · s save · c cancel) ",
        theme,
    );
    let visible = area.height.saturating_sub(2) as usize;
    update_scroll_offset(selected, visible, scroll_offset, SCROLL_BUFFER);

    let label_width = rows
        .iter()
        .map(|row| row_text(row, form, theme_state).0.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible)
        .map(|(i, row)| {
            let (label, value) = row_text(row, form, theme_state);
            let style = if i == selected {
                theme.selected_style()
            } else {
                theme.base_style()
            };
            let value_style = if i == selected {
                theme.selected_style()
            } else {
                theme.key_style()
            };
            Line::from(vec![
                Span::styled(format!(" {:<width$}  ", label, width = label_width), style),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(block).style(theme.base_style()),
        area,
    );
}
