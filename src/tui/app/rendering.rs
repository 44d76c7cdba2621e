//! Rendering logic for the application

use super::core::App;
use super::state::{InputMode, View};
use crate::locale::LocaleFormatter;
use crate::tui::views::*;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

/// Height of the header, borders included
const HEADER_HEIGHT: u16 = 5;
const FOOTER_HEIGHT: u16 = 3;

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        let theme = self.theme();
        let area = f.area();
        f.render_widget(Block::default().style(theme.base_style()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let formatter = LocaleFormatter::from_preferences(&self.ctx.prefs.load());
        let header = HeaderData {
            view: self.ui.view,
            profile: self.profile.as_ref(),
            live: self.live_view.as_ref(),
            formatter: &formatter,
            affordance: self.resolver.affordance(),
        };
        render_header(f, chunks[0], &header, &theme);

        match self.ui.view {
            View::Dashboard => {
                let body = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(chunks[1]);

                render_summary(f, body[0], &self.dashboard.summary(), &theme);

                let mut chart = TerminalChart::new(f, body[1], theme);
                self.dashboard.render_chart(
                    &mut chart,
                    self.chart_range,
                    chrono::Utc::now().date_naive(),
                    theme.scheme,
                );
            }
            View::Settings => {
                let rows = self.settings_rows();
                render_settings(
                    f,
                    chunks[1],
                    &rows,
                    self.settings.form(),
                    self.resolver.state(),
                    self.ui.selected,
                    &mut self.ui.scroll_offset,
                    &theme,
                );
            }
        }

        render_footer(f, chunks[2], self.ui.view, &self.ui.status_message, &theme);

        // Overlays, topmost last
        if self.ui.show_help {
            render_help(f, area, &theme);
        }
        if let InputMode::AddField(buffer) = &self.ui.input {
            render_add_field(f, area, buffer, &theme);
        }
        if let Some(pending) = self.settings.pending_removal() {
            render_confirmation(f, area, pending, &theme);
        }
        if let Some(notice) = &self.settings.notifier().pending {
            render_notice(f, area, notice, &theme);
        }
    }
}
