//! Header view rendering

use crate::live::{ClockSource, ConnectivityMonitor, LiveClock};
use crate::locale::LocaleFormatter;
use crate::profile::UserProfile;
use crate::theme::ThemeAffordance;
use crate::tui::app::View;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Everything the header shows
pub struct HeaderData<'a> {
    pub view: View,
    pub profile: Option<&'a UserProfile>,
    pub live: Option<&'a (ConnectivityMonitor, LiveClock)>,
    pub formatter: &'a LocaleFormatter,
    pub affordance: ThemeAffordance,
}

/// Clock line: date, time and the hour on the clock icon
pub fn clock_line(clock: &LiveClock, formatter: &LocaleFormatter) -> String {
    let (date, time) = clock.display(formatter);
    let marker = match clock.source() {
        ClockSource::Remote => "",
        ClockSource::Local => " (local)",
    };
    format!("{}  {}  [{}h]{}", date, time, clock.icon_hour(), marker)
}

/// Render the header with title, user, clock and connectivity
pub fn render_header(f: &mut Frame, area: Rect, data: &HeaderData, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let user = match data.profile {
        Some(profile) => Line::from(vec![
            Span::styled(format!("[{}] ", profile.initials()), theme.key_style()),
            Span::styled(profile.name.clone(), theme.title_style()),
            Span::styled(format!("  {}", profile.email), theme.muted_style()),
        ]),
        None => Line::from(Span::styled("Loading...", theme.muted_style())),
    };

    let left = vec![
        Line::from(vec![
            Span::styled("EBillr", theme.key_style()),
            Span::raw(" | "),
            Span::styled(data.view.title(), theme.title_style()),
        ]),
        user,
    ];

    let mut right = Vec::new();
    match data.live {
        Some((monitor, clock)) => {
            right.push(Line::from(Span::styled(
                clock_line(clock, data.formatter),
                theme.title_style(),
            )));
            match monitor.status_message() {
                Some(message) => {
                    right.push(Line::from(Span::styled(message, theme.error_style())))
                }
                None => right.push(Line::from(Span::styled("Online", theme.success_style()))),
            }
        }
        None => right.push(Line::from(Span::styled("Loading...", theme.muted_style()))),
    }
    right.push(Line::from(vec![
        Span::styled("t", theme.key_style()),
        Span::styled(
            format!(
                " {} ({})",
                data.affordance.toggle_label, data.affordance.toggle_icon
            ),
            theme.muted_style(),
        ),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    f.render_widget(
        Paragraph::new(left)
            .block(block.clone())
            .style(theme.base_style()),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(right)
            .block(block)
            .alignment(Alignment::Right)
            .style(theme.base_style()),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_clock_line() {
        let ist = FixedOffset::east_opt(330 * 60).unwrap();
        let time = ist.with_ymd_and_hms(2025, 3, 7, 14, 5, 0).unwrap();
        let clock = LiveClock::at(time, ClockSource::Remote);

        let line = clock_line(&clock, &LocaleFormatter::default());
        assert_eq!(line, "07-03-2025  2:05 PM  [2h]");

        let local = LiveClock::at(time, ClockSource::Local);
        assert!(clock_line(&local, &LocaleFormatter::default()).ends_with("(local)"));
    }
}
