//! Dashboard view rendering

use super::helpers::{create_themed_block, truncate_message};
use crate::dashboard::{ChartModel, ChartRenderer, DashboardSummary};
use crate::tui::theme::{Theme, css_color};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
};

/// Draws the sales chart into a frame area
pub struct TerminalChart<'f, 'a> {
    frame: &'f mut Frame<'a>,
    area: Rect,
    theme: Theme,
}

impl<'f, 'a> TerminalChart<'f, 'a> {
    pub fn new(frame: &'f mut Frame<'a>, area: Rect, theme: Theme) -> Self {
        Self { frame, area, theme }
    }
}

/// First, middle and last labels of the time axis
fn axis_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 | 2 => labels.to_vec(),
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

impl ChartRenderer for TerminalChart<'_, '_> {
    fn render(&mut self, chart: &ChartModel) {
        let background = chart.palette.background;
        let line = css_color(chart.palette.line, background);
        let text = css_color(chart.palette.text, background);
        let grid = css_color(chart.palette.grid, background);

        let points: Vec<(f64, f64)> = chart
            .series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        let x_max = chart.series.len().saturating_sub(1).max(1) as f64;

        let dataset = Dataset::default()
            .name("Sales")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(line))
            .data(&points);

        let title = format!(" Sales: {} (r: change range) ", chart.range.label());
        let widget = Chart::new(vec![dataset])
            .block(create_themed_block(&title, &self.theme))
            .style(self.theme.base_style())
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(grid))
                    .labels(
                        axis_labels(&chart.series.labels)
                            .into_iter()
                            .map(|l| Span::styled(l, Style::default().fg(text))),
                    )
                    .bounds([0.0, x_max]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(grid))
                    .labels(
                        chart
                            .ticks(3)
                            .into_iter()
                            .map(|l| Span::styled(l, Style::default().fg(text))),
                    )
                    .bounds([0.0, chart.axis_max]),
            );

        self.frame.render_widget(widget, self.area);
    }
}

/// Render totals and the recent invoices list
pub fn render_summary(f: &mut Frame, area: Rect, summary: &DashboardSummary, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let totals = vec![
        Line::from(vec![
            Span::styled("Total Sales:   ", theme.muted_style()),
            Span::styled(summary.total_sales.clone(), theme.title_style()),
        ]),
        Line::from(vec![
            Span::styled("Invoices Made: ", theme.muted_style()),
            Span::styled(summary.invoices_made.to_string(), theme.title_style()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(totals)
            .block(create_themed_block(" Overview ", theme))
            .style(theme.base_style()),
        chunks[0],
    );

    let block = create_themed_block(" Recent Invoices ", theme);
    if summary.recent.is_empty() {
        let empty = Span::styled("No invoices created yet", theme.muted_style());
        f.render_widget(
            Paragraph::new(Line::from(empty))
                .block(block)
                .style(theme.base_style()),
            chunks[1],
        );
        return;
    }

    let name_width = chunks[1].width.saturating_sub(32).max(8) as usize;
    let rows: Vec<Row> = summary
        .recent
        .iter()
        .map(|invoice| {
            Row::new(vec![
                Cell::from(truncate_message(&invoice.name, name_width)),
                Cell::from(invoice.date.clone()),
                Cell::from(invoice.amount.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(8),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(Row::new(vec!["Name", "Date", "Amount"]).style(theme.muted_style()))
    .block(block)
    .style(theme.base_style());
    f.render_widget(table, chunks[1]);
}
