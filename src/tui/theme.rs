//! Terminal colours for the applied scheme
//!
//! Colours are written as CSS strings and parsed with `csscolorparser`, the
//! same notation the chart palette uses. Translucent colours are flattened
//! over the background since terminals have no alpha.

use crate::dashboard::ChartPalette;
use crate::theme::ColorScheme;
use ratatui::style::{Color, Modifier, Style};

/// Colours for one applied scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub scheme: ColorScheme,
    pub background: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub accent: Color,
    pub selected_bg: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub chart_line: Color,
    pub chart_text: Color,
    pub chart_grid: Color,
}

struct CssTheme {
    text_secondary: &'static str,
    border: &'static str,
    accent: &'static str,
    selected_bg: &'static str,
    success: &'static str,
    error: &'static str,
    warning: &'static str,
}

const LIGHT: CssTheme = CssTheme {
    text_secondary: "#737373",
    border: "#e5e5e5",
    accent: "#2563eb",
    selected_bg: "#f5f5f5",
    success: "#16a34a",
    error: "#dc2626",
    warning: "#d97706",
};

const DARK: CssTheme = CssTheme {
    text_secondary: "#a3a3a3",
    border: "#262626",
    accent: "#60a5fa",
    selected_bg: "#262626",
    success: "#4ade80",
    error: "#f87171",
    warning: "#fbbf24",
};

/// Parse a CSS colour, flattening alpha over `background`
pub fn css_color(css: &str, background: &str) -> Color {
    let Ok(color) = csscolorparser::parse(css) else {
        tracing::debug!("Invalid theme colour '{}'", css);
        return Color::Reset;
    };
    let [r, g, b, a] = color.to_rgba8();
    let [br, bg, bb, _] = csscolorparser::parse(background)
        .map(|c| c.to_rgba8())
        .unwrap_or([0, 0, 0, 255]);

    let a = a as u32;
    let mix = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8;
    Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
}

impl Theme {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        let chart = ChartPalette::for_scheme(scheme);
        let css = match scheme {
            ColorScheme::Dark => &DARK,
            ColorScheme::Light => &LIGHT,
        };
        let bg = chart.background;

        Self {
            scheme,
            background: css_color(bg, bg),
            text_primary: css_color(chart.text, bg),
            text_secondary: css_color(css.text_secondary, bg),
            border: css_color(css.border, bg),
            accent: css_color(css.accent, bg),
            selected_bg: css_color(css.selected_bg, bg),
            success: css_color(css.success, bg),
            error: css_color(css.error, bg),
            warning: css_color(css.warning, bg),
            chart_line: css_color(chart.line, bg),
            chart_text: css_color(chart.text, bg),
            chart_grid: css_color(chart.grid, bg),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn key_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }
}
