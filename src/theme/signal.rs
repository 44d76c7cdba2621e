//! OS colour-scheme signal
//!
//! The native counterpart of the `prefers-color-scheme` media query: holds the
//! current scheme and notifies subscribers when it changes.

use crate::observer::{Listeners, Subscription};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};

/// A concrete, applied colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable OS colour-scheme preference
#[derive(Clone)]
pub struct ColorSchemeSignal {
    current: Arc<RwLock<ColorScheme>>,
    listeners: Listeners<ColorScheme>,
}

impl ColorSchemeSignal {
    pub fn new(initial: ColorScheme) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
            listeners: Listeners::new(),
        }
    }

    /// Detect the scheme from the environment
    ///
    /// `EBILLR_COLOR_SCHEME=light|dark` wins; otherwise the terminal's
    /// `COLORFGBG` background index decides; otherwise light.
    pub fn detect() -> Self {
        let scheme = std::env::var("EBILLR_COLOR_SCHEME")
            .ok()
            .and_then(|v| parse_scheme(&v))
            .or_else(|| {
                std::env::var("COLORFGBG")
                    .ok()
                    .and_then(|v| scheme_from_colorfgbg(&v))
            })
            .unwrap_or_default();

        tracing::debug!("Detected OS colour scheme: {}", scheme);
        Self::new(scheme)
    }

    /// Current OS scheme
    pub fn current(&self) -> ColorScheme {
        self.current.read().map(|s| *s).unwrap_or_default()
    }

    /// Record a new OS scheme, notifying subscribers if it changed
    pub fn publish(&self, scheme: ColorScheme) {
        let changed = match self.current.write() {
            Ok(mut current) => {
                let changed = *current != scheme;
                *current = scheme;
                changed
            }
            Err(_) => false,
        };

        if changed {
            tracing::debug!("OS colour scheme changed to {}", scheme);
            self.listeners.notify(&scheme);
        }
    }

    /// Subscribe to scheme changes
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ColorScheme) + Send + 'static,
    {
        self.listeners.subscribe(callback)
    }
}

impl Default for ColorSchemeSignal {
    fn default() -> Self {
        Self::new(ColorScheme::Light)
    }
}

fn parse_scheme(value: &str) -> Option<ColorScheme> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" => Some(ColorScheme::Light),
        "dark" => Some(ColorScheme::Dark),
        _ => None,
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;extra;bg`); ANSI backgrounds 0-6 and 8 are dark
fn scheme_from_colorfgbg(value: &str) -> Option<ColorScheme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if bg <= 6 || bg == 8 {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    })
}
