//! Theme resolution
//!
//! Turns the persisted theme choice plus the OS colour scheme into the scheme
//! actually applied to the UI. `auto` is never applied directly: it resolves
//! to the OS scheme now and again on every OS change while it stays selected.
//! Manual `light` / `dark` choices persist and ignore OS changes.

use super::signal::{ColorScheme, ColorSchemeSignal};
use crate::observer::{Listeners, Subscription};
use crate::prefs::{PreferenceResult, PreferenceStore, ThemeChoice};
use std::sync::{Arc, RwLock};

/// Choice and applied scheme, as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    /// What the user picked
    pub choice: ThemeChoice,
    /// What is applied to the document
    pub applied: ColorScheme,
}

/// UI affordances reflecting the choice (not the resolved scheme)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeAffordance {
    /// Button rendered as active
    pub active: ThemeChoice,
    /// Icon of the single toggle button
    pub toggle_icon: &'static str,
    /// Label of the single toggle button
    pub toggle_label: &'static str,
}

impl ThemeAffordance {
    pub fn for_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self {
                active: choice,
                toggle_icon: "sun",
                toggle_label: "Switch To Light Theme",
            },
            ThemeChoice::Light | ThemeChoice::Auto => Self {
                active: choice,
                toggle_icon: "moon",
                toggle_label: "Switch To Dark Theme",
            },
        }
    }
}

/// Resolve a choice against the OS scheme
pub fn resolve(choice: ThemeChoice, os: ColorScheme) -> ColorScheme {
    match choice {
        ThemeChoice::Light => ColorScheme::Light,
        ThemeChoice::Dark => ColorScheme::Dark,
        ThemeChoice::Auto => os,
    }
}

/// Applies the effective theme and keeps it in sync
pub struct ThemeResolver {
    store: PreferenceStore,
    signal: ColorSchemeSignal,
    state: Arc<RwLock<ThemeState>>,
    listeners: Listeners<ThemeState>,
    _os_subscription: Subscription,
    _store_subscription: Subscription,
}

impl ThemeResolver {
    /// Apply the persisted choice (default `auto`) and start following changes
    ///
    /// Application is synchronous so the first frame is drawn with the right
    /// scheme.
    pub fn new(store: PreferenceStore, signal: ColorSchemeSignal) -> Self {
        let choice = store.load().theme;
        let initial = ThemeState {
            choice,
            applied: resolve(choice, signal.current()),
        };
        tracing::debug!(
            "Initial theme: choice={}, applied={}",
            initial.choice,
            initial.applied
        );

        let state = Arc::new(RwLock::new(initial));
        let listeners: Listeners<ThemeState> = Listeners::new();

        let os_subscription = {
            let store = store.clone();
            let state = Arc::clone(&state);
            let listeners = listeners.clone();
            signal.on_change(move |scheme| {
                // Re-read the persisted choice: another writer may have changed it
                if store.load().theme == ThemeChoice::Auto {
                    apply_state(
                        &state,
                        &listeners,
                        ThemeState {
                            choice: ThemeChoice::Auto,
                            applied: *scheme,
                        },
                    );
                }
            })
        };

        let store_subscription = {
            let state = Arc::clone(&state);
            let listeners = listeners.clone();
            let signal = signal.clone();
            store.on_change(move |prefs| {
                apply_state(
                    &state,
                    &listeners,
                    ThemeState {
                        choice: prefs.theme,
                        applied: resolve(prefs.theme, signal.current()),
                    },
                );
            })
        };

        Self {
            store,
            signal,
            state,
            listeners,
            _os_subscription: os_subscription,
            _store_subscription: store_subscription,
        }
    }

    /// Persist `choice`, then resolve and apply it
    pub fn set_theme(&self, choice: ThemeChoice) -> PreferenceResult<ThemeState> {
        self.store.set_theme(choice)?;
        let next = ThemeState {
            choice,
            applied: resolve(choice, self.signal.current()),
        };
        apply_state(&self.state, &self.listeners, next);
        tracing::info!("Theme set to {} (applied {})", choice, next.applied);
        Ok(next)
    }

    /// Flip between light and dark (`auto` counts as light)
    pub fn toggle(&self) -> PreferenceResult<ThemeState> {
        let next = match self.store.load().theme {
            ThemeChoice::Light | ThemeChoice::Auto => ThemeChoice::Dark,
            ThemeChoice::Dark => ThemeChoice::Light,
        };
        self.set_theme(next)
    }

    pub fn state(&self) -> ThemeState {
        self.state.read().map(|s| *s).unwrap_or(ThemeState {
            choice: ThemeChoice::Auto,
            applied: self.signal.current(),
        })
    }

    /// The scheme applied to the document
    pub fn applied(&self) -> ColorScheme {
        self.state().applied
    }

    pub fn choice(&self) -> ThemeChoice {
        self.state().choice
    }

    pub fn affordance(&self) -> ThemeAffordance {
        ThemeAffordance::for_choice(self.choice())
    }

    /// Subscribe to changes of the applied theme
    pub fn on_applied<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ThemeState) + Send + 'static,
    {
        self.listeners.subscribe(callback)
    }
}

fn apply_state(state: &RwLock<ThemeState>, listeners: &Listeners<ThemeState>, next: ThemeState) {
    let changed = match state.write() {
        Ok(mut current) => {
            let changed = *current != next;
            *current = next;
            changed
        }
        Err(_) => false,
    };

    if changed {
        listeners.notify(&next);
    }
}
