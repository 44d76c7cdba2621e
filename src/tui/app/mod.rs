//! Application module
//!
//! The TUI application state and logic, split into state, wiring, key
//! handling and rendering.

pub mod state;

mod core;
mod events;
mod rendering;

pub use core::*;
pub use events::{AXIS_RANGE_PRESETS, cycle, field_options};
pub use state::{DialogNotifier, InputMode, SettingsRow, UiState, View};
