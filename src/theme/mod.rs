//! Theme selection
//!
//! The OS colour-scheme signal and the resolver that combines it with the
//! user's stored choice.

pub mod resolver;
pub mod signal;

pub use resolver::{ThemeAffordance, ThemeResolver, ThemeState, resolve};
pub use signal::{ColorScheme, ColorSchemeSignal};
