//! TUI view components
//!
//! Each component renders one part of the interface from borrowed state.

mod confirmation;
mod dashboard;
mod footer;
mod header;
mod help;
pub mod helpers;
mod settings;

pub use confirmation::*;
pub use dashboard::*;
pub use footer::*;
pub use header::*;
pub use help::*;
pub use settings::*;
