//! The table: selection, focus and anchor over a row space.

mod events;
mod rebase;
mod state;

pub use events::{EventResult, TableEvent};
pub use state::Table;
