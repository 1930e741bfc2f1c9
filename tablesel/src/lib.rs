//! Anchor-based selection and focus for virtualized, multi-column tables.
//!
//! A [`Table`] owns a row space, a column space, and the three pieces of
//! interaction state that have to stay consistent with each other: the
//! focused cell, the selected-cell set and the range anchor. Keyboard
//! gestures, programmatic calls and structural row changes all go through
//! it, and each produces at most one [`TableEvent`] of each kind.
//!
//! ```
//! use tablesel::{ColumnSpace, Key, KeyCombo, RowList, Table};
//!
//! let rows = RowList::new((0..12).map(|i| format!("row-{i}")).collect());
//! let mut table = Table::new(rows, ColumnSpace::default());
//!
//! table.clear_and_select(0, None);
//! table.on_key(&KeyCombo::key(Key::Down).shift());
//! table.on_key(&KeyCombo::key(Key::Down).shift());
//! assert_eq!(table.selected_indices(), vec![0, 1, 2]);
//! assert_eq!(table.focused_index(), Some(2));
//! ```

pub mod anchor;
pub mod columns;
pub mod config;
pub mod error;
pub mod focus;
pub mod input;
pub mod position;
pub mod rows;
pub mod selection;
pub mod table;

pub use columns::{Column, ColumnSpace, Orientation};
pub use config::{ShortcutKey, TableConfig};
pub use error::{ConfigError, KeyParseError};
pub use input::{Key, KeyCombo, Modifiers};
pub use position::{CellColumn, ColumnId, Position};
pub use rows::{Rebased, RowChange, RowList, RowSpace, TableRow};
pub use selection::SelectionMode;
pub use table::{EventResult, Table, TableEvent};

pub mod prelude {
    pub use crate::columns::{Column, ColumnSpace, Orientation};
    pub use crate::config::{ShortcutKey, TableConfig};
    pub use crate::input::{Key, KeyCombo, Modifiers};
    pub use crate::position::{CellColumn, ColumnId, Position};
    pub use crate::rows::{RowChange, RowList, RowSpace, TableRow};
    pub use crate::selection::SelectionMode;
    pub use crate::table::{EventResult, Table, TableEvent};
}
