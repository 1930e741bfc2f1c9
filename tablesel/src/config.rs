//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::columns::Orientation;
use crate::error::ConfigError;
use crate::selection::SelectionMode;

/// Which physical modifier acts as the multi-select "shortcut" key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKey {
    /// Control (most platforms).
    #[default]
    Ctrl,
    /// Command / Super (macOS).
    Meta,
}

/// Per-table configuration.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// use tablesel::{SelectionMode, TableConfig};
///
/// let config: TableConfig = serde_json::from_str(r#"{ "cell_selection": true }"#).unwrap();
/// assert!(config.cell_selection);
/// assert_eq!(config.selection_mode, SelectionMode::Multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Single or multiple selection.
    pub selection_mode: SelectionMode,

    /// Select individual cells instead of whole rows.
    pub cell_selection: bool,

    /// The multi-select modifier.
    pub shortcut: ShortcutKey,

    /// Rows moved by PageUp/PageDown until the layout reports a real
    /// viewport height.
    pub page_size: usize,

    /// Initial traversal direction for Left/Right.
    pub orientation: Orientation,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Multiple,
            cell_selection: false,
            shortcut: ShortcutKey::Ctrl,
            page_size: 10,
            orientation: Orientation::Ltr,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Enable cell-granularity selection.
    pub fn cell_selection(mut self) -> Self {
        self.cell_selection = true;
        self
    }

    /// Set the multi-select modifier.
    pub fn shortcut(mut self, shortcut: ShortcutKey) -> Self {
        self.shortcut = shortcut;
        self
    }

    /// Set the fallback page size.
    pub fn page_size(mut self, rows: usize) -> Self {
        self.page_size = rows;
        self
    }

    /// Set the traversal direction.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}
