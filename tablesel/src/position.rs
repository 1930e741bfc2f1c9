//! Cell positions.

use serde::{Deserialize, Serialize};

/// Stable identifier for a column.
///
/// Positions refer to columns by id rather than by visible index, so a
/// column reorder never invalidates a selected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(pub u32);

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "col{}", self.0)
    }
}

/// The column half of a [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColumn {
    /// The whole row. Used when cell selection is disabled.
    #[default]
    RowWide,
    /// A single column.
    Column(ColumnId),
}

impl CellColumn {
    /// The column id, if this is not row-wide.
    pub fn id(&self) -> Option<ColumnId> {
        match self {
            CellColumn::RowWide => None,
            CellColumn::Column(id) => Some(*id),
        }
    }

    pub fn is_row_wide(&self) -> bool {
        matches!(self, CellColumn::RowWide)
    }
}

impl From<Option<ColumnId>> for CellColumn {
    fn from(column: Option<ColumnId>) -> Self {
        match column {
            Some(id) => CellColumn::Column(id),
            None => CellColumn::RowWide,
        }
    }
}

impl From<ColumnId> for CellColumn {
    fn from(id: ColumnId) -> Self {
        CellColumn::Column(id)
    }
}

/// A (row, column) position in the table.
///
/// "No position" is expressed as `Option<Position>::None` wherever a
/// position can be absent (focus on an empty table, missing anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: CellColumn,
}

impl Position {
    pub const fn new(row: usize, column: CellColumn) -> Self {
        Self { row, column }
    }

    /// A row-wide position.
    pub const fn row(row: usize) -> Self {
        Self {
            row,
            column: CellColumn::RowWide,
        }
    }

    /// A single-cell position.
    pub const fn cell(row: usize, column: ColumnId) -> Self {
        Self {
            row,
            column: CellColumn::Column(column),
        }
    }

    /// Same column, different row.
    pub const fn with_row(self, row: usize) -> Self {
        Self {
            row,
            column: self.column,
        }
    }

    /// Same row, different column.
    pub const fn with_column(self, column: CellColumn) -> Self {
        Self {
            row: self.row,
            column,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            CellColumn::RowWide => write!(f, "({}, *)", self.row),
            CellColumn::Column(id) => write!(f, "({}, {})", self.row, id),
        }
    }
}
