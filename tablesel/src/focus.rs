//! Keyboard focus.

use crate::position::{CellColumn, Position};
use crate::rows::{Rebased, RowChange};

/// Owns the single focused position.
///
/// Whenever the row space is non-empty the focus is a valid row; on an empty
/// row space it is `None`.
#[derive(Debug, Clone, Default)]
pub struct FocusModel {
    focused: Option<Position>,
}

impl FocusModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<Position> {
        self.focused
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused.map(|p| p.row)
    }

    /// Focus a position, clamping the row into `[0, row_count)`.
    /// Returns the previous focus.
    pub fn focus(&mut self, pos: Position, row_count: usize) -> Option<Position> {
        let previous = self.focused;
        self.focused = if row_count == 0 {
            None
        } else {
            Some(pos.with_row(pos.row.min(row_count - 1)))
        };
        previous
    }

    /// Drop the focus entirely (empty row space).
    pub fn reset(&mut self) {
        self.focused = None;
    }

    /// Structural equality against the current focus. A `None` column
    /// matches any focused column on that row.
    pub fn is_focused(&self, row: usize, column: Option<CellColumn>) -> bool {
        match (self.focused, column) {
            (Some(f), None) => f.row == row,
            (Some(f), Some(c)) => f.row == row && f.column == c,
            (None, _) => false,
        }
    }

    /// Re-index through a structural change. Returns how the focused row
    /// fared, or `None` when nothing was focused.
    pub fn rebase(&mut self, change: &RowChange) -> Option<Rebased> {
        let focused = self.focused?;
        let rebased = change.rebase(focused.row);
        self.focused = Some(focused.with_row(rebased.landing()));
        Some(rebased)
    }

    /// Pull the focus back into `[0, row_count)` after a batch of changes.
    pub fn clamp(&mut self, row_count: usize) {
        match (self.focused, row_count) {
            (_, 0) => self.focused = None,
            (Some(f), n) if f.row >= n => self.focused = Some(f.with_row(n - 1)),
            (None, _) => self.focused = Some(Position::row(0)),
            _ => {}
        }
    }

    /// Replace the focused column, keeping the row.
    pub fn set_column(&mut self, column: CellColumn) {
        if let Some(f) = self.focused {
            self.focused = Some(f.with_column(column));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_clamps() {
        let mut fm = FocusModel::new();
        fm.focus(Position::row(40), 10);
        assert_eq!(fm.focused_index(), Some(9));
        fm.focus(Position::row(3), 0);
        assert_eq!(fm.focused(), None);
    }

    #[test]
    fn test_removed_span_moves_to_gap() {
        let mut fm = FocusModel::new();
        fm.focus(Position::row(4), 10);
        let fate = fm.rebase(&RowChange::Removed { at: 3, count: 4 });
        assert_eq!(fate, Some(Rebased::Removed { successor: 3 }));
        fm.clamp(6);
        assert_eq!(fm.focused_index(), Some(3));
    }

    #[test]
    fn test_removed_tail_clamps() {
        let mut fm = FocusModel::new();
        fm.focus(Position::row(8), 10);
        fm.rebase(&RowChange::Removed { at: 7, count: 3 });
        fm.clamp(7);
        assert_eq!(fm.focused_index(), Some(6));
    }
}
