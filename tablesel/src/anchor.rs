//! Range-selection anchor.

use crate::position::{CellColumn, Position};
use crate::rows::{Rebased, RowChange};

/// Owns the anchor: the fixed end of every range gesture.
///
/// An anchor is either explicit (set by a select, clear-and-select or
/// discontinuous toggle) or a default picked up implicitly when a range
/// gesture needed one and none existed.
#[derive(Debug, Clone, Default)]
pub struct AnchorTracker {
    anchor: Option<Position>,
    explicit: bool,
}

impl AnchorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// True once an explicit anchor has been set.
    pub fn has_non_default_anchor(&self) -> bool {
        self.anchor.is_some() && self.explicit
    }

    /// Record an explicit anchor.
    pub fn set(&mut self, pos: Position) {
        self.anchor = Some(pos);
        self.explicit = true;
    }

    /// Record a default anchor unless one already exists. Returns the
    /// anchor in effect afterwards.
    pub fn set_default(&mut self, pos: Position) -> Position {
        match self.anchor {
            Some(existing) => existing,
            None => {
                self.anchor = Some(pos);
                self.explicit = false;
                pos
            }
        }
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.explicit = false;
    }

    /// Re-index through a structural change, exactly like the focus.
    pub fn rebase(&mut self, change: &RowChange) -> Option<Rebased> {
        let anchor = self.anchor?;
        let rebased = change.rebase(anchor.row);
        self.anchor = Some(anchor.with_row(rebased.landing()));
        Some(rebased)
    }

    /// Move an existing anchor to another row, keeping its column and kind.
    pub fn relocate(&mut self, row: usize) {
        if let Some(anchor) = self.anchor {
            self.anchor = Some(anchor.with_row(row));
        }
    }

    pub fn set_column(&mut self, column: CellColumn) {
        if let Some(anchor) = self.anchor {
            self.anchor = Some(anchor.with_column(column));
        }
    }

    /// Pull the anchor back into `[0, row_count)`.
    pub fn clamp(&mut self, row_count: usize) {
        match (self.anchor, row_count) {
            (Some(_), 0) => self.clear(),
            (Some(a), n) if a.row >= n => self.anchor = Some(a.with_row(n - 1)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_anchor_does_not_override() {
        let mut anchor = AnchorTracker::new();
        assert_eq!(anchor.set_default(Position::row(2)), Position::row(2));
        assert!(!anchor.has_non_default_anchor());
        anchor.set(Position::row(5));
        assert_eq!(anchor.set_default(Position::row(1)), Position::row(5));
        assert!(anchor.has_non_default_anchor());
    }

    #[test]
    fn test_anchor_follows_insertions() {
        let mut anchor = AnchorTracker::new();
        anchor.set(Position::row(3));
        anchor.rebase(&RowChange::Inserted { at: 0, count: 2 });
        assert_eq!(anchor.anchor(), Some(Position::row(5)));
        anchor.clamp(0);
        assert_eq!(anchor.anchor(), None);
    }
}
