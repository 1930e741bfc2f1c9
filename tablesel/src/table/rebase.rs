//! Keeping focus, anchor and selection consistent across structural changes.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, warn};

use crate::position::{CellColumn, Position};
use crate::rows::{Rebased, RowChange, RowList, RowSpace, TableRow};

use super::state::{Observed, Table};

impl<R: RowSpace> Table<R> {
    /// Bring focus, anchor and selection in line with a batch of row
    /// changes the row space has already applied.
    ///
    /// Changes are processed in order, each in the coordinates left by the
    /// previous one. A batch containing [`RowChange::Replaced`] is resolved
    /// purely by item identity. One event batch is emitted for the whole
    /// call.
    pub fn on_rows_changed(&mut self, changes: &[RowChange]) {
        if changes.is_empty() {
            return;
        }
        debug!(
            "{} row change(s), {} row(s) now",
            changes.len(),
            self.rows.row_count()
        );

        let observed = self.observed.clone();
        if changes.iter().any(RowChange::is_replacement) {
            self.rebase_by_identity(&observed);
        } else if !permutations_fit(changes, self.rows.row_count()) {
            warn!("Malformed permutation in row change batch, following items instead");
            self.rebase_by_identity(&observed);
        } else {
            self.rebase_by_index(changes, &observed);
        }
        self.settle();
    }

    fn rebase_by_index(&mut self, changes: &[RowChange], observed: &Observed<R::Item>) {
        let mut focus_lost = false;
        for change in changes {
            if let Some(Rebased::Removed { .. }) = self.focus.rebase(change) {
                focus_lost = true;
            }
            self.anchor.rebase(change);
        }

        self.selection.rebase_with(|pos| {
            let mut row = pos.row;
            for change in changes {
                row = change.rebase(row).moved()?;
            }
            Some(pos.with_row(row))
        });

        // A removed focus row prefers its item's new home, if it has one.
        if focus_lost
            && let Some(focus) = self.focus.focused()
            && let Some(row) = observed
                .focused_item
                .as_ref()
                .and_then(|item| self.rows.index_of(item))
        {
            self.focus.focus(focus.with_row(row), self.rows.row_count());
        }
    }

    fn rebase_by_identity(&mut self, observed: &Observed<R::Item>) {
        let rows = &self.rows;
        let locate = |item: &Option<R::Item>| item.as_ref().and_then(|i| rows.index_of(i));

        if let (Some(focus), Some(row)) = (observed.focus, locate(&observed.focused_item)) {
            self.focus.focus(focus.with_row(row), rows.row_count());
        }
        match locate(&observed.anchor_item) {
            Some(row) => self.anchor.relocate(row),
            None => self.anchor.clear(),
        }

        let moves: HashMap<Position, Position> = observed
            .cells
            .iter()
            .filter_map(|(pos, item)| locate(item).map(|row| (*pos, pos.with_row(row))))
            .collect();
        self.selection.rebase_with(|pos| moves.get(&pos).copied());
    }

    /// Clamp everything into the new row count and emit the batch.
    fn settle(&mut self) {
        let n = self.rows.row_count();
        if n == 0 {
            self.selection.clear();
            self.focus.reset();
            self.anchor.clear();
        } else {
            let before = self.selection.cells().len();
            self.selection.rebase_with(|pos| (pos.row < n).then_some(pos));
            let dropped = before - self.selection.cells().len();
            if dropped > 0 {
                warn!("Dropped {} selected cell(s) past the last row", dropped);
            }
            self.focus.clamp(n);
            self.anchor.clamp(n);
            if !self.selection.cell_selection_enabled() {
                self.focus.set_column(CellColumn::RowWide);
            }
        }
        self.extension_base = None;
        self.finish();
    }
}

/// Whether every permutation in the batch is a bijection over the rows
/// present at its step. Counts are replayed backwards from `final_count`.
fn permutations_fit(changes: &[RowChange], final_count: usize) -> bool {
    let delta = |change: &RowChange| -> isize {
        match change {
            RowChange::Inserted { count, .. } | RowChange::Expanded { count, .. } => {
                *count as isize
            }
            RowChange::Removed { count, .. } | RowChange::Collapsed { count, .. } => {
                -(*count as isize)
            }
            RowChange::Permuted { .. } | RowChange::Replaced => 0,
        }
    };
    let mut rows = final_count as isize - changes.iter().map(delta).sum::<isize>();
    for change in changes {
        if let RowChange::Permuted { mapping } = change {
            if mapping.len() as isize != rows {
                return false;
            }
            let mut seen = vec![false; mapping.len()];
            for &new in mapping {
                match seen.get_mut(new) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return false,
                }
            }
        }
        rows += delta(change);
    }
    true
}

// -----------------------------------------------------------------------------
// RowList conveniences: mutate and notify in one call
// -----------------------------------------------------------------------------

impl<T: TableRow> Table<RowList<T>> {
    /// Append a row.
    pub fn push_row(&mut self, row: T) {
        let change = self.rows.push(row);
        self.on_rows_changed(&[change]);
    }

    /// Insert rows at `at`.
    pub fn insert_rows(&mut self, at: usize, rows: Vec<T>) {
        let change = self.rows.insert(at, rows);
        self.on_rows_changed(&[change]);
    }

    /// Remove rows by their current indices.
    pub fn remove_rows(&mut self, indices: &[usize]) {
        let changes = self.rows.remove_indices(indices);
        self.on_rows_changed(&changes);
    }

    /// Stable-sort the rows.
    pub fn sort_rows_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let change = self.rows.sort_by(compare);
        self.on_rows_changed(&[change]);
    }

    /// Replace every row. Selection follows items that are still present.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        let change = self.rows.set_rows(rows);
        self.on_rows_changed(&[change]);
    }
}
