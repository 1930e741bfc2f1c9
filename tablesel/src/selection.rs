//! Selection state.
//!
//! The selected-cell set is the single source of truth. Row indices, items
//! and the lead (most recently selected) row are all projections of it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::position::{CellColumn, Position};

/// Selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one cell (or row) selected.
    Single,
    /// Any number of cells (or rows) selected.
    #[default]
    Multiple,
}

/// Ordered, duplicate-free set of positions with O(1) membership.
#[derive(Debug, Clone, Default)]
pub struct SelectedCells {
    /// Positions in selection order.
    order: Vec<Position>,
    /// Membership index.
    members: HashSet<Position>,
    /// Number of selected cells per row.
    rows: HashMap<usize, usize>,
}

impl SelectedCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.members.contains(pos)
    }

    /// Whether any cell of `row` is selected.
    pub fn contains_row(&self, row: usize) -> bool {
        self.rows.contains_key(&row)
    }

    /// Add a position. Returns false if it was already present.
    pub fn insert(&mut self, pos: Position) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.order.push(pos);
        *self.rows.entry(pos.row).or_insert(0) += 1;
        true
    }

    /// Remove a position. Returns false if it was not present.
    pub fn remove(&mut self, pos: &Position) -> bool {
        if !self.members.remove(pos) {
            return false;
        }
        if let Some(index) = self.order.iter().rposition(|p| p == pos) {
            self.order.remove(index);
        }
        if let Some(count) = self.rows.get_mut(&pos.row) {
            *count -= 1;
            if *count == 0 {
                self.rows.remove(&pos.row);
            }
        }
        true
    }

    /// Keep only positions matching `keep`. Returns how many were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Position) -> bool,
    {
        let before = self.order.len();
        let (kept, dropped): (Vec<Position>, Vec<Position>) =
            self.order.drain(..).partition(|p| keep(p));
        for pos in &dropped {
            self.members.remove(pos);
            if let Some(count) = self.rows.get_mut(&pos.row) {
                *count -= 1;
                if *count == 0 {
                    self.rows.remove(&pos.row);
                }
            }
        }
        self.order = kept;
        before - self.order.len()
    }

    /// Remove everything. Returns the removed positions in selection order.
    pub fn clear(&mut self) -> Vec<Position> {
        self.members.clear();
        self.rows.clear();
        std::mem::take(&mut self.order)
    }

    /// Positions in selection order.
    pub fn as_slice(&self) -> &[Position] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.order.iter()
    }

    pub fn last(&self) -> Option<&Position> {
        self.order.last()
    }

    /// Distinct selected rows, ascending.
    pub fn rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.rows.keys().copied().collect();
        rows.sort_unstable();
        rows
    }
}

/// Owns the selected-cell set, the selection mode and the granularity.
///
/// All positions handed to the model are assumed to be in range; the table
/// validates rows and columns before calling in.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    mode: SelectionMode,
    cell_selection: bool,
    cells: SelectedCells,
    /// Most recently selected position (drives the selected index).
    lead: Option<Position>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(SelectionMode::Multiple, false)
    }
}

impl SelectionModel {
    pub fn new(mode: SelectionMode, cell_selection: bool) -> Self {
        Self {
            mode,
            cell_selection,
            cells: SelectedCells::new(),
            lead: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode. Switching to single keeps only the most
    /// recently selected cell. Returns true if the selection changed.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        self.mode = mode;
        if mode == SelectionMode::Single && self.cells.len() > 1 {
            let keep = self.lead.or_else(|| self.cells.last().copied());
            self.cells.clear();
            if let Some(pos) = keep {
                self.cells.insert(pos);
            }
            self.lead = keep;
            return true;
        }
        false
    }

    pub fn cell_selection_enabled(&self) -> bool {
        self.cell_selection
    }

    /// Switch granularity. Any existing selection is dropped because its
    /// positions no longer have the right shape. Returns true if anything
    /// was deselected.
    pub fn set_cell_selection_enabled(&mut self, enabled: bool) -> bool {
        if self.cell_selection == enabled {
            return false;
        }
        self.cell_selection = enabled;
        self.clear()
    }

    /// Force a position into the shape the current granularity allows.
    pub fn normalize(&self, pos: Position) -> Position {
        if self.cell_selection {
            pos
        } else {
            pos.with_column(CellColumn::RowWide)
        }
    }

    pub fn cells(&self) -> &SelectedCells {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn lead(&self) -> Option<Position> {
        self.lead
    }

    /// Row of the most recently selected cell.
    pub fn selected_index(&self) -> Option<usize> {
        self.lead.map(|p| p.row)
    }

    /// Exact membership of a (normalized) position.
    pub fn contains(&self, pos: &Position) -> bool {
        self.cells.contains(&self.normalize(*pos))
    }

    /// Select a position. In single mode this replaces the selection.
    /// Returns true if the selected set changed.
    pub fn select(&mut self, pos: Position) -> bool {
        let pos = self.normalize(pos);
        let mut changed = false;
        if self.mode == SelectionMode::Single {
            changed |= self.cells.retain(|p| *p == pos) > 0;
        }
        changed |= self.cells.insert(pos);
        self.lead = Some(pos);
        changed
    }

    /// Clear, then select a single position.
    pub fn clear_and_select(&mut self, pos: Position) -> bool {
        let pos = self.normalize(pos);
        let already_alone = self.cells.len() == 1 && self.cells.contains(&pos);
        if already_alone {
            self.lead = Some(pos);
            return false;
        }
        self.cells.clear();
        self.cells.insert(pos);
        self.lead = Some(pos);
        true
    }

    /// Deselect a position. A row-wide position in cell mode deselects every
    /// cell in the row. Returns true if anything was removed.
    pub fn deselect(&mut self, pos: Position) -> bool {
        let removed = if self.cell_selection && pos.column.is_row_wide() {
            self.cells.retain(|p| p.row != pos.row) > 0
        } else {
            self.cells.remove(&self.normalize(pos))
        };
        if removed && self.lead.is_some_and(|lead| !self.cells.contains(&lead)) {
            self.lead = self.cells.last().copied();
        }
        removed
    }

    /// Toggle membership. Returns true if the position is now selected.
    pub fn toggle(&mut self, pos: Position) -> bool {
        let pos = self.normalize(pos);
        if self.cells.contains(&pos) {
            self.deselect(pos);
            false
        } else {
            self.select(pos);
            true
        }
    }

    /// Deselect everything. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        self.lead = None;
        !self.cells.clear().is_empty()
    }

    /// Replace the whole selection with `positions`, preserving their order.
    ///
    /// Positions already selected keep their place in the selection order
    /// so an unchanged cell is never reported as removed and re-added.
    pub fn replace_with<I>(&mut self, positions: I) -> bool
    where
        I: IntoIterator<Item = Position>,
    {
        let wanted: Vec<Position> = positions.into_iter().map(|p| self.normalize(p)).collect();
        let wanted_set: HashSet<Position> = wanted.iter().copied().collect();

        let mut changed = self.cells.retain(|p| wanted_set.contains(p)) > 0;

        if self.mode == SelectionMode::Single {
            match wanted.last().copied() {
                Some(last) => changed |= self.clear_and_select(last),
                None => self.lead = None,
            }
            return changed;
        }

        for p in &wanted {
            changed |= self.cells.insert(*p);
        }
        self.lead = wanted.last().copied().or_else(|| self.cells.last().copied());
        changed
    }

    /// Rebuild the selection by passing every position (and the lead)
    /// through `rebase`. Positions mapped to `None` are dropped.
    pub fn rebase_with<F>(&mut self, mut rebase: F)
    where
        F: FnMut(Position) -> Option<Position>,
    {
        let old: Vec<Position> = self.cells.clear();
        for pos in old {
            if let Some(new) = rebase(pos) {
                self.cells.insert(new);
            }
        }
        self.lead = self
            .lead
            .and_then(&mut rebase)
            .filter(|p| self.cells.contains(p))
            .or_else(|| self.cells.last().copied());
        if self.mode == SelectionMode::Single && self.cells.len() > 1 {
            self.set_mode(SelectionMode::Single);
        }
    }
}
