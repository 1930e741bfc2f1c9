//! Table state and the programmatic selection/focus API.

use std::collections::{HashMap, HashSet};

use crate::anchor::AnchorTracker;
use crate::columns::{Column, ColumnSpace, Orientation};
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::focus::FocusModel;
use crate::position::{CellColumn, ColumnId, Position};
use crate::rows::RowSpace;
use crate::selection::{SelectionMode, SelectionModel};

use super::events::TableEvent;

/// What the host last observed. Diffed after every operation to produce
/// the event batch, and used to recover item identity across structural
/// changes.
#[derive(Debug, Clone)]
pub(super) struct Observed<I> {
    pub focus: Option<Position>,
    pub focused_item: Option<I>,
    pub anchor_item: Option<I>,
    pub selected_index: Option<usize>,
    pub cells: Vec<(Position, Option<I>)>,
}

impl<I> Default for Observed<I> {
    fn default() -> Self {
        Self {
            focus: None,
            focused_item: None,
            anchor_item: None,
            selected_index: None,
            cells: Vec::new(),
        }
    }
}

/// Identity of a selected cell that survives re-indexing.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a, I> {
    Item(&'a I, CellColumn),
    Orphan(Position),
}

fn cell_keys<I: Eq + std::hash::Hash>(cells: &[(Position, Option<I>)]) -> HashSet<CellKey<'_, I>> {
    cells.iter().map(|(pos, item)| cell_key(pos, item)).collect()
}

fn cell_key<'a, I>(pos: &Position, item: &'a Option<I>) -> CellKey<'a, I> {
    match item {
        Some(item) => CellKey::Item(item, pos.column),
        None => CellKey::Orphan(*pos),
    }
}

/// Selection, focus and anchor state for a table over a row space.
///
/// `Table<R>` owns:
/// - The row space (`R`) and the column space
/// - The selected-cell set, focus and anchor
/// - A queue of change events for the host to drain
///
/// Every public mutating call leaves the three pieces of state consistent
/// and pushes at most one event of each kind.
#[derive(Debug)]
pub struct Table<R: RowSpace> {
    pub(super) rows: R,
    pub(super) columns: ColumnSpace,
    pub(super) config: TableConfig,
    pub(super) page_size: usize,
    pub(super) selection: SelectionModel,
    pub(super) focus: FocusModel,
    pub(super) anchor: AnchorTracker,
    /// Selection at the start of the current Shift+Shortcut sequence.
    pub(super) extension_base: Option<Vec<Position>>,
    pub(super) observed: Observed<R::Item>,
    pub(super) events: Vec<TableEvent>,
    pub(super) dirty: bool,
}

impl<R: RowSpace> Table<R> {
    /// Create a table with the default configuration. The traversal
    /// direction is taken from `columns`.
    pub fn new(rows: R, columns: ColumnSpace) -> Self {
        let config = TableConfig::default().orientation(columns.orientation());
        Self::build(rows, columns, config)
    }

    /// Create a table from a validated configuration.
    pub fn with_config(
        rows: R,
        mut columns: ColumnSpace,
        config: TableConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        columns.set_orientation(config.orientation);
        Ok(Self::build(rows, columns, config))
    }

    fn build(rows: R, columns: ColumnSpace, config: TableConfig) -> Self {
        let mut focus = FocusModel::new();
        if rows.row_count() > 0 {
            focus.focus(Position::row(0), rows.row_count());
        }
        let mut table = Self {
            rows,
            columns,
            page_size: config.page_size.max(1),
            selection: SelectionModel::new(config.selection_mode, config.cell_selection),
            focus,
            anchor: AnchorTracker::new(),
            extension_base: None,
            observed: Observed::default(),
            events: Vec::new(),
            dirty: false,
            config,
        };
        table.observed = table.observe();
        table
    }

    // -------------------------------------------------------------------------
    // Collaborators
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> &R {
        &self.rows
    }

    /// Mutable access to the row space.
    ///
    /// Report every change made through this with
    /// [`on_rows_changed`](Self::on_rows_changed).
    pub fn rows_mut(&mut self) -> &mut R {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.row_count()
    }

    pub fn columns(&self) -> &ColumnSpace {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Replace the column set. Selected cells in columns that no longer
    /// exist are dropped; a focus or anchor in such a column falls back to
    /// the whole row.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns.set_columns(columns);
        let space = &self.columns;
        let survives = |column: CellColumn| column.id().is_none_or(|id| space.contains(id));

        self.selection
            .rebase_with(|pos| survives(pos.column).then_some(pos));
        if let Some(focus) = self.focus.focused()
            && !survives(focus.column)
        {
            self.focus.set_column(CellColumn::RowWide);
        }
        if let Some(anchor) = self.anchor.anchor()
            && !survives(anchor.column)
        {
            self.anchor.set_column(CellColumn::RowWide);
        }
        self.extension_base = None;
        self.finish();
    }

    pub fn orientation(&self) -> Orientation {
        self.columns.orientation()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.columns.set_orientation(orientation);
        self.config.orientation = orientation;
    }

    /// Rows moved by PageUp/PageDown.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set the page size from the current viewport height.
    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    // -------------------------------------------------------------------------
    // Mode
    // -------------------------------------------------------------------------

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Switching to [`SelectionMode::Single`] keeps only the most recently
    /// selected cell.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
        self.config.selection_mode = mode;
        self.extension_base = None;
        self.finish();
    }

    pub fn is_cell_selection_enabled(&self) -> bool {
        self.selection.cell_selection_enabled()
    }

    /// Switch between row and cell granularity. Clears the selection.
    pub fn set_cell_selection_enabled(&mut self, enabled: bool) {
        self.selection.set_cell_selection_enabled(enabled);
        self.config.cell_selection = enabled;
        if !enabled {
            self.focus.set_column(CellColumn::RowWide);
            self.anchor.set_column(CellColumn::RowWide);
        }
        self.extension_base = None;
        self.finish();
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Select a row, or a cell when `column` is given.
    ///
    /// With cell selection enabled and no column, every cell of the row is
    /// selected. Focus moves to the selected position and the anchor is
    /// set there. Out-of-range rows and unknown columns are ignored.
    pub fn select(&mut self, row: usize, column: Option<ColumnId>) {
        let Some(targets) = self.targets(row, column) else {
            return;
        };
        for &pos in &targets {
            self.selection.select(pos);
        }
        if let Some(&last) = targets.last() {
            self.focus.focus(last, self.rows.row_count());
            self.anchor.set(last);
        }
        self.extension_base = None;
        self.finish();
    }

    /// Select the first row holding `item`. Returns false if no row does.
    pub fn select_item(&mut self, item: &R::Item) -> bool {
        match self.rows.index_of(item) {
            Some(row) => {
                self.select(row, None);
                true
            }
            None => false,
        }
    }

    /// Clear the selection, then select a row or cell.
    pub fn clear_and_select(&mut self, row: usize, column: Option<ColumnId>) {
        let Some(targets) = self.targets(row, column) else {
            return;
        };
        self.selection.replace_with(targets.iter().copied());
        if let Some(&last) = targets.last() {
            self.focus.focus(last, self.rows.row_count());
            self.anchor.set(last);
        }
        self.extension_base = None;
        self.finish();
    }

    /// Deselect everything. Focus and anchor stay where they are.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.extension_base = None;
        self.finish();
    }

    /// Deselect a row, or one cell. With cell selection enabled and no
    /// column, every cell of the row is deselected.
    pub fn clear_selection_at(&mut self, row: usize, column: Option<ColumnId>) {
        if row >= self.rows.row_count() {
            return;
        }
        let Some(column) = self.resolve_column(column) else {
            return;
        };
        self.selection.deselect(Position::new(row, column));
        self.extension_base = None;
        self.finish();
    }

    /// Select rows walking from `start` toward `end`, exclusive of `end`.
    ///
    /// Works in either direction. Focus lands on the last row selected. In
    /// single mode only that row remains selected.
    pub fn select_range(&mut self, start: usize, end: usize) {
        let n = self.rows.row_count();
        let path: Vec<usize> = if start <= end {
            (start..end.min(n)).collect()
        } else {
            (end + 1..=start).rev().filter(|&r| r < n).collect()
        };
        if path.is_empty() {
            return;
        }

        let targets: Vec<Position> = path.into_iter().flat_map(|r| self.row_cells(r)).collect();
        for &pos in &targets {
            self.selection.select(pos);
        }
        if let Some(&last) = targets.last() {
            self.focus.focus(last, n);
            self.anchor.set_default(last);
        }
        self.extension_base = None;
        self.finish();
    }

    /// Select the inclusive rectangle between two cells, row-major.
    ///
    /// In row mode the columns are ignored and the rows of the rectangle
    /// are selected whole. Focus lands on the end cell.
    pub fn select_cell_range(
        &mut self,
        start_row: usize,
        start_column: ColumnId,
        end_row: usize,
        end_column: ColumnId,
    ) {
        let n = self.rows.row_count();
        if n == 0 {
            return;
        }
        let span = if self.selection.cell_selection_enabled() {
            let (Some(c0), Some(c1)) = (
                self.columns.index_of(start_column),
                self.columns.index_of(end_column),
            ) else {
                return;
            };
            Some((c0.min(c1), c0.max(c1)))
        } else {
            None
        };
        let (r0, r1) = (start_row.min(n - 1), end_row.min(n - 1));
        let column_ids = self.columns.ids();

        let mut targets = Vec::new();
        for row in r0.min(r1)..=r0.max(r1) {
            match span {
                Some((first, last)) => targets.extend(
                    column_ids[first..=last]
                        .iter()
                        .map(|&id| Position::cell(row, id)),
                ),
                None => targets.push(Position::row(row)),
            }
        }

        for &pos in &targets {
            self.selection.select(pos);
        }
        let end = self
            .selection
            .normalize(Position::cell(r1, end_column));
        self.focus.focus(end, n);
        self.anchor.set_default(end);
        self.extension_base = None;
        self.finish();
    }

    /// Select every row, or every cell with cell selection enabled.
    ///
    /// No-op on an empty table or in single mode. Focus and anchor are
    /// left alone.
    pub fn select_all(&mut self) {
        self.select_all_cells();
        self.extension_base = None;
        self.finish();
    }

    pub(super) fn select_all_cells(&mut self) {
        let n = self.rows.row_count();
        if n == 0 || self.selection.mode() == SelectionMode::Single {
            return;
        }
        for row in 0..n {
            for pos in self.row_cells(row) {
                self.selection.select(pos);
            }
        }
    }

    /// Whether a row or cell is selected.
    ///
    /// In row mode a selected row answers true for every column. With cell
    /// selection enabled and no column, true only when every column of the
    /// row is selected.
    pub fn is_selected(&self, row: usize, column: Option<ColumnId>) -> bool {
        if !self.selection.cell_selection_enabled() {
            return self.selection.contains(&Position::row(row));
        }
        match column {
            Some(id) => self.selection.contains(&Position::cell(row, id)),
            None if self.columns.is_empty() => self.selection.contains(&Position::row(row)),
            None => self
                .row_cells(row)
                .iter()
                .all(|pos| self.selection.contains(pos)),
        }
    }

    /// Selected cells in selection order.
    pub fn selected_cells(&self) -> &[Position] {
        self.selection.cells().as_slice()
    }

    /// Distinct selected rows, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.cells().rows()
    }

    /// Items of the selected rows, in row order.
    pub fn selected_items(&self) -> Vec<R::Item> {
        self.selected_indices()
            .into_iter()
            .filter_map(|row| self.rows.item_at(row))
            .collect()
    }

    /// Row of the most recently selected cell.
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected_index()
    }

    pub fn selected_item(&self) -> Option<R::Item> {
        self.selected_index().and_then(|row| self.rows.item_at(row))
    }

    // -------------------------------------------------------------------------
    // Focus and anchor
    // -------------------------------------------------------------------------

    /// Focus a row or cell. The row is clamped into range; unknown columns
    /// are ignored.
    pub fn focus(&mut self, row: usize, column: Option<ColumnId>) {
        let Some(column) = self.resolve_column(column) else {
            return;
        };
        self.focus
            .focus(Position::new(row, column), self.rows.row_count());
        self.extension_base = None;
        self.finish();
    }

    /// Whether a row (any column when `column` is `None`) or a cell has focus.
    pub fn is_focused(&self, row: usize, column: Option<ColumnId>) -> bool {
        self.focus
            .is_focused(row, column.map(CellColumn::Column))
    }

    pub fn focused_cell(&self) -> Option<Position> {
        self.focus.focused()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus.focused_index()
    }

    pub fn focused_item(&self) -> Option<R::Item> {
        self.focused_index().and_then(|row| self.rows.item_at(row))
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor.anchor()
    }

    /// True once an explicit anchor has been set (by a select or a
    /// discontinuous toggle) rather than picked up by a range gesture.
    pub fn has_non_default_anchor(&self) -> bool {
        self.anchor.has_non_default_anchor()
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Take the queued change events.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if state has changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// The column half of a position for the current granularity, or
    /// `None` for a column the table does not have.
    fn resolve_column(&self, column: Option<ColumnId>) -> Option<CellColumn> {
        if !self.selection.cell_selection_enabled() {
            return Some(CellColumn::RowWide);
        }
        match column {
            None => Some(CellColumn::RowWide),
            Some(id) if self.columns.contains(id) => Some(CellColumn::Column(id)),
            Some(_) => None,
        }
    }

    /// Every selectable position of a row.
    pub(super) fn row_cells(&self, row: usize) -> Vec<Position> {
        if !self.selection.cell_selection_enabled() || self.columns.is_empty() {
            return vec![Position::row(row)];
        }
        self.columns
            .ids()
            .into_iter()
            .map(|id| Position::cell(row, id))
            .collect()
    }

    /// Positions a select call touches: the cell itself, or the whole row
    /// broken into cells when no column is named in cell mode.
    fn targets(&self, row: usize, column: Option<ColumnId>) -> Option<Vec<Position>> {
        if row >= self.rows.row_count() {
            return None;
        }
        match self.resolve_column(column)? {
            CellColumn::RowWide => Some(self.row_cells(row)),
            column => Some(vec![Position::new(row, column)]),
        }
    }

    pub(super) fn observe(&self) -> Observed<R::Item> {
        let focus = self.focus.focused();
        Observed {
            focus,
            focused_item: focus.and_then(|f| self.rows.item_at(f.row)),
            anchor_item: self.anchor.anchor().and_then(|a| self.rows.item_at(a.row)),
            selected_index: self.selection.selected_index(),
            cells: self
                .selection
                .cells()
                .iter()
                .map(|pos| (*pos, self.rows.item_at(pos.row)))
                .collect(),
        }
    }

    /// Diff against what the host last observed and queue one event per
    /// changed observable.
    pub(super) fn finish(&mut self) {
        let observed = self.observe();
        let previous = std::mem::replace(&mut self.observed, observed);
        let current = &self.observed;
        let before = self.events.len();

        if previous.focus != current.focus {
            self.events.push(TableEvent::FocusChange {
                previous: previous.focus,
                current: current.focus,
            });
        }

        let old_keys = cell_keys(&previous.cells);
        let new_keys = cell_keys(&current.cells);
        let removed: Vec<Position> = previous
            .cells
            .iter()
            .filter(|(pos, item)| !new_keys.contains(&cell_key(pos, item)))
            .map(|(pos, _)| *pos)
            .collect();
        let added: Vec<Position> = current
            .cells
            .iter()
            .filter(|(pos, item)| !old_keys.contains(&cell_key(pos, item)))
            .map(|(pos, _)| *pos)
            .collect();
        if !added.is_empty() || !removed.is_empty() {
            self.events
                .push(TableEvent::SelectionChange { added, removed });
        }

        let before_moves: HashMap<CellKey<'_, R::Item>, Position> = previous
            .cells
            .iter()
            .map(|(pos, item)| (cell_key(pos, item), *pos))
            .collect();
        let moved: Vec<(Position, Position)> = current
            .cells
            .iter()
            .filter_map(|(pos, item)| {
                let old = before_moves.get(&cell_key(pos, item))?;
                (old != pos).then_some((*old, *pos))
            })
            .collect();
        if !moved.is_empty() {
            self.events.push(TableEvent::SelectionMoved { moved });
        }

        if previous.selected_index != current.selected_index {
            self.events.push(TableEvent::SelectedIndexChange {
                previous: previous.selected_index,
                current: current.selected_index,
            });
        }

        if self.events.len() > before {
            self.dirty = true;
        }
    }
}
