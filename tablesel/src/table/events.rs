//! Change events and keyboard dispatch for [`Table`].

use log::{debug, trace};

use crate::columns::Orientation;
use crate::input::{Action, GestureContext, GestureInterpreter, KeyCombo};
use crate::position::{CellColumn, Position};
use crate::rows::RowSpace;

use super::state::Table;

// =============================================================================
// Table Events
// =============================================================================

/// A change the host may want to react to (re-render, scroll into view,
/// update a status line).
///
/// Each public mutating call pushes at most one event of each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The focused position changed.
    FocusChange {
        previous: Option<Position>,
        current: Option<Position>,
    },
    /// Cells entered or left the selection. `removed` positions are as
    /// they were before the change; `added` positions as they are after.
    SelectionChange {
        added: Vec<Position>,
        removed: Vec<Position>,
    },
    /// Selected cells kept their item but now live at another index, after
    /// a structural change. Pairs are `(before, after)`.
    SelectionMoved { moved: Vec<(Position, Position)> },
    /// The row of the most recently selected cell changed.
    SelectedIndexChange {
        previous: Option<usize>,
        current: Option<usize>,
    },
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Key was not a table gesture, try other handlers.
    Ignored,
    /// Key was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

// =============================================================================
// Key Dispatch
// =============================================================================

impl<R: RowSpace> Table<R> {
    /// Handle a key using the table's own traversal direction.
    pub fn on_key(&mut self, combo: &KeyCombo) -> EventResult {
        let orientation = self.columns.orientation();
        self.handle_key(combo, orientation)
    }

    /// Handle a raw terminal key event. Releases and keys with no table
    /// gesture are ignored.
    pub fn on_key_event(&mut self, event: crossterm::event::KeyEvent) -> EventResult {
        if event.kind == crossterm::event::KeyEventKind::Release {
            return EventResult::Ignored;
        }
        match KeyCombo::try_from(event) {
            Ok(combo) => self.on_key(&combo),
            Err(e) => {
                trace!("Ignoring key: {}", e);
                EventResult::Ignored
            }
        }
    }

    /// Interpret a key combination and apply the resulting actions as one
    /// batch.
    pub fn handle_key(&mut self, combo: &KeyCombo, orientation: Orientation) -> EventResult {
        let columns = self.columns.ids();
        let ctx = GestureContext {
            row_count: self.rows.row_count(),
            columns: &columns,
            focus: self.focus.focused(),
            anchor: self.anchor.anchor(),
            mode: self.selection.mode(),
            cell_selection: self.selection.cell_selection_enabled(),
            page_size: self.page_size,
            shortcut: self.config.shortcut,
            orientation,
        };

        let Some(actions) = GestureInterpreter::interpret(&ctx, combo) else {
            trace!("No gesture for {}", combo);
            return EventResult::Ignored;
        };
        debug!("{} -> {} action(s)", combo, actions.len());

        self.apply(actions);
        self.finish();
        EventResult::Consumed
    }

    fn apply(&mut self, actions: Vec<Action>) {
        let row_count = self.rows.row_count();
        let mut preserving = false;

        for action in actions {
            trace!("Applying {:?}", action);
            match action {
                Action::MoveFocus(pos) => {
                    self.focus.focus(pos, row_count);
                }
                Action::ClearAndSelect(pos) => {
                    self.selection.clear_and_select(pos);
                    self.anchor.set(self.selection.normalize(pos));
                }
                Action::ToggleSelect(pos) => {
                    self.selection.toggle(pos);
                }
                Action::ExtendSelectionTo {
                    from,
                    to,
                    preserve_base,
                } => {
                    let range = self.range_cells(from, to);
                    if preserve_base {
                        preserving = true;
                        let base = self
                            .extension_base
                            .get_or_insert_with(|| self.selection.cells().as_slice().to_vec())
                            .clone();
                        self.selection.replace_with(base.into_iter().chain(range));
                    } else {
                        self.selection.replace_with(range);
                    }
                }
                Action::SelectAll => self.select_all_cells(),
                Action::SetAnchor(pos) => {
                    self.anchor.set(self.selection.normalize(pos));
                    // A new anchor starts a new extension sequence.
                    self.extension_base = None;
                }
                Action::DefaultAnchor(pos) => {
                    self.anchor.set_default(self.selection.normalize(pos));
                }
            }
        }

        if !preserving {
            self.extension_base = None;
        }
    }

    /// Cells between two positions, walking from `from` to `to`.
    ///
    /// In row mode this is the inclusive row range. In cell mode it is the
    /// rectangular closure of both cells; a row-wide end takes the column
    /// of the other end.
    fn range_cells(&self, from: Position, to: Position) -> Vec<Position> {
        let rows: Vec<usize> = if from.row <= to.row {
            (from.row..=to.row).collect()
        } else {
            (to.row..=from.row).rev().collect()
        };
        if !self.selection.cell_selection_enabled() {
            return rows.into_iter().map(Position::row).collect();
        }

        let ids = self.columns.ids();
        let index = |column: CellColumn| column.id().and_then(|id| self.columns.index_of(id));
        let columns: Vec<CellColumn> = match (index(from.column), index(to.column)) {
            (Some(a), Some(b)) if a <= b => ids[a..=b].iter().copied().map(CellColumn::Column).collect(),
            (Some(a), Some(b)) => ids[b..=a].iter().rev().copied().map(CellColumn::Column).collect(),
            (Some(i), None) | (None, Some(i)) => vec![CellColumn::Column(ids[i])],
            (None, None) => vec![CellColumn::RowWide],
        };

        rows.into_iter()
            .flat_map(|row| columns.iter().map(move |&c| Position::new(row, c)))
            .collect()
    }
}
