//! Keyboard gesture interpretation.
//!
//! [`GestureInterpreter::interpret`] is a pure function: it reads a snapshot
//! of the table state and a key combination and returns the primitive
//! [`Action`]s to apply. The table applies them as one batch.

use crate::columns::Orientation;
use crate::config::ShortcutKey;
use crate::input::keys::{Key, KeyCombo};
use crate::position::{CellColumn, ColumnId, Position};
use crate::selection::SelectionMode;

/// Snapshot of the state a gesture depends on.
#[derive(Debug, Clone)]
pub struct GestureContext<'a> {
    pub row_count: usize,
    /// Column ids in visible (model) order.
    pub columns: &'a [ColumnId],
    pub focus: Option<Position>,
    pub anchor: Option<Position>,
    pub mode: SelectionMode,
    pub cell_selection: bool,
    pub page_size: usize,
    pub shortcut: ShortcutKey,
    pub orientation: Orientation,
}

impl GestureContext<'_> {
    /// The focused cell in the shape the current granularity uses.
    ///
    /// In cell mode a row-wide focus resolves to the first column.
    pub fn focus_cell(&self) -> Position {
        let focus = self.focus.unwrap_or(Position::row(0));
        if !self.cell_selection {
            return focus.with_column(CellColumn::RowWide);
        }
        match (focus.column, self.columns.first()) {
            (CellColumn::RowWide, Some(&first)) => focus.with_column(CellColumn::Column(first)),
            _ => focus,
        }
    }

    fn column_index(&self, column: CellColumn) -> Option<usize> {
        let id = column.id()?;
        self.columns.iter().position(|&c| c == id)
    }
}

/// A primitive state change produced by a gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the focus.
    MoveFocus(Position),
    /// Clear the selection, select one cell and anchor there.
    ClearAndSelect(Position),
    /// Flip one cell's membership.
    ToggleSelect(Position),
    /// Replace the selection with the range between `from` and `to`.
    /// With `preserve_base` the selection present when the extension
    /// sequence started is kept underneath the range.
    ExtendSelectionTo {
        from: Position,
        to: Position,
        preserve_base: bool,
    },
    /// Select every row (or every cell).
    SelectAll,
    /// Set an explicit anchor.
    SetAnchor(Position),
    /// Set a default anchor if none exists.
    DefaultAnchor(Position),
}

/// Which modifier family a gesture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Plain,
    Shift,
    Shortcut,
    ShiftShortcut,
}

/// Stateless key → action mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureInterpreter;

impl GestureInterpreter {
    /// Map a key combination to actions.
    ///
    /// Returns `None` when the combination is not a table gesture or cannot
    /// move anywhere (empty table, horizontal move past an edge, modified
    /// move past an edge).
    pub fn interpret(ctx: &GestureContext<'_>, combo: &KeyCombo) -> Option<Vec<Action>> {
        if ctx.row_count == 0 || combo.modifiers.has_foreign(ctx.shortcut) {
            return None;
        }

        let shortcut = combo.modifiers.shortcut(ctx.shortcut);
        // Range gestures degrade to their plain form in single mode.
        let shift = combo.modifiers.shift && ctx.mode == SelectionMode::Multiple;
        let family = match (shift, shortcut) {
            (false, false) => Family::Plain,
            (true, false) => Family::Shift,
            (false, true) => Family::Shortcut,
            (true, true) => Family::ShiftShortcut,
        };

        if combo.key.is_space() {
            return Some(Self::space(ctx, family));
        }

        match combo.key {
            Key::Char('a') | Key::Char('A') => {
                if shortcut && ctx.mode == SelectionMode::Multiple {
                    Some(vec![Action::SelectAll])
                } else {
                    None
                }
            }
            Key::Char(_) => None,
            Key::Left | Key::Right => {
                let target = Self::horizontal_target(ctx, combo.key)?;
                Some(Self::navigate(ctx, family, target))
            }
            _ => {
                let current = ctx.focus_cell();
                let target = Self::vertical_target(ctx, combo.key, current.row);
                if target != current.row || matches!(combo.key, Key::Home | Key::End) {
                    return Some(Self::navigate(ctx, family, current.with_row(target)));
                }
                // Stuck at an edge. A plain move still collapses the
                // selection onto the focused cell.
                if family == Family::Plain {
                    Some(vec![Action::ClearAndSelect(current)])
                } else {
                    None
                }
            }
        }
    }

    fn space(ctx: &GestureContext<'_>, family: Family) -> Vec<Action> {
        let focus = ctx.focus_cell();
        match family {
            Family::Plain => vec![Action::ClearAndSelect(focus)],
            Family::Shortcut => vec![Action::ToggleSelect(focus), Action::SetAnchor(focus)],
            Family::Shift => Self::extend(ctx, focus, false),
            Family::ShiftShortcut => {
                let mut actions = Self::extend(ctx, focus, true);
                actions.push(Action::SetAnchor(focus));
                actions
            }
        }
    }

    fn navigate(ctx: &GestureContext<'_>, family: Family, target: Position) -> Vec<Action> {
        match family {
            Family::Plain => vec![Action::MoveFocus(target), Action::ClearAndSelect(target)],
            Family::Shortcut => {
                let mut actions = Vec::with_capacity(2);
                if ctx.anchor.is_none() {
                    actions.push(Action::DefaultAnchor(ctx.focus_cell()));
                }
                actions.push(Action::MoveFocus(target));
                actions
            }
            Family::Shift | Family::ShiftShortcut => {
                let mut actions = vec![Action::MoveFocus(target)];
                actions.extend(Self::extend(ctx, target, family == Family::ShiftShortcut));
                actions
            }
        }
    }

    /// Range from the anchor (defaulted to the current focus) to `to`.
    fn extend(ctx: &GestureContext<'_>, to: Position, preserve_base: bool) -> Vec<Action> {
        let mut actions = Vec::with_capacity(2);
        let from = match ctx.anchor {
            Some(anchor) => anchor,
            None => {
                let focus = ctx.focus_cell();
                actions.push(Action::DefaultAnchor(focus));
                focus
            }
        };
        actions.push(Action::ExtendSelectionTo {
            from,
            to,
            preserve_base,
        });
        actions
    }

    fn vertical_target(ctx: &GestureContext<'_>, key: Key, row: usize) -> usize {
        let last = ctx.row_count - 1;
        let page = ctx.page_size.max(1);
        match key {
            Key::Up => row.saturating_sub(1),
            Key::Down => (row + 1).min(last),
            Key::PageUp => row.saturating_sub(page),
            Key::PageDown => row.saturating_add(page).min(last),
            Key::Home => 0,
            Key::End => last,
            _ => row,
        }
    }

    /// The neighbouring cell for Left/Right, or `None` in row mode or at
    /// the edge. A row-wide focus enters the first column in the direction
    /// of travel.
    fn horizontal_target(ctx: &GestureContext<'_>, key: Key) -> Option<Position> {
        if !ctx.cell_selection || ctx.columns.is_empty() {
            return None;
        }
        let forward = match (key, ctx.orientation) {
            (Key::Right, Orientation::Ltr) | (Key::Left, Orientation::Rtl) => true,
            (Key::Left, Orientation::Ltr) | (Key::Right, Orientation::Rtl) => false,
            _ => return None,
        };

        let focus = ctx.focus.unwrap_or(Position::row(0));
        let last = ctx.columns.len() - 1;
        let index = match ctx.column_index(focus.column) {
            Some(i) if forward && i < last => i + 1,
            Some(i) if !forward && i > 0 => i - 1,
            Some(_) => return None,
            None if forward => 0,
            None => last,
        };
        let column = ctx.columns.get(index).copied()?;
        Some(focus.with_column(CellColumn::Column(column)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [ColumnId; 3] = [ColumnId(0), ColumnId(1), ColumnId(2)];

    fn rows_ctx(focus: usize, anchor: Option<usize>) -> GestureContext<'static> {
        GestureContext {
            row_count: 12,
            columns: &COLUMNS,
            focus: Some(Position::row(focus)),
            anchor: anchor.map(Position::row),
            mode: SelectionMode::Multiple,
            cell_selection: false,
            page_size: 5,
            shortcut: ShortcutKey::Ctrl,
            orientation: Orientation::Ltr,
        }
    }

    #[test]
    fn test_plain_down_moves_and_selects() {
        let ctx = rows_ctx(0, Some(0));
        let actions = GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Down)).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::MoveFocus(Position::row(1)),
                Action::ClearAndSelect(Position::row(1)),
            ]
        );
    }

    #[test]
    fn test_shift_without_anchor_defaults_to_focus() {
        let ctx = rows_ctx(4, None);
        let actions =
            GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Up).shift()).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::MoveFocus(Position::row(3)),
                Action::DefaultAnchor(Position::row(4)),
                Action::ExtendSelectionTo {
                    from: Position::row(4),
                    to: Position::row(3),
                    preserve_base: false,
                },
            ]
        );
    }

    #[test]
    fn test_single_mode_shift_is_plain() {
        let mut ctx = rows_ctx(2, Some(2));
        ctx.mode = SelectionMode::Single;
        let actions =
            GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Down).shift()).unwrap();
        assert_eq!(actions[1], Action::ClearAndSelect(Position::row(3)));
        assert!(GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Char('a')).ctrl()).is_none());
    }

    #[test]
    fn test_page_down_clamps_to_last_row() {
        let ctx = rows_ctx(9, Some(9));
        let actions = GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::PageDown)).unwrap();
        assert_eq!(actions[0], Action::MoveFocus(Position::row(11)));
    }

    #[test]
    fn test_edges() {
        let ctx = rows_ctx(0, Some(0));
        // Plain Up at the top collapses onto the focus.
        assert_eq!(
            GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Up)),
            Some(vec![Action::ClearAndSelect(Position::row(0))])
        );
        assert_eq!(
            GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Up).shift()),
            None
        );
        // Row mode has no horizontal movement.
        assert_eq!(
            GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Right)),
            None
        );
    }

    #[test]
    fn test_rtl_flips_horizontal_movement() {
        let mut ctx = rows_ctx(1, None);
        ctx.cell_selection = true;
        ctx.focus = Some(Position::cell(1, ColumnId(1)));
        ctx.orientation = Orientation::Rtl;
        let actions = GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Right)).unwrap();
        assert_eq!(actions[0], Action::MoveFocus(Position::cell(1, ColumnId(0))));
        let actions = GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Left)).unwrap();
        assert_eq!(actions[0], Action::MoveFocus(Position::cell(1, ColumnId(2))));
    }

    #[test]
    fn test_foreign_modifiers_ignored() {
        let ctx = rows_ctx(3, None);
        assert!(GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Down).alt()).is_none());
        assert!(GestureInterpreter::interpret(&ctx, &KeyCombo::key(Key::Down).meta()).is_none());
    }
}
