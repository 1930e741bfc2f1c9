use tablesel::{
    CellColumn, Column, ColumnId, ColumnSpace, EventResult, Key, KeyCombo, Orientation, Position,
    RowList, Table, TableConfig,
};

const A: ColumnId = ColumnId(10);
const B: ColumnId = ColumnId(20);
const C: ColumnId = ColumnId(30);

fn columns() -> ColumnSpace {
    ColumnSpace::new(vec![
        Column::new(A, "Name"),
        Column::new(B, "Email"),
        Column::new(C, "Role"),
    ])
}

fn cell_table(n: usize) -> Table<RowList<String>> {
    let rows = RowList::new((0..n).map(|i| format!("row-{i}")).collect());
    Table::with_config(rows, columns(), TableConfig::new().cell_selection()).unwrap()
}

const RIGHT: KeyCombo = KeyCombo::key(Key::Right);
const LEFT: KeyCombo = KeyCombo::key(Key::Left);
const DOWN: KeyCombo = KeyCombo::key(Key::Down);

// ============================================================================
// Horizontal Movement
// ============================================================================

#[test]
fn test_right_moves_to_next_column() {
    let mut t = cell_table(4);
    t.clear_and_select(1, Some(A));

    assert_eq!(t.on_key(&RIGHT), EventResult::Consumed);

    assert_eq!(t.focused_cell(), Some(Position::cell(1, B)));
    assert_eq!(t.selected_cells(), &[Position::cell(1, B)]);
}

#[test]
fn test_right_at_last_column_is_noop() {
    let mut t = cell_table(4);
    t.clear_and_select(1, Some(C));
    t.drain_events();

    assert_eq!(t.on_key(&RIGHT), EventResult::Ignored);
    assert_eq!(t.on_key(&RIGHT.shift()), EventResult::Ignored);

    assert_eq!(t.focused_cell(), Some(Position::cell(1, C)));
    assert!(t.drain_events().is_empty());
}

#[test]
fn test_rtl_mirrors_left_and_right() {
    let mut t = cell_table(4);
    t.set_orientation(Orientation::Rtl);
    t.clear_and_select(0, Some(B));

    t.on_key(&RIGHT);
    assert_eq!(t.focused_cell(), Some(Position::cell(0, A)));

    t.on_key(&LEFT);
    t.on_key(&LEFT);
    assert_eq!(t.focused_cell(), Some(Position::cell(0, C)));
}

#[test]
fn test_explicit_orientation_overrides_columns() {
    let mut t = cell_table(4);
    t.clear_and_select(0, Some(B));

    t.handle_key(&RIGHT, Orientation::Rtl);

    assert_eq!(t.focused_cell(), Some(Position::cell(0, A)));
    assert_eq!(t.orientation(), Orientation::Ltr);
}

#[test]
fn test_row_wide_focus_enters_first_column() {
    let mut t = cell_table(4);
    t.focus(2, None);

    t.on_key(&RIGHT);
    assert_eq!(t.focused_cell(), Some(Position::cell(2, A)));

    t.focus(2, None);
    t.on_key(&LEFT);
    assert_eq!(t.focused_cell(), Some(Position::cell(2, C)));
}

#[test]
fn test_vertical_move_keeps_column() {
    let mut t = cell_table(4);
    t.clear_and_select(0, Some(C));

    t.on_key(&DOWN);

    assert_eq!(t.focused_cell(), Some(Position::cell(1, C)));
    assert_eq!(t.selected_cells(), &[Position::cell(1, C)]);
}

// ============================================================================
// Rectangular Ranges
// ============================================================================

#[test]
fn test_shift_moves_select_rectangle() {
    let mut t = cell_table(6);
    t.clear_and_select(1, Some(A));

    t.on_key(&DOWN.shift());
    t.on_key(&RIGHT.shift());

    let mut cells = t.selected_cells().to_vec();
    cells.sort_by_key(|p| (p.row, p.column.id()));
    assert_eq!(
        cells,
        vec![
            Position::cell(1, A),
            Position::cell(1, B),
            Position::cell(2, A),
            Position::cell(2, B),
        ]
    );
    assert_eq!(t.anchor(), Some(Position::cell(1, A)));
    assert_eq!(t.selected_index(), Some(2));
}

#[test]
fn test_rectangle_shrinks_back() {
    let mut t = cell_table(6);
    t.clear_and_select(3, Some(B));

    t.on_key(&RIGHT.shift());
    t.on_key(&DOWN.shift());
    t.on_key(&LEFT.shift());

    assert_eq!(
        t.selected_cells(),
        &[Position::cell(3, B), Position::cell(4, B)]
    );
}

#[test]
fn test_select_cell_range_is_row_major() {
    let mut t = cell_table(6);

    t.select_cell_range(2, C, 1, B);

    assert_eq!(
        t.selected_cells(),
        &[
            Position::cell(1, B),
            Position::cell(1, C),
            Position::cell(2, B),
            Position::cell(2, C),
        ]
    );
    assert_eq!(t.focused_cell(), Some(Position::cell(1, B)));
    assert!(!t.has_non_default_anchor());
}

#[test]
fn test_shortcut_a_selects_every_cell() {
    let mut t = cell_table(3);

    t.on_key(&KeyCombo::key(Key::Char('a')).ctrl());

    assert_eq!(t.selected_cells().len(), 9);
    assert!(t.is_selected(2, None));
}

// ============================================================================
// Row Queries In Cell Mode
// ============================================================================

#[test]
fn test_row_query_needs_every_column() {
    let mut t = cell_table(3);
    t.select(0, Some(A));
    t.select(0, Some(B));

    assert!(!t.is_selected(0, None));
    t.select(0, Some(C));
    assert!(t.is_selected(0, None));
    assert_eq!(t.selected_indices(), vec![0]);
}

#[test]
fn test_select_row_in_cell_mode_selects_each_cell() {
    let mut t = cell_table(3);

    t.select(1, None);

    assert_eq!(
        t.selected_cells(),
        &[Position::cell(1, A), Position::cell(1, B), Position::cell(1, C)]
    );
    assert_eq!(t.focused_cell(), Some(Position::cell(1, C)));
}

#[test]
fn test_clear_row_in_cell_mode() {
    let mut t = cell_table(3);
    t.select(1, None);
    t.select(2, Some(B));

    t.clear_selection_at(1, None);

    assert_eq!(t.selected_cells(), &[Position::cell(2, B)]);
}

#[test]
fn test_unknown_column_ignored() {
    let mut t = cell_table(3);
    t.drain_events();

    t.select(1, Some(ColumnId(99)));
    t.focus(1, Some(ColumnId(99)));

    assert!(t.selected_cells().is_empty());
    assert_eq!(t.focused_index(), Some(0));
    assert!(t.drain_events().is_empty());
}

// ============================================================================
// Column and Granularity Changes
// ============================================================================

#[test]
fn test_removing_column_drops_its_cells() {
    let mut t = cell_table(3);
    t.select(0, Some(A));
    t.select(1, Some(B));

    t.set_columns(vec![Column::new(A, "Name"), Column::new(C, "Role")]);

    assert_eq!(t.selected_cells(), &[Position::cell(0, A)]);
    assert_eq!(t.focused_cell(), Some(Position::new(1, CellColumn::RowWide)));
    assert_eq!(t.anchor(), Some(Position::row(1)));
}

#[test]
fn test_disabling_cell_selection_clears() {
    let mut t = cell_table(3);
    t.select(0, Some(A));

    t.set_cell_selection_enabled(false);

    assert!(t.selected_cells().is_empty());
    assert_eq!(t.focused_cell(), Some(Position::row(0)));

    t.select(2, Some(B));
    assert_eq!(t.selected_cells(), &[Position::row(2)]);
    assert!(t.is_selected(2, Some(C)));
}
