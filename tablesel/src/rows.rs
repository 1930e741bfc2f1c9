//! The row space the table selects over.
//!
//! The engine never owns item data in a meaningful way: it only needs the
//! current row count, a row → item identity lookup, and a description of
//! how row indices moved whenever the underlying collection changes.

use std::cmp::Ordering;
use std::ops::Range;

/// Read-only view over the currently visible (flattened) rows.
pub trait RowSpace {
    /// Opaque item identity. Two rows holding equal items are the same item.
    type Item: Clone + Eq + std::hash::Hash + std::fmt::Debug;

    /// Number of visible rows.
    fn row_count(&self) -> usize;

    /// Item identity at a visible row.
    fn item_at(&self, row: usize) -> Option<Self::Item>;

    /// Current row of an item, if it is still visible.
    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        (0..self.row_count()).find(|&row| self.item_at(row).as_ref() == Some(item))
    }
}

/// Trait for items that can be held by a [`RowList`].
///
/// # Examples
///
/// ```
/// use tablesel::TableRow;
///
/// #[derive(Clone, Debug)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     fn id(&self) -> String {
///         self.id.to_string()
///     }
/// }
/// ```
pub trait TableRow: Clone + 'static {
    /// Unique identifier for this row.
    fn id(&self) -> String;
}

impl TableRow for String {
    fn id(&self) -> String {
        self.clone()
    }
}

/// A structural change to the row space.
///
/// When several changes are delivered together, each one is expressed in the
/// coordinates of the row space after the previous changes were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowChange {
    /// `count` rows were inserted starting at `at`.
    Inserted { at: usize, count: usize },
    /// `count` rows were removed starting at `at`.
    Removed { at: usize, count: usize },
    /// A tree branch at `parent` expanded, revealing `count` rows below it.
    Expanded { parent: usize, count: usize },
    /// A tree branch at `parent` collapsed, hiding the `count` rows below it.
    Collapsed { parent: usize, count: usize },
    /// Rows were reordered. `mapping[old] == new`.
    ///
    /// A mapping that is not a bijection over the current rows is resolved
    /// by item identity, like [`RowChange::Replaced`].
    Permuted { mapping: Vec<usize> },
    /// The whole row set was replaced. Only item identity carries over.
    Replaced,
}

/// Result of re-indexing a row through a [`RowChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebased {
    /// The row survived and now lives at this index.
    Moved(usize),
    /// The row is gone. `successor` is the index that took its place,
    /// before clamping to the new row count.
    Removed { successor: usize },
}

impl Rebased {
    /// The surviving index, if the row was not removed.
    pub fn moved(self) -> Option<usize> {
        match self {
            Rebased::Moved(row) => Some(row),
            Rebased::Removed { .. } => None,
        }
    }

    /// The index the row (or its successor) ends up at.
    pub fn landing(self) -> usize {
        match self {
            Rebased::Moved(row) => row,
            Rebased::Removed { successor } => successor,
        }
    }
}

impl RowChange {
    /// Re-index a single row through this change.
    pub fn rebase(&self, row: usize) -> Rebased {
        match self {
            RowChange::Inserted { at, count } => {
                if row >= *at {
                    Rebased::Moved(row + count)
                } else {
                    Rebased::Moved(row)
                }
            }
            RowChange::Expanded { parent, count } => RowChange::Inserted {
                at: parent + 1,
                count: *count,
            }
            .rebase(row),
            RowChange::Removed { at, count } => {
                if row < *at {
                    Rebased::Moved(row)
                } else if row >= at + count {
                    Rebased::Moved(row - count)
                } else {
                    Rebased::Removed { successor: *at }
                }
            }
            RowChange::Collapsed { parent, count } => {
                let at = parent + 1;
                if row < at {
                    Rebased::Moved(row)
                } else if row >= at + count {
                    Rebased::Moved(row - count)
                } else {
                    Rebased::Removed { successor: *parent }
                }
            }
            RowChange::Permuted { mapping } => match mapping.get(row) {
                Some(new) => Rebased::Moved(*new),
                None => Rebased::Moved(row),
            },
            RowChange::Replaced => Rebased::Removed { successor: row },
        }
    }

    /// Whether this change invalidates every row index.
    pub fn is_replacement(&self) -> bool {
        matches!(self, RowChange::Replaced)
    }
}

/// A vector-backed [`RowSpace`].
///
/// Every mutating method returns the [`RowChange`]s describing what it did,
/// ready to be handed to [`Table::on_rows_changed`](crate::Table::on_rows_changed).
#[derive(Debug, Clone)]
pub struct RowList<T: TableRow> {
    rows: Vec<T>,
}

impl<T: TableRow> Default for RowList<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: TableRow> RowList<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row.
    pub fn push(&mut self, row: T) -> RowChange {
        let at = self.rows.len();
        self.rows.push(row);
        RowChange::Inserted { at, count: 1 }
    }

    /// Insert rows at `at` (clamped to the end).
    pub fn insert(&mut self, at: usize, rows: Vec<T>) -> RowChange {
        let at = at.min(self.rows.len());
        let count = rows.len();
        self.rows.splice(at..at, rows);
        RowChange::Inserted { at, count }
    }

    /// Remove a contiguous range (clamped to the current length).
    pub fn remove_range(&mut self, range: Range<usize>) -> Option<RowChange> {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        if start == end {
            return None;
        }
        self.rows.drain(start..end);
        Some(RowChange::Removed {
            at: start,
            count: end - start,
        })
    }

    /// Remove arbitrary rows, given by their current indices.
    ///
    /// Rows are removed from the bottom up so each returned change is valid
    /// in the coordinates left by the previous one.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Vec<RowChange> {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.rows.len())
            .collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        sorted
            .into_iter()
            .map(|index| {
                self.rows.remove(index);
                RowChange::Removed {
                    at: index,
                    count: 1,
                }
            })
            .collect()
    }

    /// Stable sort, reported as a permutation.
    pub fn sort_by<F>(&mut self, mut compare: F) -> RowChange
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| compare(&self.rows[a], &self.rows[b]));

        let mut mapping = vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            mapping[old] = new;
        }

        let mut old_rows: Vec<Option<T>> = self.rows.drain(..).map(Some).collect();
        self.rows = order
            .iter()
            .filter_map(|&old| old_rows[old].take())
            .collect();

        RowChange::Permuted { mapping }
    }

    /// Replace every row.
    pub fn set_rows(&mut self, rows: Vec<T>) -> RowChange {
        self.rows = rows;
        RowChange::Replaced
    }
}

impl<T: TableRow> RowSpace for RowList<T> {
    type Item = String;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn item_at(&self, row: usize) -> Option<String> {
        self.rows.get(row).map(|r| r.id())
    }

    fn index_of(&self, item: &String) -> Option<usize> {
        self.rows.iter().position(|r| &r.id() == item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> RowList<String> {
        RowList::new((0..n).map(|i| format!("row-{i}")).collect())
    }

    #[test]
    fn test_rebase_removed_span() {
        let change = RowChange::Removed { at: 2, count: 3 };
        assert_eq!(change.rebase(1), Rebased::Moved(1));
        assert_eq!(change.rebase(3), Rebased::Removed { successor: 2 });
        assert_eq!(change.rebase(5), Rebased::Moved(2));
    }

    #[test]
    fn test_rebase_collapsed_hands_rows_to_parent() {
        let change = RowChange::Collapsed { parent: 4, count: 2 };
        assert_eq!(change.rebase(4), Rebased::Moved(4));
        assert_eq!(change.rebase(6), Rebased::Removed { successor: 4 });
        assert_eq!(change.rebase(7), Rebased::Moved(5));
    }

    #[test]
    fn test_remove_indices_reports_bottom_up() {
        let mut rows = list(6);
        let changes = rows.remove_indices(&[1, 3]);
        assert_eq!(
            changes,
            vec![
                RowChange::Removed { at: 3, count: 1 },
                RowChange::Removed { at: 1, count: 1 },
            ]
        );
        assert_eq!(rows.item_at(1).as_deref(), Some("row-2"));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_sort_by_mapping() {
        let mut rows = RowList::new(vec!["c".to_string(), "a".to_string(), "b".to_string()]);
        let change = rows.sort_by(|a, b| a.cmp(b));
        assert_eq!(
            change,
            RowChange::Permuted {
                mapping: vec![2, 0, 1]
            }
        );
        assert_eq!(rows.rows(), &["a", "b", "c"]);
    }
}
