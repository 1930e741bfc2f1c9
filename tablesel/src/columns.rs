//! Column definitions and traversal order.

use serde::{Deserialize, Serialize};

use crate::position::ColumnId;

/// Text direction used when translating Left/Right into column motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Right moves toward higher column indices.
    #[default]
    Ltr,
    /// Right moves toward lower column indices.
    Rtl,
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use tablesel::{Column, ColumnId};
///
/// let columns = vec![
///     Column::new(ColumnId(0), "Name"),
///     Column::new(ColumnId(1), "Email"),
/// ];
/// assert_eq!(columns[1].header, "Email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Stable column identity
    pub id: ColumnId,
    /// Column header text
    pub header: String,
}

impl Column {
    pub fn new(id: ColumnId, header: impl Into<String>) -> Self {
        Self {
            id,
            header: header.into(),
        }
    }
}

/// The ordered, visible, selectable columns plus the traversal direction.
#[derive(Debug, Clone, Default)]
pub struct ColumnSpace {
    columns: Vec<Column>,
    orientation: Orientation,
}

impl ColumnSpace {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            orientation: Orientation::Ltr,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column id at a visible index.
    pub fn id_at(&self, index: usize) -> Option<ColumnId> {
        self.columns.get(index).map(|c| c.id)
    }

    /// Visible index of a column id.
    pub fn index_of(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        self.index_of(id).is_some()
    }

    /// Column ids in visible order.
    pub fn ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|c| c.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup() {
        let space = ColumnSpace::new(vec![
            Column::new(ColumnId(7), "a"),
            Column::new(ColumnId(3), "b"),
        ]);
        assert_eq!(space.index_of(ColumnId(3)), Some(1));
        assert_eq!(space.id_at(0), Some(ColumnId(7)));
        assert_eq!(space.id_at(2), None);
        assert!(!space.contains(ColumnId(1)));
    }
}
