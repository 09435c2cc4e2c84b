/// What the current selection represents.
///
/// `Row`/`Column` are single whole-line selections; the `*Range` kinds come
/// from header drags. Whole-line semantics are encoded explicitly in the
/// start/end bounds, so [`Selection::contains`] never needs to consult the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    /// Nothing selected yet
    #[default]
    None,
    /// Single active cell (keyboard navigation)
    Cell,
    /// Rectangular cell range (pointer drag, shift+arrow)
    Range,
    /// Entire row
    Row,
    /// Entire rows from a row-header drag
    RowRange,
    /// Entire column
    Column,
    /// Entire columns from a column-header drag
    ColumnRange,
}

impl SelectionKind {
    /// Cell-level selections get the bordered range overlay with a fill handle.
    pub fn is_cell_like(self) -> bool {
        matches!(self, Self::Cell | Self::Range)
    }

    pub fn is_row_like(self) -> bool {
        matches!(self, Self::Row | Self::RowRange)
    }

    pub fn is_column_like(self) -> bool {
        matches!(self, Self::Column | Self::ColumnRange)
    }
}

/// Anchor (`start`) and moving end of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub kind: SelectionKind,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Selection {
    /// Single-cell selection used by keyboard navigation.
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            kind: SelectionKind::Cell,
            start_row: row,
            start_col: col,
            end_row: row,
            end_col: col,
        }
    }

    /// Cell range anchored at `(start_row, start_col)`.
    pub fn range(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            kind: SelectionKind::Range,
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Rows `start..=end` spanning every column up to `last_col`.
    pub fn row_range(start_row: usize, end_row: usize, last_col: usize) -> Self {
        Self {
            kind: SelectionKind::RowRange,
            start_row,
            start_col: 0,
            end_row,
            end_col: last_col,
        }
    }

    /// Columns `start..=end` spanning every row up to `last_row`.
    pub fn column_range(start_col: usize, end_col: usize, last_row: usize) -> Self {
        Self {
            kind: SelectionKind::ColumnRange,
            start_row: 0,
            start_col,
            end_row: last_row,
            end_col,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == SelectionKind::None
    }

    /// Normalized bounds `(min_row, min_col, max_row, max_col)`.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.start_row.min(self.end_row),
            self.start_col.min(self.end_col),
            self.start_row.max(self.end_row),
            self.start_col.max(self.end_col),
        )
    }

    /// Bounding-box containment, independent of [`SelectionKind`].
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        (min_row..=max_row).contains(&row) && (min_col..=max_col).contains(&col)
    }

    /// Row lies inside a row-header selection.
    pub fn is_row_in_range(&self, row: usize) -> bool {
        let (min_row, _, max_row, _) = self.bounds();
        self.kind.is_row_like() && (min_row..=max_row).contains(&row)
    }

    /// Column lies inside a column-header selection.
    pub fn is_col_in_range(&self, col: usize) -> bool {
        let (_, min_col, _, max_col) = self.bounds();
        self.kind.is_column_like() && (min_col..=max_col).contains(&col)
    }

    /// The anchor cell `(start_row, start_col)`.
    pub fn anchor(&self) -> (usize, usize) {
        (self.start_row, self.start_col)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let sel = Selection::default();
        assert!(sel.is_empty());
        assert_eq!(sel.kind, SelectionKind::None);
    }

    #[test]
    fn contains_uses_normalized_bounds() {
        // Dragged up and to the left of the anchor
        let sel = Selection::range(5, 5, 2, 3);
        assert_eq!(sel.bounds(), (2, 3, 5, 5));
        assert!(sel.contains(2, 3));
        assert!(sel.contains(5, 5));
        assert!(sel.contains(4, 4));
        assert!(!sel.contains(1, 4));
        assert!(!sel.contains(4, 6));
    }

    #[test]
    fn contains_ignores_kind() {
        let mut sel = Selection::range(1, 1, 2, 2);
        sel.kind = SelectionKind::Row;
        assert!(sel.contains(2, 2));
        assert!(!sel.contains(2, 3));
    }

    #[test]
    fn whole_line_ranges_encode_full_extent() {
        let rows = Selection::row_range(4, 2, 9);
        assert_eq!(rows.bounds(), (2, 0, 4, 9));
        assert!(rows.is_row_in_range(3));
        assert!(!rows.is_col_in_range(3));

        let cols = Selection::column_range(1, 3, 99);
        assert_eq!(cols.bounds(), (0, 1, 99, 3));
        assert!(cols.is_col_in_range(2));
        assert!(!cols.is_row_in_range(2));
    }
}
