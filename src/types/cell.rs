use crate::cell_ref::excel_column_name;

/// A single grid cell. Owned by its [`Row`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// Display text; numeric interpretation happens on demand.
    pub value: String,
    pub selected: bool,
    /// True while the inline editor overlay covers this cell.
    pub editing: bool,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            ..Self::default()
        }
    }

    /// Whether the value should be right-aligned (an integer literal such as `42` or `-7`).
    pub fn is_integer_like(&self) -> bool {
        is_integer_literal(&self.value)
    }
}

/// One grid row: its cells (one per column) and its height in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub cells: Vec<Cell>,
    pub height: f64,
    pub selected: bool,
}

impl Row {
    pub fn new(index: usize, col_count: usize, height: f64) -> Self {
        Self {
            index,
            cells: (0..col_count).map(|col| Cell::new(index, col)).collect(),
            height,
            selected: false,
        }
    }
}

/// One grid column: its generated letter name and width in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub index: usize,
    pub name: String,
    pub width: f64,
    pub selected: bool,
}

impl Column {
    pub fn new(index: usize, width: f64) -> Self {
        Self {
            index,
            name: excel_column_name(index),
            width,
            selected: false,
        }
    }
}

/// True for an optionally signed run of ASCII digits (surrounding whitespace allowed).
pub fn is_integer_literal(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a cell value as a finite number. Empty and non-numeric text yield `None`.
pub fn numeric_value(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("42", true)]
    #[test_case("-7", true)]
    #[test_case(" 15 ", true)]
    #[test_case("3.5", false)]
    #[test_case("abc", false)]
    #[test_case("", false)]
    #[test_case("-", false)]
    fn integer_literals(value: &str, expected: bool) {
        assert_eq!(is_integer_literal(value), expected);
    }

    #[test_case("10", Some(10.0))]
    #[test_case(" 2.5", Some(2.5))]
    #[test_case("1e3", Some(1000.0))]
    #[test_case("", None)]
    #[test_case("abc", None)]
    #[test_case("inf", None)]
    #[test_case("NaN", None)]
    fn numeric_values(value: &str, expected: Option<f64>) {
        assert_eq!(numeric_value(value), expected);
    }

    #[test]
    fn row_creates_empty_cells() {
        let row = Row::new(3, 4, 24.0);
        assert_eq!(row.cells.len(), 4);
        assert!(row.cells.iter().all(|c| c.row == 3 && c.value.is_empty()));
        assert_eq!(row.cells[2].col, 2);
    }

    #[test]
    fn column_names_follow_index() {
        assert_eq!(Column::new(0, 100.0).name, "A");
        assert_eq!(Column::new(27, 100.0).name, "AB");
    }
}
