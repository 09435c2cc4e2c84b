use serde_json::Value;

use super::cell::{Cell, Column, Row};

/// Fixed-capacity grid contents: every row and column, created up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
}

impl Sheet {
    /// Create `row_count` x `col_count` empty cells with uniform sizes.
    pub fn new(row_count: usize, col_count: usize, col_width: f64, row_height: f64) -> Self {
        Self {
            rows: (0..row_count)
                .map(|r| Row::new(r, col_count, row_height))
                .collect(),
            columns: (0..col_count).map(|c| Column::new(c, col_width)).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the last row (0 for an empty sheet).
    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Index of the last column (0 for an empty sheet).
    pub fn last_col(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.cells.get_mut(col)
    }

    /// Cell value, or `""` when out of range.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map_or("", |c| c.value.as_str())
    }

    pub fn col_width(&self, col: usize) -> Option<f64> {
        self.columns.get(col).map(|c| c.width)
    }

    pub fn row_height(&self, row: usize) -> Option<f64> {
        self.rows.get(row).map(|r| r.height)
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Sum of all row heights.
    pub fn total_height(&self) -> f64 {
        self.rows.iter().map(|r| r.height).sum()
    }

    /// Copy record `i` into row `i`, one field per column starting at column 0.
    ///
    /// Objects contribute their values in key order, arrays their elements.
    /// Records beyond the row count and fields beyond the column count are
    /// ignored; untouched cells keep their values. Returns the number of rows
    /// written.
    pub fn load_records(&mut self, records: &[Value]) -> usize {
        let mut written = 0;
        for (row, record) in self.rows.iter_mut().zip(records) {
            let fields: Box<dyn Iterator<Item = &Value>> = match record {
                Value::Object(map) => Box::new(map.values()),
                Value::Array(items) => Box::new(items.iter()),
                scalar => Box::new(std::iter::once(scalar)),
            };
            for (cell, field) in row.cells.iter_mut().zip(fields) {
                cell.value = display_text(field);
            }
            written += 1;
        }
        written
    }
}

/// Render a JSON value as cell text: strings verbatim, `null` as empty.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
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
    use serde_json::json;

    #[test]
    fn new_sheet_dimensions() {
        let sheet = Sheet::new(3, 4, 100.0, 24.0);
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 4);
        assert_eq!(sheet.last_row(), 2);
        assert_eq!(sheet.last_col(), 3);
        assert_eq!(sheet.total_width(), 400.0);
        assert_eq!(sheet.total_height(), 72.0);
        assert_eq!(sheet.columns[3].name, "D");
    }

    #[test]
    fn load_records_keeps_key_order() {
        let mut sheet = Sheet::new(2, 5, 100.0, 24.0);
        let written = sheet.load_records(&[json!({
            "id": 1,
            "firstName": "Raj1",
            "lastName": "Solanki1",
            "Age": 21,
            "Salary": 100010
        })]);
        assert_eq!(written, 1);
        let values: Vec<&str> = (0..5).map(|c| sheet.value(0, c)).collect();
        assert_eq!(values, ["1", "Raj1", "Solanki1", "21", "100010"]);
        assert_eq!(sheet.value(1, 0), "");
    }

    #[test]
    fn load_records_truncates_columns_and_keeps_extra_cells() {
        let mut sheet = Sheet::new(1, 2, 100.0, 24.0);
        sheet.cell_mut(0, 1).unwrap().value = "keep".to_string();
        sheet.load_records(&[json!(["a"])]);
        assert_eq!(sheet.value(0, 0), "a");
        assert_eq!(sheet.value(0, 1), "keep");

        sheet.load_records(&[json!(["x", "y", "z"])]);
        assert_eq!(sheet.value(0, 1), "y");
    }

    #[test]
    fn display_text_variants() {
        assert_eq!(display_text(&json!(null)), "");
        assert_eq!(display_text(&json!("hi")), "hi");
        assert_eq!(display_text(&json!(2.5)), "2.5");
        assert_eq!(display_text(&json!(true)), "true");
    }

    #[test]
    fn out_of_range_access_is_none() {
        let sheet = Sheet::new(1, 1, 100.0, 24.0);
        assert!(sheet.cell(1, 0).is_none());
        assert!(sheet.cell(0, 1).is_none());
        assert_eq!(sheet.value(5, 5), "");
        assert!(sheet.col_width(3).is_none());
    }
}
