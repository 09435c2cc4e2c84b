//! Numeric summary of the cells under the current selection.

use serde::Serialize;

use crate::types::{numeric_value, Selection, Sheet};

/// Count, extremes, sum and mean of the numeric cells in a selection.
///
/// `min`, `max` and `avg` are `None` when no numeric cell was found.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SelectionStats {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sum: f64,
    pub avg: Option<f64>,
}

impl SelectionStats {
    /// Status bar line, e.g. `Count: 2  Min: 10  Max: 20  Sum: 30  Avg: 15`.
    pub fn status_text(&self) -> String {
        format!(
            "Count: {}  Min: {}  Max: {}  Sum: {}  Avg: {}",
            self.count,
            fmt_opt(self.min),
            fmt_opt(self.max),
            self.sum,
            fmt_opt(self.avg)
        )
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Summarize every numeric cell inside the selection's bounding rectangle.
///
/// Empty and non-numeric cells are skipped rather than counted as zero.
/// Bounds past the sheet edge are clipped.
#[allow(clippy::cast_precision_loss)]
pub fn compute_selection_stats(sheet: &Sheet, selection: &Selection) -> SelectionStats {
    if selection.is_empty() {
        return SelectionStats::default();
    }
    let (min_row, min_col, max_row, max_col) = selection.bounds();

    let mut stats = SelectionStats::default();
    let rows = sheet
        .rows
        .iter()
        .skip(min_row)
        .take(max_row.saturating_sub(min_row) + 1);
    for row in rows {
        let cells = row
            .cells
            .iter()
            .skip(min_col)
            .take(max_col.saturating_sub(min_col) + 1);
        for n in cells.filter_map(|c| numeric_value(&c.value)) {
            stats.count += 1;
            stats.sum += n;
            stats.min = Some(stats.min.map_or(n, |m| m.min(n)));
            stats.max = Some(stats.max.map_or(n, |m| m.max(n)));
        }
    }
    if stats.count > 0 {
        stats.avg = Some(stats.sum / stats.count as f64);
    }
    stats
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

    fn sheet_with(values: &[(usize, usize, &str)]) -> Sheet {
        let mut sheet = Sheet::new(10, 10, 100.0, 24.0);
        for &(row, col, value) in values {
            sheet.cell_mut(row, col).unwrap().value = value.to_string();
        }
        sheet
    }

    #[test]
    fn mixed_two_by_two() {
        let sheet = sheet_with(&[(0, 0, "10"), (0, 1, "abc"), (1, 0, "20"), (1, 1, "")]);
        let stats = compute_selection_stats(&sheet, &Selection::range(0, 0, 1, 1));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(20.0));
        assert_eq!(stats.sum, 30.0);
        assert_eq!(stats.avg, Some(15.0));
        assert_eq!(
            stats.status_text(),
            "Count: 2  Min: 10  Max: 20  Sum: 30  Avg: 15"
        );
    }

    #[test]
    fn no_numbers_reports_absent_values() {
        let sheet = sheet_with(&[(2, 2, "x")]);
        let stats = compute_selection_stats(&sheet, &Selection::range(3, 3, 2, 2));
        assert_eq!(stats.count, 0);
        assert_eq!(stats.sum, 0.0);
        assert!(stats.min.is_none() && stats.max.is_none() && stats.avg.is_none());
        assert_eq!(stats.status_text(), "Count: 0  Min: -  Max: -  Sum: 0  Avg: -");
    }

    #[test]
    fn whole_column_selection() {
        let sheet = sheet_with(&[(0, 1, "-4"), (9, 1, "6"), (5, 2, "100")]);
        let stats = compute_selection_stats(&sheet, &Selection::column_range(1, 1, 9));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, Some(-4.0));
        assert_eq!(stats.avg, Some(1.0));
    }

    #[test]
    fn empty_selection_and_clipped_bounds() {
        let sheet = sheet_with(&[(9, 9, "7")]);
        assert_eq!(
            compute_selection_stats(&sheet, &Selection::default()),
            SelectionStats::default()
        );
        let stats = compute_selection_stats(&sheet, &Selection::range(8, 8, 50, 50));
        assert_eq!(stats.count, 1);
        assert_eq!(stats.sum, 7.0);
    }

    #[test]
    fn serializes_absent_values_as_null() {
        let json = serde_json::to_value(SelectionStats::default()).unwrap();
        assert_eq!(json["count"], 0);
        assert!(json["min"].is_null());
    }
}
