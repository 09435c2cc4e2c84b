//! Grid API tests: data loading, statistics, commands and editing.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{grid, records};
use gridcanvas::render::{palette, DrawOp, TextAlign};
use gridcanvas::{Command, GridError, Selection, SelectionKind, SurfaceKind};
use serde_json::json;

#[test]
fn load_data_fills_rows_in_key_order() {
    let mut grid = grid(20, 10);
    let written = grid.load_data(&records(3));
    assert_eq!(written, 3);
    assert_eq!(grid.sheet().value(2, 0), "2");
    assert_eq!(grid.sheet().value(2, 1), "row2");
    assert_eq!(grid.sheet().value(2, 2), "20");
    assert_eq!(grid.sheet().value(2, 3), "");
    assert_eq!(grid.sheet().value(3, 0), "");
}

#[test]
fn load_data_ignores_records_past_last_row() {
    let mut grid = grid(10_000, 5);
    let written = grid.load_data(&records(50_000));
    assert_eq!(written, 10_000);
    assert_eq!(grid.sheet().value(0, 1), "row0");
    assert_eq!(grid.sheet().value(9_999, 1), "row9999");
    assert_eq!(grid.sheet().row_count(), 10_000);
}

#[test]
fn load_data_fills_only_as_many_columns_as_keys() {
    let mut grid = grid(10, 500);
    grid.load_data(&records(10));
    for row in 0..10 {
        assert_ne!(grid.sheet().value(row, 2), "");
        assert!((3..500).all(|col| grid.sheet().value(row, col).is_empty()));
    }
}

#[test]
fn load_json_accepts_arrays_and_objects() {
    let mut grid = grid(5, 5);
    let written = grid
        .load_json(r#"[[1, "a", null], {"x": true, "y": 2.5}]"#)
        .unwrap();
    assert_eq!(written, 2);
    assert_eq!(grid.sheet().value(0, 0), "1");
    assert_eq!(grid.sheet().value(0, 2), "");
    assert_eq!(grid.sheet().value(1, 0), "true");
    assert_eq!(grid.sheet().value(1, 1), "2.5");
    assert!(matches!(grid.load_json("[1, 2"), Err(GridError::Data(_))));
}

#[test]
fn stats_over_mixed_selection() {
    let mut grid = grid(10, 10);
    grid.load_data(&[json!(["10", "abc"]), json!(["20", ""])]);
    grid.set_selection(Selection::range(0, 0, 1, 1));
    let stats = grid.compute_selection_stats();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.min, Some(10.0));
    assert_eq!(stats.max, Some(20.0));
    assert_eq!(stats.sum, 30.0);
    assert_eq!(stats.avg, Some(15.0));
}

#[test]
fn stats_without_numbers_are_absent() {
    let mut grid = grid(10, 10);
    grid.load_data(&[json!(["x", "y"])]);
    grid.set_selection(Selection::range(0, 0, 0, 1));
    let stats = grid.compute_selection_stats();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.min, None);
    assert_eq!(stats.avg, None);
    assert_eq!(stats.sum, 0.0);
    assert_eq!(
        grid.status_text(),
        "Count: 0  Min: -  Max: -  Sum: 0  Avg: -"
    );
}

#[test]
fn column_selection_stats_cover_whole_column() {
    let mut grid = grid(10, 3);
    grid.load_data(&records(10));
    // Header press selects the full "score" column
    grid.pointer_down(SurfaceKind::ColumnHeader, 250.0, 12.0);
    grid.pointer_up(250.0, 12.0);
    let stats = grid.compute_selection_stats();
    assert_eq!(stats.count, 10);
    assert_eq!(stats.sum, 450.0);
    assert_eq!(stats.max, Some(90.0));
}

#[test]
fn commands_round_trip_through_history() {
    let mut grid = grid(10, 10);
    grid.push_command(Command::EditCell {
        row: 0,
        col: 0,
        old_value: String::new(),
        new_value: "a".to_string(),
    });
    grid.push_command(Command::ResizeColumn {
        col: 1,
        old_width: 100.0,
        new_width: 150.0,
    });
    grid.push_command(Command::ResizeRow {
        row: 2,
        old_height: 24.0,
        new_height: 40.0,
    });

    assert!(grid.undo());
    assert!(grid.undo());
    assert_eq!(grid.sheet().col_width(1), Some(100.0));
    assert_eq!(grid.sheet().row_height(2), Some(24.0));
    assert_eq!(grid.sheet().value(0, 0), "a");

    // A new command drops the redo branch
    grid.set_cell_value(5, 5, "b").unwrap();
    assert!(!grid.redo());
    assert_eq!(grid.sheet().col_width(1), Some(100.0));
    assert_eq!(grid.history().undo_len(), 2);
}

#[test]
fn undo_on_empty_history_is_a_no_op() {
    let mut grid = grid(5, 5);
    assert!(!grid.undo());
    assert!(!grid.redo());
}

#[test]
fn edit_commit_is_undoable() {
    let mut grid = grid(10, 10);
    grid.load_data(&[json!(["5"])]);

    let overlay = grid.double_click(50.0, 12.0).unwrap();
    assert_eq!(overlay.value, "5");
    assert_eq!(overlay.align, TextAlign::Right);

    assert!(grid.commit_edit("42"));
    assert_eq!(grid.sheet().value(0, 0), "42");
    assert_eq!(grid.history().undo_len(), 1);

    assert!(grid.undo());
    assert_eq!(grid.sheet().value(0, 0), "5");
}

#[test]
fn resized_column_shifts_painted_headers() {
    let mut grid = grid(10, 10);
    grid.push_command(Command::ResizeColumn {
        col: 0,
        old_width: 100.0,
        new_width: 200.0,
    });
    let center_of_b = grid
        .column_header()
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { text, x, .. } if text == "B" => Some(*x),
            _ => None,
        })
        .unwrap();
    assert_eq!(center_of_b, 250.0);
}

#[test]
fn row_header_press_tints_column_header_strip() {
    let mut grid = grid(10, 10);
    grid.pointer_down(SurfaceKind::RowHeader, 10.0, 30.0);
    grid.pointer_up(10.0, 30.0);
    assert_eq!(grid.selection().kind, SelectionKind::RowRange);
    assert_eq!(
        grid.column_header().fill_at(200.0, 5.0),
        Some(palette::HEADER_STRIP)
    );
    assert_eq!(
        grid.row_header().fill_at(10.0, 30.0),
        Some(palette::ACCENT)
    );
}
