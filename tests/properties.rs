//! Property tests for naming, resizing, history and selection invariants.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::sized_grid;
use gridcanvas::cell_ref::{cell_ref, column_index, excel_column_name, parse_cell_ref};
use gridcanvas::{Command, History, Sheet, SurfaceKind};
use proptest::prelude::*;

/// Commands with placeholder old state; callers fill it in before pushing.
fn command(rows: usize, cols: usize) -> impl Strategy<Value = Command> {
    prop_oneof![
        (0..rows, 0..cols, "[a-z0-9]{0,6}").prop_map(|(row, col, new_value)| {
            Command::EditCell {
                row,
                col,
                old_value: String::new(),
                new_value,
            }
        }),
        (0..cols, 30.0f64..300.0).prop_map(|(col, new_width)| Command::ResizeColumn {
            col,
            old_width: 0.0,
            new_width,
        }),
        (0..rows, 16.0f64..90.0).prop_map(|(row, new_height)| Command::ResizeRow {
            row,
            old_height: 0.0,
            new_height,
        }),
    ]
}

proptest! {
    #[test]
    fn column_names_are_a_bijection(col in 0usize..1_000_000) {
        let name = excel_column_name(col);
        prop_assert!(name.chars().all(|c| c.is_ascii_uppercase()));
        prop_assert_eq!(column_index(&name), Some(col));
        prop_assert_eq!(column_index(&name.to_lowercase()), Some(col));
    }

    #[test]
    fn cell_refs_parse_back(row in 0usize..100_000, col in 0usize..20_000) {
        prop_assert_eq!(parse_cell_ref(&cell_ref(row, col)), Some((row, col)));
    }

    #[test]
    fn column_resize_respects_minimum(col in 0usize..4, delta in -300.0f64..300.0) {
        let mut grid = sized_grid(20, 5, 2000.0, 2000.0);
        let border = (col as f64 + 1.0) * 100.0;
        grid.pointer_down(SurfaceKind::ColumnHeader, border, 12.0);
        grid.pointer_move(border + delta, 12.0);
        grid.pointer_up(border + delta, 12.0);

        let width = grid.sheet().col_width(col).unwrap();
        prop_assert!(width >= grid.config().min_col_width);
        if delta.abs() > grid.config().resize_dead_zone {
            prop_assert!((width - (100.0 + delta).max(30.0)).abs() < 1e-9);
            prop_assert_eq!(grid.history().undo_len(), 1);
        } else {
            prop_assert_eq!(width, 100.0);
            prop_assert_eq!(grid.history().undo_len(), 0);
        }
    }

    #[test]
    fn row_resize_respects_minimum(row in 0usize..19, delta in -100.0f64..100.0) {
        let mut grid = sized_grid(20, 5, 2000.0, 2000.0);
        let border = (row as f64 + 1.0) * 24.0;
        grid.pointer_down(SurfaceKind::RowHeader, 10.0, border);
        grid.pointer_up(10.0, border + delta);
        let height = grid.sheet().row_height(row).unwrap();
        prop_assert!(height >= grid.config().min_row_height);
    }

    #[test]
    fn undo_all_restores_and_redo_all_replays(
        commands in prop::collection::vec(command(8, 6), 1..20),
    ) {
        let original = Sheet::new(8, 6, 100.0, 24.0);
        let mut sheet = original.clone();
        let mut history = History::new();
        for command in commands {
            let command = match command {
                Command::EditCell { row, col, new_value, .. } => Command::EditCell {
                    row,
                    col,
                    old_value: sheet.value(row, col).to_string(),
                    new_value,
                },
                Command::ResizeColumn { col, new_width, .. } => Command::ResizeColumn {
                    col,
                    old_width: sheet.col_width(col).unwrap(),
                    new_width,
                },
                Command::ResizeRow { row, new_height, .. } => Command::ResizeRow {
                    row,
                    old_height: sheet.row_height(row).unwrap(),
                    new_height,
                },
            };
            history.push(command, &mut sheet);
        }
        let edited = sheet.clone();

        while history.undo(&mut sheet) {}
        prop_assert_eq!(&sheet, &original);
        prop_assert!(!history.can_undo());

        while history.redo(&mut sheet) {}
        prop_assert_eq!(&sheet, &edited);
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn push_after_undo_clears_redo(undos in 1usize..4) {
        let mut sheet = Sheet::new(4, 4, 100.0, 24.0);
        let mut history = History::new();
        for col in 0..4 {
            history.push(
                Command::ResizeColumn { col, old_width: 100.0, new_width: 150.0 },
                &mut sheet,
            );
        }
        for _ in 0..undos {
            prop_assert!(history.undo(&mut sheet));
        }
        prop_assert_eq!(history.redo_len(), undos);
        history.push(
            Command::EditCell { row: 0, col: 0, old_value: String::new(), new_value: "x".into() },
            &mut sheet,
        );
        prop_assert!(!history.can_redo());
        prop_assert!(!history.redo(&mut sheet));
    }

    #[test]
    fn drag_selection_stays_inside_the_sheet(
        start in (0.0f64..399.0, 0.0f64..239.0),
        moves in prop::collection::vec((-500.0f64..900.0, -500.0f64..900.0), 1..8),
    ) {
        let mut grid = sized_grid(100, 30, 400.0, 240.0);
        grid.pointer_down(SurfaceKind::Body, start.0, start.1);
        let anchor = grid.selection().anchor();
        for (x, y) in moves {
            grid.pointer_move(x, y);
            grid.auto_scroll_tick();
            let selection = grid.selection();
            prop_assert_eq!(selection.anchor(), anchor);
            let (_, _, max_row, max_col) = selection.bounds();
            prop_assert!(max_row < 100 && max_col < 30);
            prop_assert!(selection.contains(anchor.0, anchor.1));
        }
        let viewport = grid.viewport();
        prop_assert!(viewport.scroll_x >= 0.0 && viewport.scroll_x <= 2600.0);
        prop_assert!(viewport.scroll_y >= 0.0 && viewport.scroll_y <= 2160.0);
    }
}
