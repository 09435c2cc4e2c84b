//! Pointer, keyboard and scrolling behavior through the public router.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{grid, sized_grid};
use gridcanvas::render::ResizeGuide;
use gridcanvas::{
    Command, CursorStyle, HitTarget, Key, KeyInput, ScrollAxis, Selection, SelectionKind, SurfaceKind,
};

#[test]
fn drag_near_bottom_edge_auto_scrolls_and_extends() {
    let mut grid = grid(100, 30);
    grid.pointer_down(SurfaceKind::Body, 50.0, 12.0);
    // 5px from the bottom edge of the 240px body
    assert!(grid.pointer_move(50.0, 235.0));
    assert_eq!(grid.selection().end_row, 9);

    assert!(grid.auto_scroll_tick());
    assert_eq!(grid.viewport().scroll_y, 20.0);
    // The pointer now sits over row 10
    assert_eq!(grid.selection().end_row, 10);
    assert_eq!(grid.selection().anchor(), (0, 0));

    for _ in 0..200 {
        grid.auto_scroll_tick();
    }
    assert_eq!(grid.viewport().scroll_y, 2160.0);
    assert_eq!(grid.selection().end_row, 99);

    grid.pointer_up(50.0, 235.0);
    assert!(!grid.auto_scroll_tick());
    assert!(!grid.is_auto_scrolling());
    assert_eq!(grid.viewport().scroll_y, 2160.0);
}

#[test]
fn leaving_the_margin_stops_auto_scroll() {
    let mut grid = grid(100, 30);
    grid.pointer_down(SurfaceKind::Body, 50.0, 12.0);
    assert!(grid.pointer_move(390.0, 100.0));
    assert!(grid.auto_scroll_tick());
    assert_eq!(grid.viewport().scroll_x, 20.0);
    assert!(!grid.pointer_move(200.0, 100.0));
    assert!(!grid.auto_scroll_tick());
    assert_eq!(grid.viewport().scroll_x, 20.0);
}

#[test]
fn header_drags_auto_scroll_too() {
    let mut grid = grid(100, 30);
    grid.pointer_down(SurfaceKind::ColumnHeader, 150.0, 12.0);
    assert!(grid.pointer_move(395.0, -10.0));
    for _ in 0..5 {
        grid.auto_scroll_tick();
    }
    assert_eq!(grid.viewport().scroll_x, 100.0);
    assert_eq!(grid.selection().kind, SelectionKind::ColumnRange);
    // 395 + 100 lands in column E
    assert_eq!(grid.selection().bounds(), (0, 1, 99, 4));
}

#[test]
fn resize_drag_never_auto_scrolls() {
    let mut grid = grid(100, 30);
    grid.pointer_down(SurfaceKind::ColumnHeader, 300.0, 12.0);
    assert_eq!(grid.hit_test(SurfaceKind::ColumnHeader, 300.0, 12.0), HitTarget::ColumnBorder(2));
    assert!(!grid.pointer_move(399.0, 12.0));
    assert!(!grid.auto_scroll_tick());
    assert_eq!(grid.guide(), Some(ResizeGuide::Column { x: 399.0 }));
    grid.pointer_up(399.0, 12.0);
    assert_eq!(grid.sheet().col_width(2), Some(199.0));
}

#[test]
fn row_resize_commit_and_undo() {
    let mut grid = grid(100, 30);
    assert_eq!(
        grid.hover(SurfaceKind::RowHeader, 25.0, 49.0),
        CursorStyle::RowResize
    );
    grid.pointer_down(SurfaceKind::RowHeader, 25.0, 48.0);
    grid.pointer_move(25.0, 10.0);
    assert_eq!(grid.guide(), Some(ResizeGuide::Row { y: 40.0 }));
    grid.pointer_up(25.0, 10.0);
    assert_eq!(grid.sheet().row_height(1), Some(16.0));
    assert!(grid.undo());
    assert_eq!(grid.sheet().row_height(1), Some(24.0));
}

#[test]
fn wheel_scroll_is_clamped() {
    let mut grid = grid(100, 30);
    assert!(grid.wheel(0.0, 120.0));
    assert_eq!(grid.viewport().scroll_y, 120.0);
    assert!(grid.wheel(-500.0, 100_000.0));
    assert_eq!(grid.viewport().scroll_x, 0.0);
    assert_eq!(grid.viewport().scroll_y, 2160.0);
    assert!(!grid.wheel(0.0, 10.0));
    // The last row is painted in the row header
    assert!(grid.row_header().texts().contains(&"100"));
    assert!(!grid.row_header().texts().contains(&"50"));
}

#[test]
fn scrollbar_track_click_and_thumb_drag() {
    let mut grid = grid(100, 30);
    let metrics = grid.scrollbar(ScrollAxis::Vertical);
    assert_eq!(metrics.thumb_size, 30.0);
    assert_eq!(metrics.max_scroll, 2160.0);

    // Centering the 30px thumb on 120 puts it half way along 210px of travel
    assert!(grid.track_click(ScrollAxis::Vertical, 120.0));
    assert_eq!(grid.viewport().scroll_y, 1080.0);
    assert_eq!(grid.scrollbar(ScrollAxis::Vertical).thumb_pos, 105.0);

    grid.begin_thumb_drag(ScrollAxis::Vertical, 120.0);
    assert!(grid.drag_thumb(141.0));
    assert!((grid.viewport().scroll_y - 1296.0).abs() < 1e-9);
    grid.drag_thumb(10_000.0);
    assert_eq!(grid.viewport().scroll_y, 2160.0);
    grid.end_thumb_drag();
    assert!(!grid.drag_thumb(0.0));
    assert_eq!(grid.viewport().scroll_y, 2160.0);
}

#[test]
fn horizontal_scrollbar_uses_column_extent() {
    let grid = grid(100, 30);
    let metrics = grid.scrollbar(ScrollAxis::Horizontal);
    assert_eq!(metrics.max_scroll, 2600.0);
    assert!(metrics.thumb_size > 30.0);
    assert_eq!(metrics.thumb_pos, 0.0);
}

#[test]
fn keyboard_navigation_and_extension() {
    let mut grid = grid(100, 30);
    grid.pointer_down(SurfaceKind::Body, 150.0, 30.0);
    grid.pointer_up(150.0, 30.0);
    assert_eq!(*grid.selection(), Selection::range(1, 1, 1, 1));

    assert!(grid.key_down(KeyInput::shift(Key::ArrowRight)));
    assert!(grid.key_down(KeyInput::shift(Key::ArrowDown)));
    assert_eq!(*grid.selection(), Selection::range(1, 1, 2, 2));

    assert!(grid.key_down(KeyInput::new(Key::ArrowDown)));
    assert_eq!(*grid.selection(), Selection::cell(2, 1));
    assert!(grid.key_down(KeyInput::new(Key::Tab)));
    assert_eq!(*grid.selection(), Selection::cell(2, 2));
}

#[test]
fn keys_are_ignored_while_editing() {
    let mut grid = grid(10, 10);
    grid.set_selection(Selection::cell(0, 0));
    grid.begin_edit(0, 0).unwrap();
    assert!(!grid.key_down(KeyInput::new(Key::ArrowDown)));
    assert!(!grid.key_down(KeyInput::ctrl(Key::Char('z'))));
    assert_eq!(*grid.selection(), Selection::cell(0, 0));
    grid.commit_edit("x");
    assert!(grid.key_down(KeyInput::ctrl(Key::Char('z'))));
    assert_eq!(grid.sheet().value(0, 0), "");
}

#[test]
fn small_content_never_scrolls() {
    let mut grid = sized_grid(3, 2, 800.0, 600.0);
    assert!(!grid.wheel(100.0, 100.0));
    grid.pointer_down(SurfaceKind::Body, 10.0, 10.0);
    assert!(grid.pointer_move(795.0, 595.0));
    assert!(grid.auto_scroll_tick());
    assert_eq!(grid.viewport().scroll_x, 0.0);
    // Past the last row and column the end stays on the last cell hit
    assert_eq!(grid.selection().bounds(), (0, 0, 0, 0));
    grid.pointer_move(150.0, 50.0);
    assert_eq!(grid.selection().bounds(), (0, 0, 2, 1));
}

#[test]
fn shrinking_content_pulls_scroll_back_inside() {
    let mut grid = grid(100, 30);
    grid.scroll_to(1e9, 1e9);
    assert_eq!(grid.viewport().scroll_x, 2600.0);
    assert_eq!(grid.viewport().scroll_y, 2160.0);

    grid.push_command(Command::ResizeColumn {
        col: 0,
        old_width: 100.0,
        new_width: 30.0,
    });
    assert_eq!(grid.viewport().scroll_x, 2530.0);

    // Widen, scroll to the new edge, then undo the widening
    grid.push_command(Command::ResizeRow {
        row: 0,
        old_height: 24.0,
        new_height: 124.0,
    });
    grid.scroll_to(1e9, 1e9);
    assert_eq!(grid.viewport().scroll_y, 2260.0);
    assert!(grid.undo());
    assert_eq!(grid.viewport().scroll_y, 2160.0);

    // Redo the column shrink after undoing it at the far edge
    assert!(grid.undo());
    grid.scroll_to(1e9, 0.0);
    assert_eq!(grid.viewport().scroll_x, 2600.0);
    assert!(grid.redo());
    assert_eq!(grid.viewport().scroll_x, 2530.0);
}

#[test]
fn dragging_a_column_narrower_at_the_right_edge_keeps_scroll_valid() {
    let mut grid = grid(100, 30);
    grid.scroll_to(1e9, 0.0);
    // Column 29 ends at 3000 - 2600 = 400; its left border is at 300
    assert_eq!(
        grid.hit_test(SurfaceKind::ColumnHeader, 300.0, 12.0),
        HitTarget::ColumnBorder(28)
    );
    grid.pointer_down(SurfaceKind::ColumnHeader, 300.0, 12.0);
    grid.pointer_up(240.0, 12.0);
    assert_eq!(grid.sheet().col_width(28), Some(40.0));
    assert_eq!(grid.viewport().scroll_x, 2540.0);
}
