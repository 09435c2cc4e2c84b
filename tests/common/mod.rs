//! Shared builders for integration tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use gridcanvas::render::DisplayList;
use gridcanvas::Grid;

/// Body width of every test grid.
pub const BODY_WIDTH: f64 = 400.0;
/// Body height of every test grid.
pub const BODY_HEIGHT: f64 = 240.0;

/// A `rows` x `cols` grid of 100x24 cells in a 400x240 body.
pub fn grid(rows: usize, cols: usize) -> Grid<DisplayList> {
    sized_grid(rows, cols, BODY_WIDTH, BODY_HEIGHT)
}

/// A `rows` x `cols` grid whose body is `width` x `height`.
pub fn sized_grid(rows: usize, cols: usize, width: f64, height: f64) -> Grid<DisplayList> {
    Grid::new(
        DisplayList::new(width, height),
        DisplayList::new(width, 24.0),
        DisplayList::new(50.0, height),
        rows,
        cols,
    )
}

/// Records `{"id": i, "name": "row{i}", "score": i * 10}`.
pub fn records(count: usize) -> Vec<serde_json::Value> {
    (0..count)
        .map(|i| serde_json::json!({"id": i, "name": format!("row{i}"), "score": i * 10}))
        .collect()
}
