//! Layout: viewport scrolling and coordinate mapping.
//!
//! This module handles:
//! - Scroll state clamped to the content extent
//! - Hit testing body points and header edges to row/column indices
//! - Mapping cells and ranges back to screen rectangles
//! - Computing the visible band of rows and columns

mod hit_test;
mod viewport;

pub use hit_test::{
    cell_at, cell_rect, col_offset, column_header_at, range_rect, row_header_at, row_offset,
    visible_cols, visible_rows, Band, CellHit, HeaderHit, Rect,
};
pub use viewport::Viewport;
