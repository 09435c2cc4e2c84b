//! Pixel <-> (row, col) mapping over variable-size rows and columns.
//!
//! Positions are accumulated from index 0 starting at `-scroll`, so every
//! lookup is a monotonic walk over strictly positive band sizes. Walks stop
//! as soon as the accumulated offset passes the viewport extent.

use super::Viewport;
use crate::types::Sheet;

/// Rectangle in body-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Result of a body hit test. Axes resolve independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellHit {
    pub row: Option<usize>,
    pub col: Option<usize>,
}

impl CellHit {
    /// Both axes resolved.
    pub fn cell(self) -> Option<(usize, usize)> {
        Some((self.row?, self.col?))
    }
}

/// Result of a header hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderHit {
    pub index: Option<usize>,
    /// Pointer is within the border tolerance of `index`'s trailing edge.
    pub on_border: bool,
}

/// A visible row or column: its index, screen offset and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub index: usize,
    pub start: f64,
    pub size: f64,
}

impl Band {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

fn band_at(sizes: impl Iterator<Item = f64>, scroll: f64, pos: f64, extent: f64) -> Option<usize> {
    let mut start = -scroll;
    for (index, size) in sizes.enumerate() {
        if pos >= start && pos < start + size {
            return Some(index);
        }
        start += size;
        if start > extent {
            break;
        }
    }
    None
}

fn header_band_at(
    sizes: impl Iterator<Item = f64>,
    scroll: f64,
    pos: f64,
    extent: f64,
    tolerance: f64,
) -> HeaderHit {
    let mut start = -scroll;
    for (index, size) in sizes.enumerate() {
        let end = start + size;
        // Border wins over the interior of the next band
        if pos >= end - tolerance && pos <= end + tolerance {
            return HeaderHit {
                index: Some(index),
                on_border: true,
            };
        }
        if pos >= start && pos < end {
            return HeaderHit {
                index: Some(index),
                on_border: false,
            };
        }
        start = end;
        if start > extent {
            break;
        }
    }
    HeaderHit::default()
}

/// Bands overlapping `[0, extent]` after scrolling.
fn visible_bands(sizes: impl Iterator<Item = f64>, scroll: f64, extent: f64) -> Vec<Band> {
    let mut bands = Vec::new();
    let mut start = -scroll;
    for (index, size) in sizes.enumerate() {
        if start > extent {
            break;
        }
        if start + size >= 0.0 {
            bands.push(Band { index, start, size });
        }
        start += size;
    }
    bands
}

fn offset_of(sizes: impl Iterator<Item = f64>, index: usize) -> f64 {
    sizes.take(index).sum()
}

/// Which cell lies under body point `(px, py)`.
pub fn cell_at(sheet: &Sheet, viewport: &Viewport, px: f64, py: f64) -> CellHit {
    CellHit {
        row: band_at(
            sheet.rows.iter().map(|r| r.height),
            viewport.scroll_y,
            py,
            viewport.height,
        ),
        col: band_at(
            sheet.columns.iter().map(|c| c.width),
            viewport.scroll_x,
            px,
            viewport.width,
        ),
    }
}

/// Which column header lies under `px`, and whether `px` is on its right border.
pub fn column_header_at(sheet: &Sheet, viewport: &Viewport, px: f64, tolerance: f64) -> HeaderHit {
    header_band_at(
        sheet.columns.iter().map(|c| c.width),
        viewport.scroll_x,
        px,
        viewport.width,
        tolerance,
    )
}

/// Which row header lies under `py`, and whether `py` is on its bottom border.
pub fn row_header_at(sheet: &Sheet, viewport: &Viewport, py: f64, tolerance: f64) -> HeaderHit {
    header_band_at(
        sheet.rows.iter().map(|r| r.height),
        viewport.scroll_y,
        py,
        viewport.height,
        tolerance,
    )
}

/// Rows visible in the viewport, top to bottom.
pub fn visible_rows(sheet: &Sheet, viewport: &Viewport) -> Vec<Band> {
    visible_bands(
        sheet.rows.iter().map(|r| r.height),
        viewport.scroll_y,
        viewport.height,
    )
}

/// Columns visible in the viewport, left to right.
pub fn visible_cols(sheet: &Sheet, viewport: &Viewport) -> Vec<Band> {
    visible_bands(
        sheet.columns.iter().map(|c| c.width),
        viewport.scroll_x,
        viewport.width,
    )
}

/// Unscrolled x of column `col`'s left edge.
pub fn col_offset(sheet: &Sheet, col: usize) -> f64 {
    offset_of(sheet.columns.iter().map(|c| c.width), col)
}

/// Unscrolled y of row `row`'s top edge.
pub fn row_offset(sheet: &Sheet, row: usize) -> f64 {
    offset_of(sheet.rows.iter().map(|r| r.height), row)
}

/// Screen rectangle of one cell, or `None` when out of range.
pub fn cell_rect(sheet: &Sheet, viewport: &Viewport, row: usize, col: usize) -> Option<Rect> {
    let width = sheet.col_width(col)?;
    let height = sheet.row_height(row)?;
    Some(Rect::new(
        col_offset(sheet, col) - viewport.scroll_x,
        row_offset(sheet, row) - viewport.scroll_y,
        width,
        height,
    ))
}

/// Screen rectangle covering rows `min_row..=max_row` and columns `min_col..=max_col`.
pub fn range_rect(
    sheet: &Sheet,
    viewport: &Viewport,
    (min_row, min_col, max_row, max_col): (usize, usize, usize, usize),
) -> Option<Rect> {
    let top_left = cell_rect(sheet, viewport, min_row, min_col)?;
    let bottom_right = cell_rect(sheet, viewport, max_row, max_col)?;
    Some(Rect::new(
        top_left.x,
        top_left.y,
        bottom_right.right() - top_left.x,
        bottom_right.bottom() - top_left.y,
    ))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sheet() -> Sheet {
        let mut sheet = Sheet::new(100, 20, 100.0, 24.0);
        sheet.columns[1].width = 50.0;
        sheet.rows[2].height = 40.0;
        sheet
    }

    #[test]
    fn cell_at_accounts_for_variable_sizes() {
        let sheet = sheet();
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(cell_at(&sheet, &viewport, 0.0, 0.0).cell(), Some((0, 0)));
        assert_eq!(cell_at(&sheet, &viewport, 120.0, 30.0).cell(), Some((1, 1)));
        assert_eq!(cell_at(&sheet, &viewport, 150.0, 48.0).cell(), Some((2, 2)));
        assert_eq!(cell_at(&sheet, &viewport, 150.0, 87.9).cell(), Some((2, 2)));
        assert_eq!(cell_at(&sheet, &viewport, 150.0, 88.0).cell(), Some((3, 2)));
    }

    #[test]
    fn cell_at_applies_scroll() {
        let sheet = sheet();
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_scroll(150.0, 48.0, &sheet);
        // Column 2 starts at 150, row 2 starts at 48
        assert_eq!(cell_at(&sheet, &viewport, 0.0, 0.0).cell(), Some((2, 2)));
    }

    #[test]
    fn axes_miss_independently() {
        let sheet = Sheet::new(2, 2, 100.0, 24.0);
        let viewport = Viewport::new(800.0, 600.0);
        let hit = cell_at(&sheet, &viewport, 50.0, 500.0);
        assert_eq!(hit.row, None);
        assert_eq!(hit.col, Some(0));
        assert_eq!(hit.cell(), None);

        let hit = cell_at(&sheet, &viewport, -1.0, 10.0);
        assert_eq!(hit.col, None);
        assert_eq!(hit.row, Some(0));
    }

    #[test]
    fn header_border_takes_priority() {
        let sheet = sheet();
        let viewport = Viewport::new(800.0, 600.0);
        // Column 0 right edge at 100
        let hit = column_header_at(&sheet, &viewport, 98.0, 3.0);
        assert_eq!(hit, HeaderHit { index: Some(0), on_border: true });
        // Inside column 1 but within tolerance of column 0's edge
        let hit = column_header_at(&sheet, &viewport, 102.5, 3.0);
        assert_eq!(hit, HeaderHit { index: Some(0), on_border: true });
        let hit = column_header_at(&sheet, &viewport, 120.0, 3.0);
        assert_eq!(hit, HeaderHit { index: Some(1), on_border: false });
        // Left edge of the grid is not a border
        let hit = column_header_at(&sheet, &viewport, 1.0, 3.0);
        assert_eq!(hit, HeaderHit { index: Some(0), on_border: false });
    }

    #[test]
    fn row_header_border() {
        let sheet = sheet();
        let viewport = Viewport::new(800.0, 600.0);
        let hit = row_header_at(&sheet, &viewport, 47.0, 3.0);
        assert_eq!(hit, HeaderHit { index: Some(1), on_border: true });
        let hit = row_header_at(&sheet, &viewport, 60.0, 3.0);
        assert_eq!(hit, HeaderHit { index: Some(2), on_border: false });
    }

    #[test]
    fn header_miss_past_last_band() {
        let sheet = Sheet::new(2, 2, 100.0, 24.0);
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(column_header_at(&sheet, &viewport, 400.0, 3.0), HeaderHit::default());
        assert_eq!(row_header_at(&sheet, &viewport, 400.0, 3.0), HeaderHit::default());
    }

    #[test]
    fn visible_bands_skip_scrolled_out() {
        let sheet = Sheet::new(1000, 10, 100.0, 24.0);
        let mut viewport = Viewport::new(250.0, 100.0);
        viewport.set_scroll(150.0, 30.0, &sheet);
        let cols = visible_cols(&sheet, &viewport);
        assert_eq!(cols.iter().map(|b| b.index).collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert_eq!(cols[0].start, -50.0);
        let rows = visible_rows(&sheet, &viewport);
        assert_eq!(rows.first().unwrap().index, 1);
        assert_eq!(rows.last().unwrap().index, 5);
    }

    #[test]
    fn range_rect_spans_cells() {
        let sheet = sheet();
        let viewport = Viewport::new(800.0, 600.0);
        let rect = range_rect(&sheet, &viewport, (1, 0, 2, 1)).unwrap();
        assert_eq!(rect, Rect::new(0.0, 24.0, 150.0, 64.0));
        assert!(range_rect(&sheet, &viewport, (0, 0, 100, 0)).is_none());
    }

    proptest! {
        #[test]
        fn hit_test_round_trip(
            widths in prop::collection::vec(30.0f64..200.0, 1..40),
            heights in prop::collection::vec(16.0f64..80.0, 1..60),
            pick in (0.0f64..1.0, 0.0f64..1.0),
            scroll in (0.0f64..1.0, 0.0f64..1.0),
            inset in (0.05f64..0.95, 0.05f64..0.95),
        ) {
            let mut sheet = Sheet::new(heights.len(), widths.len(), 100.0, 24.0);
            for (col, w) in sheet.columns.iter_mut().zip(&widths) {
                col.width = *w;
            }
            for (row, h) in sheet.rows.iter_mut().zip(&heights) {
                row.height = *h;
            }
            let row = ((pick.0 * heights.len() as f64) as usize).min(heights.len() - 1);
            let col = ((pick.1 * widths.len() as f64) as usize).min(widths.len() - 1);

            // Viewport large enough that the target is never past the early exit
            let mut viewport = Viewport::new(sheet.total_width() + 1.0, sheet.total_height() + 1.0);
            viewport.scroll_x = scroll.0 * col_offset(&sheet, col);
            viewport.scroll_y = scroll.1 * row_offset(&sheet, row);

            let rect = cell_rect(&sheet, &viewport, row, col).unwrap();
            let px = rect.x + rect.width * inset.0;
            let py = rect.y + rect.height * inset.1;
            prop_assert_eq!(cell_at(&sheet, &viewport, px, py).cell(), Some((row, col)));
        }
    }
}
