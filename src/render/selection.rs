//! Selection overlay helpers.
//!
//! These helpers keep selection math testable without depending on Canvas APIs.

use super::palette::FILL_HANDLE_SIZE;
use crate::layout::{range_rect, Rect, Viewport};
use crate::types::{Selection, Sheet};

/// How a header entry is painted for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Normal,
    /// Row/column intersects a cell selection (tinted, accent edge)
    Highlighted,
    /// Row/column is itself selected (accent fill, light text)
    Selected,
}

/// Border and fill handle of a cell or range selection, in body pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOverlay {
    pub rect: Rect,
    pub handle: Rect,
}

impl SelectionOverlay {
    /// Border segments as `(x1, y1, x2, y2)`, leaving a notch around the fill handle.
    pub fn border_segments(&self) -> [(f64, f64, f64, f64); 4] {
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = self.rect;
        [
            (x, y, x + w, y),
            (x + w, y - 1.0, x + w, y + h - 4.0),
            (x + w - 4.0, y + h, x, y + h),
            (x, y + h + 1.0, x, y - 1.0),
        ]
    }
}

/// Overlay for `Cell`/`Range` selections; `None` for every other kind.
pub fn selection_overlay(
    sheet: &Sheet,
    viewport: &Viewport,
    selection: &Selection,
) -> Option<SelectionOverlay> {
    if !selection.kind.is_cell_like() {
        return None;
    }
    let rect = range_rect(sheet, viewport, selection.bounds())?;
    let inset = FILL_HANDLE_SIZE * 0.6;
    let handle = Rect::new(
        rect.right() - inset,
        rect.bottom() - inset,
        FILL_HANDLE_SIZE,
        FILL_HANDLE_SIZE,
    );
    Some(SelectionOverlay { rect, handle })
}

/// Body cells get the selection tint when inside a whole-row or whole-column
/// selection, or inside a cell range other than its anchor.
pub fn is_cell_tinted(selection: &Selection, row: usize, col: usize) -> bool {
    if selection.is_row_in_range(row) || selection.is_col_in_range(col) {
        return true;
    }
    selection.kind.is_cell_like()
        && selection.contains(row, col)
        && selection.anchor() != (row, col)
}

pub fn column_header_state(selection: &Selection, col: usize) -> HeaderState {
    let (_, min_col, _, max_col) = selection.bounds();
    if selection.is_col_in_range(col) {
        HeaderState::Selected
    } else if selection.kind.is_cell_like() && (min_col..=max_col).contains(&col) {
        HeaderState::Highlighted
    } else {
        HeaderState::Normal
    }
}

pub fn row_header_state(selection: &Selection, row: usize) -> HeaderState {
    let (min_row, _, max_row, _) = selection.bounds();
    if selection.is_row_in_range(row) {
        HeaderState::Selected
    } else if selection.kind.is_cell_like() && (min_row..=max_row).contains(&row) {
        HeaderState::Highlighted
    } else {
        HeaderState::Normal
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
    use crate::types::SelectionKind;

    #[test]
    fn overlay_covers_range_and_places_handle() {
        let sheet = Sheet::new(10, 10, 100.0, 20.0);
        let viewport = Viewport::new(500.0, 200.0);
        let overlay = selection_overlay(&sheet, &viewport, &Selection::range(2, 2, 1, 1)).unwrap();
        assert_eq!(overlay.rect, Rect::new(100.0, 20.0, 200.0, 40.0));
        assert!((overlay.handle.x - 297.3).abs() < 1e-9);
        assert_eq!(overlay.handle.width, 4.5);
        assert_eq!(overlay.border_segments()[0], (100.0, 20.0, 300.0, 20.0));
    }

    #[test]
    fn no_overlay_for_whole_line_selections() {
        let sheet = Sheet::new(10, 10, 100.0, 20.0);
        let viewport = Viewport::new(500.0, 200.0);
        assert!(selection_overlay(&sheet, &viewport, &Selection::row_range(1, 1, 9)).is_none());
        assert!(selection_overlay(&sheet, &viewport, &Selection::default()).is_none());
    }

    #[test]
    fn anchor_is_not_tinted() {
        let sel = Selection::range(1, 1, 2, 2);
        assert!(!is_cell_tinted(&sel, 1, 1));
        assert!(is_cell_tinted(&sel, 2, 1));
        assert!(!is_cell_tinted(&sel, 3, 1));

        let rows = Selection::row_range(1, 1, 9);
        assert!(is_cell_tinted(&rows, 1, 0));
        assert!(!is_cell_tinted(&Selection::default(), 0, 0));
    }

    #[test]
    fn header_states_mirror_selection() {
        let range = Selection::range(0, 1, 3, 2);
        assert_eq!(column_header_state(&range, 1), HeaderState::Highlighted);
        assert_eq!(column_header_state(&range, 3), HeaderState::Normal);
        assert_eq!(row_header_state(&range, 3), HeaderState::Highlighted);

        let cols = Selection::column_range(4, 5, 9);
        assert_eq!(column_header_state(&cols, 5), HeaderState::Selected);
        // Whole columns are not a cell selection, so rows stay normal
        assert_eq!(row_header_state(&cols, 0), HeaderState::Normal);

        let mut single_row = Selection::row_range(2, 2, 9);
        single_row.kind = SelectionKind::Row;
        assert_eq!(row_header_state(&single_row, 2), HeaderState::Selected);
    }
}
