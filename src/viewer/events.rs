//! Pointer routing for `Grid`.
//!
//! Input is resolved to a [`HitTarget`] once, on pointer-down; the matching
//! handler then owns the drag until pointer-up. All public methods here end
//! with a redraw.

use super::handlers::Gesture;
use super::{Grid, GridState};
use crate::editor::EditorOverlay;
use crate::layout::{cell_at, column_header_at, row_header_at};
use crate::render::Surface;

/// Which of the three surfaces received the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Body,
    ColumnHeader,
    RowHeader,
}

/// Pointer affordance the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    ColResize,
    RowResize,
}

impl CursorStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ColResize => "col-resize",
            Self::RowResize => "row-resize",
        }
    }
}

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A body cell
    Cell { row: usize, col: usize },
    /// Column header interior
    ColumnHeader(usize),
    /// Right border of a column header
    ColumnBorder(usize),
    /// Row header interior
    RowHeader(usize),
    /// Bottom border of a row header
    RowBorder(usize),
    /// Outside every row/column
    None,
}

impl GridState {
    /// Resolve a point on `surface` (in that surface's own coordinates).
    pub fn hit_test(&self, surface: SurfaceKind, x: f64, y: f64) -> HitTarget {
        let tolerance = self.config.border_tolerance;
        match surface {
            SurfaceKind::Body => match cell_at(&self.sheet, &self.viewport, x, y).cell() {
                Some((row, col)) => HitTarget::Cell { row, col },
                None => HitTarget::None,
            },
            SurfaceKind::ColumnHeader => {
                let hit = column_header_at(&self.sheet, &self.viewport, x, tolerance);
                match hit.index {
                    Some(col) if hit.on_border => HitTarget::ColumnBorder(col),
                    Some(col) => HitTarget::ColumnHeader(col),
                    None => HitTarget::None,
                }
            }
            SurfaceKind::RowHeader => {
                let hit = row_header_at(&self.sheet, &self.viewport, y, tolerance);
                match hit.index {
                    Some(row) if hit.on_border => HitTarget::RowBorder(row),
                    Some(row) => HitTarget::RowHeader(row),
                    None => HitTarget::None,
                }
            }
        }
    }
}

impl<S: Surface> Grid<S> {
    pub fn hit_test(&self, surface: SurfaceKind, x: f64, y: f64) -> HitTarget {
        self.state.hit_test(surface, x, y)
    }

    /// Press on `surface` at `(x, y)` in that surface's coordinates.
    ///
    /// Header surfaces share the body's x (column header) or y (row header),
    /// so the point doubles as a body coordinate on the axis that matters.
    pub fn pointer_down(&mut self, surface: SurfaceKind, x: f64, y: f64) {
        let target = self.state.hit_test(surface, x, y);
        let state = &mut self.state;
        state.thumb_drag = None;
        state.auto_scroll.stop();
        state.auto_scroll.pointer = (x, y);
        state.gesture = Gesture::start(target, state, x, y);
        self.render_all();
    }

    /// Pointer moved to body coordinates `(x, y)`.
    ///
    /// Returns true while the pointer sits in the auto-scroll margin of an
    /// active selection drag; the host should then run
    /// [`Grid::auto_scroll_tick`] every animation frame.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let Some(mut gesture) = self.state.gesture.take() else {
            return false;
        };
        gesture.pointer_move(&mut self.state, x, y);
        if gesture.is_selecting() {
            let (width, height) = (self.state.viewport.width, self.state.viewport.height);
            let margin = self.state.config.auto_scroll_margin;
            self.state.auto_scroll.track(x, y, width, height, margin);
        }
        self.state.gesture = Some(gesture);
        self.render_all();
        self.state.auto_scroll.is_active()
    }

    /// Release at body coordinates `(x, y)`. Ends any drag and auto-scroll.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.state.auto_scroll.stop();
        self.state.thumb_drag = None;
        if let Some(gesture) = self.state.gesture.take() {
            gesture.pointer_up(&mut self.state, x, y);
            self.render_all();
        }
    }

    /// Cursor for a pointer hovering `surface` with no button held.
    ///
    /// While a resize drag is active the resize cursor sticks.
    pub fn hover(&mut self, surface: SurfaceKind, x: f64, y: f64) -> CursorStyle {
        if self.state.gesture.as_ref().is_some_and(Gesture::is_resizing) {
            return self.state.cursor;
        }
        self.state.cursor = match self.state.hit_test(surface, x, y) {
            HitTarget::ColumnBorder(_) => CursorStyle::ColResize,
            HitTarget::RowBorder(_) => CursorStyle::RowResize,
            _ => CursorStyle::Default,
        };
        self.state.cursor
    }

    /// True while a pointer gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.gesture.is_some()
    }

    /// Double-click on the body opens the editor on the cell underneath.
    pub fn double_click(&mut self, x: f64, y: f64) -> Option<EditorOverlay> {
        let (row, col) = cell_at(&self.state.sheet, &self.state.viewport, x, y).cell()?;
        self.begin_edit(row, col)
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
    use crate::render::{palette, DrawOp, ResizeGuide};
    use crate::types::{Selection, SelectionKind};
    use crate::viewer::test_support::grid;
    use test_case::test_case;

    #[test_case(SurfaceKind::Body, 150.0, 30.0, HitTarget::Cell { row: 1, col: 1 })]
    #[test_case(SurfaceKind::Body, 150.0, 5000.0, HitTarget::None)]
    #[test_case(SurfaceKind::ColumnHeader, 150.0, 10.0, HitTarget::ColumnHeader(1))]
    #[test_case(SurfaceKind::ColumnHeader, 198.0, 10.0, HitTarget::ColumnBorder(1))]
    #[test_case(SurfaceKind::ColumnHeader, 202.0, 10.0, HitTarget::ColumnBorder(1))]
    #[test_case(SurfaceKind::RowHeader, 10.0, 30.0, HitTarget::RowHeader(1))]
    #[test_case(SurfaceKind::RowHeader, 10.0, 47.0, HitTarget::RowBorder(1))]
    fn hit_targets(surface: SurfaceKind, x: f64, y: f64, expected: HitTarget) {
        assert_eq!(grid().hit_test(surface, x, y), expected);
    }

    #[test]
    fn click_drag_release_selects_range() {
        let mut grid = grid();
        grid.pointer_down(SurfaceKind::Body, 50.0, 12.0);
        assert!(grid.is_dragging());
        assert!(!grid.pointer_move(250.0, 60.0));
        grid.pointer_up(250.0, 60.0);
        assert!(!grid.is_dragging());
        assert_eq!(*grid.selection(), Selection::range(0, 0, 2, 2));
        // Selection persists after release
        assert_eq!(
            grid.body().fill_at(150.0, 36.0),
            Some(palette::SELECTION_FILL)
        );
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut grid = grid();
        assert!(!grid.pointer_move(100.0, 100.0));
        grid.pointer_up(100.0, 100.0);
        assert!(grid.selection().is_empty());
    }

    #[test]
    fn header_press_selects_whole_line() {
        let mut grid = grid();
        grid.pointer_down(SurfaceKind::RowHeader, 10.0, 60.0);
        assert_eq!(grid.selection().kind, SelectionKind::RowRange);
        assert_eq!(grid.selection().bounds(), (2, 0, 2, 29));
        grid.pointer_up(10.0, 60.0);

        grid.pointer_down(SurfaceKind::ColumnHeader, 250.0, 10.0);
        assert_eq!(grid.selection().kind, SelectionKind::ColumnRange);
        assert_eq!(grid.selection().bounds(), (0, 2, 99, 2));
    }

    #[test]
    fn column_border_drag_resizes_with_guide() {
        let mut grid = grid();
        assert_eq!(
            grid.hover(SurfaceKind::ColumnHeader, 100.0, 12.0),
            CursorStyle::ColResize
        );
        grid.pointer_down(SurfaceKind::ColumnHeader, 100.0, 12.0);
        grid.pointer_move(160.0, -30.0);
        assert_eq!(grid.guide(), Some(ResizeGuide::Column { x: 160.0 }));
        // Hover over a cell interior keeps the resize cursor mid-drag
        assert_eq!(
            grid.hover(SurfaceKind::Body, 160.0, 100.0),
            CursorStyle::ColResize
        );
        let dashed = grid
            .body()
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { dash, .. } if !dash.is_empty()))
            .count();
        assert_eq!(dashed, 1);

        grid.pointer_up(160.0, -30.0);
        assert_eq!(grid.sheet().col_width(0), Some(160.0));
        assert_eq!(grid.cursor(), CursorStyle::Default);
        assert_eq!(grid.guide(), None);
        // Resizing leaves the selection alone
        assert!(grid.selection().is_empty());

        assert!(grid.undo());
        assert_eq!(grid.sheet().col_width(0), Some(100.0));
    }

    #[test]
    fn row_border_drag_resizes() {
        let mut grid = grid();
        grid.pointer_down(SurfaceKind::RowHeader, 10.0, 24.0);
        assert_eq!(grid.cursor(), CursorStyle::RowResize);
        grid.pointer_move(-20.0, 50.0);
        grid.pointer_up(-20.0, 50.0);
        assert_eq!(grid.sheet().row_height(0), Some(50.0));
    }

    #[test]
    fn hover_cursor_over_headers() {
        let mut grid = grid();
        assert_eq!(
            grid.hover(SurfaceKind::RowHeader, 10.0, 71.0),
            CursorStyle::RowResize
        );
        assert_eq!(
            grid.hover(SurfaceKind::ColumnHeader, 150.0, 10.0),
            CursorStyle::Default
        );
        assert_eq!(CursorStyle::ColResize.as_css(), "col-resize");
    }

    #[test]
    fn press_outside_cells_clears_gesture() {
        let mut grid = grid();
        grid.pointer_down(SurfaceKind::Body, 10.0, 10.0);
        grid.pointer_up(10.0, 10.0);
        grid.pointer_down(SurfaceKind::Body, 10.0, 100_000.0);
        assert!(!grid.is_dragging());
        assert_eq!(*grid.selection(), Selection::range(0, 0, 0, 0));
    }
}
