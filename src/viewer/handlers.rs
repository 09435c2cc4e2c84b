//! Pointer handlers, one per interaction mode.
//!
//! The router hit-tests once on pointer-down and starts the matching
//! [`Gesture`]; moves and the final pointer-up go to that handler until it
//! ends. Move and up coordinates are body coordinates and may lie outside the
//! body while the pointer is captured.

use super::events::{CursorStyle, HitTarget};
use super::GridState;
use crate::command::Command;
use crate::layout::{cell_at, col_offset, row_offset, CellHit};
use crate::render::ResizeGuide;
use crate::types::Selection;

/// Capability set shared by every pointer mode.
pub trait PointerHandler {
    fn pointer_down(&mut self, state: &mut GridState, x: f64, y: f64);
    fn pointer_move(&mut self, state: &mut GridState, x: f64, y: f64);
    fn pointer_up(&mut self, state: &mut GridState, x: f64, y: f64);

    /// Drag-selecting modes take part in edge auto-scroll.
    fn is_selecting(&self) -> bool {
        false
    }
}

/// Hit-test a pointer held inside the body, so dragging past an edge keeps
/// tracking the outermost visible row/column.
fn clamped_hit(state: &GridState, x: f64, y: f64) -> CellHit {
    let max_x = (state.viewport.width - 1.0).max(0.0);
    let max_y = (state.viewport.height - 1.0).max(0.0);
    cell_at(
        &state.sheet,
        &state.viewport,
        x.clamp(0.0, max_x),
        y.clamp(0.0, max_y),
    )
}

/// Cell range drag anchored at the pressed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySelection {
    pub row: usize,
    pub col: usize,
}

impl PointerHandler for BodySelection {
    fn pointer_down(&mut self, state: &mut GridState, _x: f64, _y: f64) {
        state.selection = Selection::range(self.row, self.col, self.row, self.col);
    }

    fn pointer_move(&mut self, state: &mut GridState, x: f64, y: f64) {
        let hit = clamped_hit(state, x, y);
        if let Some(row) = hit.row {
            state.selection.end_row = row;
        }
        if let Some(col) = hit.col {
            state.selection.end_col = col;
        }
    }

    fn pointer_up(&mut self, _state: &mut GridState, _x: f64, _y: f64) {}

    fn is_selecting(&self) -> bool {
        true
    }
}

/// Whole-row drag across the row header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHeaderSelection {
    pub row: usize,
}

impl PointerHandler for RowHeaderSelection {
    fn pointer_down(&mut self, state: &mut GridState, _x: f64, _y: f64) {
        state.selection = Selection::row_range(self.row, self.row, state.sheet.last_col());
    }

    fn pointer_move(&mut self, state: &mut GridState, x: f64, y: f64) {
        if let Some(row) = clamped_hit(state, x, y).row {
            state.selection.end_row = row;
        }
    }

    fn pointer_up(&mut self, _state: &mut GridState, _x: f64, _y: f64) {}

    fn is_selecting(&self) -> bool {
        true
    }
}

/// Whole-column drag across the column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHeaderSelection {
    pub col: usize,
}

impl PointerHandler for ColumnHeaderSelection {
    fn pointer_down(&mut self, state: &mut GridState, _x: f64, _y: f64) {
        state.selection = Selection::column_range(self.col, self.col, state.sheet.last_row());
    }

    fn pointer_move(&mut self, state: &mut GridState, x: f64, y: f64) {
        if let Some(col) = clamped_hit(state, x, y).col {
            state.selection.end_col = col;
        }
    }

    fn pointer_up(&mut self, _state: &mut GridState, _x: f64, _y: f64) {}

    fn is_selecting(&self) -> bool {
        true
    }
}

/// Drag of a column's right border. The width is only committed on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnResize {
    pub col: usize,
    /// Pointer x at press
    pub start: f64,
    /// Width at press
    pub initial: f64,
}

impl ColumnResize {
    pub fn new(col: usize) -> Self {
        Self {
            col,
            start: 0.0,
            initial: 0.0,
        }
    }

    fn candidate(&self, state: &GridState, x: f64) -> f64 {
        (self.initial + x - self.start).max(state.config.min_col_width)
    }

    fn guide(&self, state: &GridState, width: f64) -> ResizeGuide {
        ResizeGuide::Column {
            x: col_offset(&state.sheet, self.col) - state.viewport.scroll_x + width,
        }
    }
}

impl PointerHandler for ColumnResize {
    fn pointer_down(&mut self, state: &mut GridState, x: f64, _y: f64) {
        self.start = x;
        self.initial = state.sheet.col_width(self.col).unwrap_or_default();
        state.guide = Some(self.guide(state, self.initial));
        state.cursor = CursorStyle::ColResize;
    }

    fn pointer_move(&mut self, state: &mut GridState, x: f64, _y: f64) {
        let width = self.candidate(state, x);
        state.guide = Some(self.guide(state, width));
    }

    fn pointer_up(&mut self, state: &mut GridState, x: f64, _y: f64) {
        state.guide = None;
        state.cursor = CursorStyle::Default;
        let delta = x - self.start;
        let new_width = self.candidate(state, x);
        if delta.abs() > state.config.resize_dead_zone
            && (new_width - self.initial).abs() > f64::EPSILON
        {
            state.push_command(Command::ResizeColumn {
                col: self.col,
                old_width: self.initial,
                new_width,
            });
        }
    }
}

/// Drag of a row's bottom border. The height is only committed on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowResize {
    pub row: usize,
    /// Pointer y at press
    pub start: f64,
    /// Height at press
    pub initial: f64,
}

impl RowResize {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            start: 0.0,
            initial: 0.0,
        }
    }

    fn candidate(&self, state: &GridState, y: f64) -> f64 {
        (self.initial + y - self.start).max(state.config.min_row_height)
    }

    fn guide(&self, state: &GridState, height: f64) -> ResizeGuide {
        ResizeGuide::Row {
            y: row_offset(&state.sheet, self.row) - state.viewport.scroll_y + height,
        }
    }
}

impl PointerHandler for RowResize {
    fn pointer_down(&mut self, state: &mut GridState, _x: f64, y: f64) {
        self.start = y;
        self.initial = state.sheet.row_height(self.row).unwrap_or_default();
        state.guide = Some(self.guide(state, self.initial));
        state.cursor = CursorStyle::RowResize;
    }

    fn pointer_move(&mut self, state: &mut GridState, _x: f64, y: f64) {
        let height = self.candidate(state, y);
        state.guide = Some(self.guide(state, height));
    }

    fn pointer_up(&mut self, state: &mut GridState, _x: f64, y: f64) {
        state.guide = None;
        state.cursor = CursorStyle::Default;
        let delta = y - self.start;
        let new_height = self.candidate(state, y);
        if delta.abs() > state.config.resize_dead_zone
            && (new_height - self.initial).abs() > f64::EPSILON
        {
            state.push_command(Command::ResizeRow {
                row: self.row,
                old_height: self.initial,
                new_height,
            });
        }
    }
}

/// The active pointer mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Gesture {
    Body(BodySelection),
    Rows(RowHeaderSelection),
    Columns(ColumnHeaderSelection),
    ColumnResize(ColumnResize),
    RowResize(RowResize),
}

impl Gesture {
    /// Pick the handler for `target` and run its pointer-down.
    pub(crate) fn start(target: HitTarget, state: &mut GridState, x: f64, y: f64) -> Option<Self> {
        let mut gesture = match target {
            HitTarget::Cell { row, col } => Self::Body(BodySelection { row, col }),
            HitTarget::RowHeader(row) => Self::Rows(RowHeaderSelection { row }),
            HitTarget::ColumnHeader(col) => Self::Columns(ColumnHeaderSelection { col }),
            HitTarget::ColumnBorder(col) => Self::ColumnResize(ColumnResize::new(col)),
            HitTarget::RowBorder(row) => Self::RowResize(RowResize::new(row)),
            HitTarget::None => return None,
        };
        gesture.handler().pointer_down(state, x, y);
        log::trace!("gesture start: {gesture:?}");
        Some(gesture)
    }

    fn handler(&mut self) -> &mut dyn PointerHandler {
        match self {
            Self::Body(h) => h,
            Self::Rows(h) => h,
            Self::Columns(h) => h,
            Self::ColumnResize(h) => h,
            Self::RowResize(h) => h,
        }
    }

    pub(crate) fn is_selecting(&self) -> bool {
        matches!(self, Self::Body(_) | Self::Rows(_) | Self::Columns(_))
    }

    pub(crate) fn is_resizing(&self) -> bool {
        matches!(self, Self::ColumnResize(_) | Self::RowResize(_))
    }

    pub(crate) fn pointer_move(&mut self, state: &mut GridState, x: f64, y: f64) {
        self.handler().pointer_move(state, x, y);
    }

    /// Re-derive the moving end of a selection drag from `(x, y)`.
    pub(crate) fn extend_to(&mut self, state: &mut GridState, x: f64, y: f64) {
        if self.is_selecting() {
            self.handler().pointer_move(state, x, y);
        }
    }

    pub(crate) fn pointer_up(mut self, state: &mut GridState, x: f64, y: f64) {
        self.handler().pointer_up(state, x, y);
        log::trace!("gesture end: {self:?}");
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
    use crate::viewer::test_support::grid;
    use crate::types::SelectionKind;

    fn start(state: &mut GridState, target: HitTarget, x: f64, y: f64) -> Gesture {
        Gesture::start(target, state, x, y).unwrap()
    }

    #[test]
    fn body_drag_extends_end_only() {
        let mut grid = grid();
        let state = grid.state_mut();
        let mut gesture = start(state, HitTarget::Cell { row: 1, col: 1 }, 150.0, 36.0);
        assert_eq!(state.selection, Selection::range(1, 1, 1, 1));

        gesture.pointer_move(state, 250.0, 80.0);
        assert_eq!(state.selection.anchor(), (1, 1));
        assert_eq!((state.selection.end_row, state.selection.end_col), (3, 2));

        // Up and left of the anchor
        gesture.pointer_move(state, 10.0, 5.0);
        assert_eq!(state.selection.bounds(), (0, 0, 1, 1));
        gesture.pointer_up(state, 10.0, 5.0);
        assert_eq!(state.selection.kind, SelectionKind::Range);
    }

    #[test]
    fn drag_past_body_edge_tracks_last_visible_cell() {
        let mut grid = grid();
        let state = grid.state_mut();
        let mut gesture = start(state, HitTarget::Cell { row: 0, col: 0 }, 10.0, 10.0);
        gesture.pointer_move(state, 900.0, 900.0);
        // 400x240 body: last visible column D, last visible row 10
        assert_eq!((state.selection.end_row, state.selection.end_col), (9, 3));
    }

    #[test]
    fn header_drags_select_whole_lines() {
        let mut grid = grid();
        let state = grid.state_mut();
        let mut rows = start(state, HitTarget::RowHeader(2), 20.0, 60.0);
        rows.pointer_move(state, 20.0, 130.0);
        assert_eq!(state.selection.kind, SelectionKind::RowRange);
        assert_eq!(state.selection.bounds(), (2, 0, 5, 29));

        let mut cols = start(state, HitTarget::ColumnHeader(3), 350.0, 10.0);
        cols.pointer_move(state, 120.0, 10.0);
        assert_eq!(state.selection.kind, SelectionKind::ColumnRange);
        assert_eq!(state.selection.bounds(), (0, 1, 99, 3));
    }

    #[test]
    fn column_resize_shows_guide_then_commits() {
        let mut grid = grid();
        let state = grid.state_mut();
        let mut gesture = start(state, HitTarget::ColumnBorder(0), 100.0, 10.0);
        assert_eq!(state.cursor, CursorStyle::ColResize);
        assert_eq!(state.guide, Some(ResizeGuide::Column { x: 100.0 }));

        gesture.pointer_move(state, 140.0, 10.0);
        assert_eq!(state.guide, Some(ResizeGuide::Column { x: 140.0 }));
        // Nothing committed mid-drag
        assert_eq!(state.sheet.col_width(0), Some(100.0));

        gesture.pointer_up(state, 140.0, 10.0);
        assert_eq!(state.sheet.col_width(0), Some(140.0));
        assert_eq!(state.guide, None);
        assert_eq!(state.cursor, CursorStyle::Default);
        assert_eq!(state.history.undo_len(), 1);
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let mut grid = grid();
        let state = grid.state_mut();
        let mut gesture = start(state, HitTarget::ColumnBorder(1), 200.0, 10.0);
        gesture.pointer_move(state, -500.0, 10.0);
        assert_eq!(state.guide, Some(ResizeGuide::Column { x: 130.0 }));
        gesture.pointer_up(state, -500.0, 10.0);
        assert_eq!(state.sheet.col_width(1), Some(30.0));

        let gesture = start(state, HitTarget::RowBorder(0), 0.0, 24.0);
        gesture.pointer_up(state, 0.0, -100.0);
        assert_eq!(state.sheet.row_height(0), Some(16.0));
    }

    #[test]
    fn small_resize_is_discarded() {
        let mut grid = grid();
        let state = grid.state_mut();
        let gesture = start(state, HitTarget::RowBorder(3), 0.0, 96.0);
        gesture.pointer_up(state, 0.0, 98.0);
        assert_eq!(state.sheet.row_height(3), Some(24.0));
        assert_eq!(state.history.undo_len(), 0);
        assert_eq!(state.guide, None);
    }

    #[test]
    fn guide_follows_scroll() {
        let mut grid = grid();
        let state = grid.state_mut();
        state.viewport.scroll_y = 48.0;
        let mut gesture = start(state, HitTarget::RowBorder(4), 0.0, 72.0);
        gesture.pointer_move(state, 0.0, 82.0);
        // Row 4 starts at 96, 48 above the scrolled top
        assert_eq!(state.guide, Some(ResizeGuide::Row { y: 82.0 }));
    }

    #[test]
    fn nothing_hit_starts_nothing() {
        let mut grid = grid();
        assert!(Gesture::start(HitTarget::None, grid.state_mut(), 0.0, 0.0).is_none());
    }
}
