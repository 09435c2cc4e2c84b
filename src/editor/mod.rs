//! Inline cell editing.
//!
//! Opening an edit marks the cell as `editing` (its text is no longer painted)
//! and returns an [`EditorOverlay`] describing where the host should place a
//! text input. Committing pushes an `EditCell` command when the text changed,
//! so edits go through undo/redo like every other mutation.

#[cfg(target_arch = "wasm32")]
mod input;

#[cfg(target_arch = "wasm32")]
pub(crate) use input::InputOverlay;

use crate::command::Command;
use crate::layout::{cell_rect, Rect};
use crate::render::{Surface, TextAlign};
use crate::types::is_integer_literal;
use crate::viewer::Grid;

/// The cell under edit and its value when the edit began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub row: usize,
    pub col: usize,
    pub original: String,
}

/// Placement of the text input, in body coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOverlay {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    /// Initial text, shown fully selected
    pub value: String,
    /// Mirrors how the cell paints its value
    pub align: TextAlign,
}

impl<S: Surface> Grid<S> {
    /// Open the editor on `(row, col)`. Returns `None` outside the grid.
    ///
    /// An edit already in progress is cancelled first.
    pub fn begin_edit(&mut self, row: usize, col: usize) -> Option<EditorOverlay> {
        let original = self.sheet().cell(row, col)?.value.clone();
        self.close_session();

        let state = self.state_mut();
        if let Some(cell) = state.sheet.cell_mut(row, col) {
            cell.editing = true;
        }
        state.edit = Some(EditSession {
            row,
            col,
            original,
        });
        log::debug!("edit start at ({row}, {col})");
        self.render_all();
        self.editor_overlay()
    }

    /// Current placement of the open editor, following scroll and resizes.
    pub fn editor_overlay(&self) -> Option<EditorOverlay> {
        let state = self.state();
        let session = state.edit.as_ref()?;
        let rect = cell_rect(&state.sheet, &state.viewport, session.row, session.col)?;
        let align = if is_integer_literal(&session.original) {
            TextAlign::Right
        } else {
            TextAlign::Left
        };
        Some(EditorOverlay {
            row: session.row,
            col: session.col,
            rect,
            value: session.original.clone(),
            align,
        })
    }

    pub fn editing_cell(&self) -> Option<(usize, usize)> {
        self.state().edit.as_ref().map(|s| (s.row, s.col))
    }

    /// Close the editor with `value`. Returns true if an edit was recorded.
    ///
    /// An unchanged value only redraws.
    pub fn commit_edit(&mut self, value: &str) -> bool {
        let Some(session) = self.close_session() else {
            return false;
        };
        if session.original == value {
            self.render_all();
            return false;
        }
        self.push_command(Command::EditCell {
            row: session.row,
            col: session.col,
            old_value: session.original,
            new_value: value.to_string(),
        });
        true
    }

    /// Close the editor without changing the cell.
    pub fn cancel_edit(&mut self) {
        if self.close_session().is_some() {
            self.render_all();
        }
    }

    fn close_session(&mut self) -> Option<EditSession> {
        let state = self.state_mut();
        let session = state.edit.take()?;
        if let Some(cell) = state.sheet.cell_mut(session.row, session.col) {
            cell.editing = false;
        }
        Some(session)
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
    use crate::viewer::SurfaceKind;

    #[test]
    fn double_click_edit_commit_undo() {
        let mut grid = grid();
        grid.set_cell_value(0, 0, "5").unwrap();
        let before = grid.history().undo_len();

        grid.pointer_down(SurfaceKind::Body, 40.0, 10.0);
        grid.pointer_up(40.0, 10.0);
        let overlay = grid.double_click(40.0, 10.0).unwrap();
        assert_eq!((overlay.row, overlay.col), (0, 0));
        assert_eq!(overlay.rect, Rect::new(0.0, 0.0, 100.0, 24.0));
        assert_eq!(overlay.value, "5");
        assert_eq!(overlay.align, TextAlign::Right);
        assert!(grid.sheet().cell(0, 0).unwrap().editing);
        assert!(grid.body().find_text("5").is_none());

        assert!(grid.commit_edit("42"));
        assert_eq!(grid.sheet().value(0, 0), "42");
        assert!(!grid.sheet().cell(0, 0).unwrap().editing);
        assert_eq!(grid.history().undo_len(), before + 1);
        assert_eq!(grid.editing_cell(), None);

        assert!(grid.undo());
        assert_eq!(grid.sheet().value(0, 0), "5");
    }

    #[test]
    fn unchanged_commit_records_nothing() {
        let mut grid = grid();
        grid.begin_edit(2, 1).unwrap();
        assert_eq!(grid.editing_cell(), Some((2, 1)));
        assert!(!grid.commit_edit(""));
        assert_eq!(grid.history().undo_len(), 0);
        assert!(!grid.sheet().cell(2, 1).unwrap().editing);
    }

    #[test]
    fn cancel_restores_painting() {
        let mut grid = grid();
        grid.set_cell_value(1, 1, "text").unwrap();
        let overlay = grid.begin_edit(1, 1).unwrap();
        assert_eq!(overlay.align, TextAlign::Left);
        assert!(grid.body().find_text("text").is_none());
        grid.cancel_edit();
        assert!(grid.body().find_text("text").is_some());
        assert_eq!(grid.sheet().value(1, 1), "text");
        assert!(!grid.commit_edit("ignored"));
    }

    #[test]
    fn out_of_range_edit_is_none() {
        let mut grid = grid();
        assert!(grid.begin_edit(100, 0).is_none());
        assert!(grid.double_click(10.0, 10_000.0).is_none());
        assert_eq!(grid.editing_cell(), None);
    }

    #[test]
    fn overlay_follows_scroll() {
        let mut grid = grid();
        grid.begin_edit(3, 2).unwrap();
        grid.wheel(50.0, 24.0);
        let overlay = grid.editor_overlay().unwrap();
        assert_eq!(overlay.rect, Rect::new(150.0, 48.0, 100.0, 24.0));
    }

    #[test]
    fn reopening_cancels_previous_session() {
        let mut grid = grid();
        grid.begin_edit(0, 0).unwrap();
        grid.begin_edit(0, 1).unwrap();
        assert!(!grid.sheet().cell(0, 0).unwrap().editing);
        assert!(grid.sheet().cell(0, 1).unwrap().editing);
    }
}
