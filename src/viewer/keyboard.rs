//! Keyboard shortcuts and navigation.

use super::{Grid, GridState};
use crate::layout::cell_rect;
use crate::render::Surface;
use crate::types::{Selection, SelectionKind};

/// Keys the grid reacts to, decoded from DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Tab,
    Enter,
    Escape,
    Char(char),
    Other,
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// A key press with its modifiers. `ctrl` also covers the platform meta key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::new(key)
        }
    }

    pub fn shift(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::new(key)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }

    /// One step from `(row, col)`, clamped to `last_row`/`last_col`.
    fn step(self, (row, col): (usize, usize), last_row: usize, last_col: usize) -> (usize, usize) {
        match self {
            Self::Up => (row.saturating_sub(1), col),
            Self::Down => ((row + 1).min(last_row), col),
            Self::Left => (row, col.saturating_sub(1)),
            Self::Right => (row, (col + 1).min(last_col)),
        }
    }
}

impl GridState {
    fn has_cells(&self) -> bool {
        self.sheet.row_count() > 0 && self.sheet.col_count() > 0
    }

    /// Plain arrow: collapse to a single cell one step from the anchor.
    fn move_active(&mut self, direction: Direction) {
        let (row, col) = if self.selection.is_empty() {
            (0, 0)
        } else {
            direction.step(
                self.selection.anchor(),
                self.sheet.last_row(),
                self.sheet.last_col(),
            )
        };
        self.selection = Selection::cell(row, col);
        self.scroll_into_view(row, col);
    }

    /// Shift+arrow: move the far end, keep the anchor.
    fn extend_active(&mut self, direction: Direction) {
        if self.selection.is_empty() {
            self.selection = Selection::cell(0, 0);
        }
        let (row, col) = direction.step(
            (self.selection.end_row, self.selection.end_col),
            self.sheet.last_row(),
            self.sheet.last_col(),
        );
        self.selection.kind = SelectionKind::Range;
        self.selection.end_row = row;
        self.selection.end_col = col;
        self.scroll_into_view(row, col);
    }

    /// Tab: next cell in reading order, wrapping across rows. Shift goes back.
    fn tab(&mut self, backwards: bool) {
        let (last_row, last_col) = (self.sheet.last_row(), self.sheet.last_col());
        let (row, col) = if self.selection.is_empty() {
            (0, 0)
        } else {
            let (row, col) = self.selection.anchor();
            if backwards {
                match (row, col) {
                    (_, c) if c > 0 => (row, c - 1),
                    (r, _) if r > 0 => (r - 1, last_col),
                    _ => (row, col),
                }
            } else if col < last_col {
                (row, col + 1)
            } else if row < last_row {
                (row + 1, 0)
            } else {
                (row, col)
            }
        };
        self.selection = Selection::cell(row, col);
        self.scroll_into_view(row, col);
    }

    /// Scroll the least distance that brings `(row, col)` fully into the body.
    pub(crate) fn scroll_into_view(&mut self, row: usize, col: usize) {
        let Some(rect) = cell_rect(&self.sheet, &self.viewport, row, col) else {
            return;
        };
        let mut x = self.viewport.scroll_x;
        let mut y = self.viewport.scroll_y;
        if rect.right() > self.viewport.width {
            x += rect.right() - self.viewport.width;
        }
        if rect.x < x - self.viewport.scroll_x {
            x = self.viewport.scroll_x + rect.x;
        }
        if rect.bottom() > self.viewport.height {
            y += rect.bottom() - self.viewport.height;
        }
        if rect.y < y - self.viewport.scroll_y {
            y = self.viewport.scroll_y + rect.y;
        }
        self.viewport.set_scroll(x, y, &self.sheet);
    }
}

impl<S: Surface> Grid<S> {
    /// Handle a key press. Returns true when the grid consumed it and the
    /// host should suppress the default action.
    ///
    /// Keys are ignored while the cell editor is open.
    pub fn key_down(&mut self, input: KeyInput) -> bool {
        if self.state.edit.is_some() || !self.state.has_cells() {
            return false;
        }
        if input.ctrl {
            return match input.key {
                Key::Char('z' | 'Z') => {
                    self.undo();
                    true
                }
                Key::Char('y' | 'Y') => {
                    self.redo();
                    true
                }
                _ => false,
            };
        }
        if let Some(direction) = Direction::from_key(input.key) {
            if input.shift {
                self.state.extend_active(direction);
            } else {
                self.state.move_active(direction);
            }
        } else if input.key == Key::Tab {
            self.state.tab(input.shift);
        } else {
            return false;
        }
        self.render_all();
        true
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
    use test_case::test_case;

    #[test_case("ArrowUp", Key::ArrowUp)]
    #[test_case("Left", Key::ArrowLeft)]
    #[test_case("Tab", Key::Tab)]
    #[test_case("z", Key::Char('z'))]
    #[test_case("Y", Key::Char('Y'))]
    #[test_case("Shift", Key::Other)]
    #[test_case("", Key::Other)]
    fn decodes_dom_keys(dom: &str, expected: Key) {
        assert_eq!(Key::from_dom(dom), expected);
    }

    #[test]
    fn first_arrow_selects_origin() {
        let mut grid = grid();
        assert!(grid.key_down(KeyInput::new(Key::ArrowDown)));
        assert_eq!(*grid.selection(), Selection::cell(0, 0));
        assert!(grid.key_down(KeyInput::new(Key::ArrowDown)));
        assert_eq!(*grid.selection(), Selection::cell(1, 0));
    }

    #[test]
    fn arrows_clamp_at_edges() {
        let mut grid = grid();
        grid.set_selection(Selection::cell(0, 0));
        grid.key_down(KeyInput::new(Key::ArrowUp));
        grid.key_down(KeyInput::new(Key::ArrowLeft));
        assert_eq!(*grid.selection(), Selection::cell(0, 0));

        grid.set_selection(Selection::cell(99, 29));
        grid.key_down(KeyInput::new(Key::ArrowDown));
        grid.key_down(KeyInput::new(Key::ArrowRight));
        assert_eq!(*grid.selection(), Selection::cell(99, 29));
    }

    #[test]
    fn plain_arrow_collapses_range_around_anchor() {
        let mut grid = grid();
        grid.set_selection(Selection::range(2, 2, 5, 5));
        grid.key_down(KeyInput::new(Key::ArrowRight));
        assert_eq!(*grid.selection(), Selection::cell(2, 3));
    }

    #[test]
    fn shift_arrow_extends_from_anchor() {
        let mut grid = grid();
        grid.set_selection(Selection::cell(3, 3));
        grid.key_down(KeyInput::shift(Key::ArrowDown));
        grid.key_down(KeyInput::shift(Key::ArrowDown));
        grid.key_down(KeyInput::shift(Key::ArrowLeft));
        assert_eq!(*grid.selection(), Selection::range(3, 3, 5, 2));
    }

    #[test]
    fn tab_wraps_rows() {
        let mut grid = grid();
        grid.set_selection(Selection::cell(0, 29));
        grid.key_down(KeyInput::new(Key::Tab));
        assert_eq!(*grid.selection(), Selection::cell(1, 0));
        grid.key_down(KeyInput::shift(Key::Tab));
        assert_eq!(*grid.selection(), Selection::cell(0, 29));

        grid.set_selection(Selection::cell(0, 0));
        grid.key_down(KeyInput::shift(Key::Tab));
        assert_eq!(*grid.selection(), Selection::cell(0, 0));
        grid.set_selection(Selection::cell(99, 29));
        grid.key_down(KeyInput::new(Key::Tab));
        assert_eq!(*grid.selection(), Selection::cell(99, 29));
    }

    #[test]
    fn navigation_scrolls_minimally() {
        let mut grid = grid();
        grid.set_selection(Selection::cell(9, 3));
        // Row 10 ends at 264, 24px past the 240px body
        grid.key_down(KeyInput::new(Key::ArrowDown));
        assert_eq!(grid.viewport().scroll_y, 24.0);
        assert_eq!(grid.viewport().scroll_x, 0.0);
        // Column E ends at 500
        grid.key_down(KeyInput::new(Key::ArrowRight));
        assert_eq!(grid.viewport().scroll_x, 100.0);

        grid.set_selection(Selection::cell(1, 0));
        grid.key_down(KeyInput::new(Key::ArrowUp));
        assert_eq!(grid.viewport().scroll_y, 0.0);
        assert_eq!(grid.viewport().scroll_x, 0.0);
    }

    #[test]
    fn ctrl_z_and_y_drive_history() {
        let mut grid = grid();
        grid.set_cell_value(0, 0, "7").unwrap();
        assert!(grid.key_down(KeyInput::ctrl(Key::Char('z'))));
        assert_eq!(grid.sheet().value(0, 0), "");
        assert!(grid.key_down(KeyInput::ctrl(Key::Char('y'))));
        assert_eq!(grid.sheet().value(0, 0), "7");
        assert!(!grid.key_down(KeyInput::ctrl(Key::Char('c'))));
    }

    #[test]
    fn unrelated_keys_pass_through() {
        let mut grid = grid();
        assert!(!grid.key_down(KeyInput::new(Key::Char('a'))));
        assert!(!grid.key_down(KeyInput::new(Key::Enter)));
        assert!(grid.selection().is_empty());
    }
}
