//! The `Grid` orchestrator.
//!
//! `Grid` owns the sheet, viewport, selection, undo history and the three
//! drawing surfaces. It is the only mutator of that state: input arrives
//! through the router methods in [`events`], [`keyboard`] and [`scroll`], each
//! of which ends with a full redraw of the visible band.
//!
//! Everything here is host-agnostic. The wasm binding in `crate::web` wires
//! DOM events to these methods; tests drive them with recording surfaces.

mod events;
mod handlers;
mod keyboard;
mod scroll;

pub use events::{CursorStyle, HitTarget, SurfaceKind};
pub use handlers::{
    BodySelection, ColumnHeaderSelection, ColumnResize, PointerHandler, RowHeaderSelection,
    RowResize,
};
pub use keyboard::{Key, KeyInput};
pub use scroll::{AutoScroll, ScrollAxis, ScrollbarMetrics, ThumbDrag, MIN_THUMB_SIZE};

use serde_json::Value;

use crate::command::{Command, History};
use crate::editor::EditSession;
use crate::error::{GridError, Result};
use crate::layout::Viewport;
use crate::render::{self, RenderParams, ResizeGuide, Surface};
use crate::stats::{compute_selection_stats, SelectionStats};
use crate::types::{GridConfig, Selection, Sheet};

use handlers::Gesture;

/// Everything input handlers may read or mutate, minus the surfaces.
#[derive(Debug)]
pub struct GridState {
    pub(crate) sheet: Sheet,
    pub(crate) viewport: Viewport,
    pub(crate) selection: Selection,
    pub(crate) config: GridConfig,
    pub(crate) history: History,
    pub(crate) guide: Option<ResizeGuide>,
    pub(crate) cursor: CursorStyle,
    pub(crate) edit: Option<EditSession>,
    pub(crate) auto_scroll: AutoScroll,
    pub(crate) gesture: Option<Gesture>,
    pub(crate) thumb_drag: Option<ThumbDrag>,
}

impl GridState {
    fn new(rows: usize, cols: usize, width: f64, height: f64, config: GridConfig) -> Self {
        Self {
            sheet: Sheet::new(rows, cols, config.default_col_width, config.default_row_height),
            viewport: Viewport::new(width, height),
            selection: Selection::default(),
            config,
            history: History::new(),
            guide: None,
            cursor: CursorStyle::Default,
            edit: None,
            auto_scroll: AutoScroll::default(),
            gesture: None,
            thumb_drag: None,
        }
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Apply a command and record it for undo.
    pub fn push_command(&mut self, command: Command) {
        self.history.push(command, &mut self.sheet);
        self.viewport.clamp_scroll(&self.sheet);
    }

    /// Revert the last command, keeping scroll inside the content.
    pub(crate) fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.sheet);
        self.viewport.clamp_scroll(&self.sheet);
        undone
    }

    pub(crate) fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.sheet);
        self.viewport.clamp_scroll(&self.sheet);
        redone
    }

    /// Snapshot used by the painters.
    pub(crate) fn params(&self) -> RenderParams<'_> {
        RenderParams {
            sheet: &self.sheet,
            viewport: &self.viewport,
            selection: &self.selection,
            config: &self.config,
            guide: self.guide,
        }
    }

    /// Pull selection indices back inside the sheet. Empty sheets clear it.
    fn clamp_selection(&self, selection: Selection) -> Selection {
        if self.sheet.row_count() == 0 || self.sheet.col_count() == 0 || selection.is_empty() {
            return Selection::default();
        }
        let (last_row, last_col) = (self.sheet.last_row(), self.sheet.last_col());
        Selection {
            kind: selection.kind,
            start_row: selection.start_row.min(last_row),
            start_col: selection.start_col.min(last_col),
            end_row: selection.end_row.min(last_row),
            end_col: selection.end_col.min(last_col),
        }
    }
}

/// A spreadsheet grid drawn onto three surfaces: body, column header and row header.
///
/// Header surfaces share the body's coordinate system along their long axis:
/// x on the column header is body x, y on the row header is body y.
pub struct Grid<S: Surface> {
    state: GridState,
    body: S,
    col_header: S,
    row_header: S,
}

impl<S: Surface> Grid<S> {
    /// Create a `rows` x `cols` grid with the default configuration.
    pub fn new(body: S, col_header: S, row_header: S, rows: usize, cols: usize) -> Self {
        Self::with_config(body, col_header, row_header, rows, cols, GridConfig::default())
    }

    /// Create a grid and paint the first frame.
    pub fn with_config(
        body: S,
        col_header: S,
        row_header: S,
        rows: usize,
        cols: usize,
        config: GridConfig,
    ) -> Self {
        let state = GridState::new(rows, cols, body.width(), body.height(), config);
        let mut grid = Self {
            state,
            body,
            col_header,
            row_header,
        };
        log::debug!("grid created: {rows} rows x {cols} columns");
        grid.render_all();
        grid
    }

    /// Redraw all three surfaces from current state.
    pub fn render_all(&mut self) {
        let params = self.state.params();
        render::render_all(
            &params,
            &mut self.col_header,
            &mut self.row_header,
            &mut self.body,
        );
    }

    /// The body is now `width` x `height` logical pixels.
    ///
    /// Headers follow: the column header keeps its height and takes the body
    /// width, the row header keeps its width and takes the body height.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        let (header_height, header_width) = (
            self.state.config.col_header_height,
            self.state.config.row_header_width,
        );
        self.body.resize(width, height, dpr);
        self.col_header.resize(width, header_height, dpr);
        self.row_header.resize(header_width, height, dpr);
        self.state
            .viewport
            .resize(self.body.width(), self.body.height(), &self.state.sheet);
        log::debug!("resized to {width}x{height} @ {dpr}");
        self.render_all();
    }

    /// Copy records into rows, starting at row 0. Returns the rows written.
    ///
    /// Data beyond the grid's fixed dimensions is ignored.
    pub fn load_data(&mut self, records: &[Value]) -> usize {
        let written = self.state.sheet.load_records(records);
        log::debug!(
            "loaded {written} of {} records into {} rows",
            records.len(),
            self.state.sheet.row_count()
        );
        self.render_all();
        written
    }

    /// Parse a JSON array of records and load it.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        Ok(self.load_data(&records))
    }

    pub fn compute_selection_stats(&self) -> SelectionStats {
        compute_selection_stats(&self.state.sheet, &self.state.selection)
    }

    /// Stats formatted for a status bar.
    pub fn status_text(&self) -> String {
        self.compute_selection_stats().status_text()
    }

    /// Apply `command`, record it for undo and redraw.
    pub fn push_command(&mut self, command: Command) {
        self.state.push_command(command);
        self.render_all();
    }

    /// Revert the last command. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.state.undo();
        if undone {
            self.render_all();
        }
        undone
    }

    /// Re-apply the last undone command. Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.state.redo();
        if redone {
            self.render_all();
        }
        redone
    }

    /// Set a cell's value through the undo history.
    pub fn set_cell_value(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        let old_value = self
            .state
            .sheet
            .cell(row, col)
            .map(|cell| cell.value.clone())
            .ok_or(GridError::Index {
                row,
                col,
                rows: self.state.sheet.row_count(),
                cols: self.state.sheet.col_count(),
            })?;
        if old_value != value {
            self.push_command(Command::EditCell {
                row,
                col,
                old_value,
                new_value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Replace the selection, clamped to the grid.
    pub fn set_selection(&mut self, selection: Selection) {
        self.state.selection = self.state.clamp_selection(selection);
        self.render_all();
    }

    /// Swap in a new configuration. Sizes already in the sheet are kept.
    pub fn set_config(&mut self, config: GridConfig) {
        self.state.config = config;
        self.render_all();
    }

    pub fn sheet(&self) -> &Sheet {
        &self.state.sheet
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.state.viewport
    }

    pub fn config(&self) -> &GridConfig {
        &self.state.config
    }

    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// Cursor affordance for the last pointer position.
    pub fn cursor(&self) -> CursorStyle {
        self.state.cursor
    }

    /// Live resize guide, if a resize drag is in progress.
    pub fn guide(&self) -> Option<ResizeGuide> {
        self.state.guide
    }

    pub fn body(&self) -> &S {
        &self.body
    }

    pub fn column_header(&self) -> &S {
        &self.col_header
    }

    pub fn row_header(&self) -> &S {
        &self.row_header
    }

    pub(crate) fn state(&self) -> &GridState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut GridState {
        &mut self.state
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Grid;
    use crate::render::DisplayList;

    /// 100 rows x 30 columns of 100x24 cells in a 400x240 body.
    pub(crate) fn grid() -> Grid<DisplayList> {
        Grid::new(
            DisplayList::new(400.0, 240.0),
            DisplayList::new(400.0, 24.0),
            DisplayList::new(50.0, 240.0),
            100,
            30,
        )
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
    use super::test_support::grid;
    use super::*;
    use crate::types::SelectionKind;
    use serde_json::json;

    #[test]
    fn construction_paints_first_frame() {
        let grid = grid();
        assert_eq!(grid.column_header().texts().first(), Some(&"A"));
        assert_eq!(grid.row_header().texts().first(), Some(&"1"));
        assert_eq!(grid.viewport().width, 400.0);
        assert!(grid.selection().is_empty());
    }

    #[test]
    fn load_data_renders_values() {
        let mut grid = grid();
        let written = grid.load_data(&[
            json!({"id": 1, "name": "Raj"}),
            json!({"id": 2, "name": "Ana"}),
        ]);
        assert_eq!(written, 2);
        assert_eq!(grid.sheet().value(1, 1), "Ana");
        assert!(grid.body().find_text("Raj").is_some());
    }

    #[test]
    fn load_json_reports_bad_input() {
        let mut grid = grid();
        assert_eq!(grid.load_json(r#"[["a", "b"]]"#).unwrap(), 1);
        assert_eq!(grid.sheet().value(0, 1), "b");
        assert!(matches!(grid.load_json("{oops"), Err(GridError::Data(_))));
    }

    #[test]
    fn set_cell_value_is_undoable() {
        let mut grid = grid();
        grid.set_cell_value(3, 2, "hello").unwrap();
        assert_eq!(grid.sheet().value(3, 2), "hello");
        assert_eq!(grid.history().undo_len(), 1);

        // Same value again records nothing
        grid.set_cell_value(3, 2, "hello").unwrap();
        assert_eq!(grid.history().undo_len(), 1);

        assert!(grid.undo());
        assert_eq!(grid.sheet().value(3, 2), "");
        assert!(grid.redo());
        assert_eq!(grid.sheet().value(3, 2), "hello");
        assert!(!grid.redo());
    }

    #[test]
    fn set_cell_value_out_of_range() {
        let mut grid = grid();
        let err = grid.set_cell_value(100, 0, "x").unwrap_err();
        assert!(matches!(
            err,
            GridError::Index {
                row: 100,
                rows: 100,
                cols: 30,
                ..
            }
        ));
    }

    #[test]
    fn selection_is_clamped() {
        let mut grid = grid();
        grid.set_selection(Selection::range(95, 28, 500, 500));
        assert_eq!(grid.selection().bounds(), (95, 28, 99, 29));
        assert_eq!(grid.selection().kind, SelectionKind::Range);
    }

    #[test]
    fn stats_follow_selection() {
        let mut grid = grid();
        grid.load_data(&[json!(["10", "abc"]), json!(["20", ""])]);
        grid.set_selection(Selection::range(0, 0, 1, 1));
        let stats = grid.compute_selection_stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.sum, 30.0);
        assert_eq!(
            grid.status_text(),
            "Count: 2  Min: 10  Max: 20  Sum: 30  Avg: 15"
        );
    }

    #[test]
    fn resize_updates_viewport_and_headers() {
        let mut grid = grid();
        grid.resize(600.0, 300.0, 2.0);
        assert_eq!(grid.viewport().width, 600.0);
        assert_eq!(grid.viewport().height, 300.0);
        assert_eq!(grid.column_header().width(), 600.0);
        assert_eq!(grid.column_header().height(), 24.0);
        assert_eq!(grid.row_header().height(), 300.0);
        // 600px shows columns A..G
        assert_eq!(grid.column_header().texts().len(), 7);
    }
}
