//! Rendering onto pluggable drawing surfaces.
//!
//! This module provides:
//! - The `Surface` trait and a recording `DisplayList` implementation
//! - Body and header painters driven by one `RenderParams` snapshot
//! - Selection overlay math and the default palette
//! - Canvas 2D surface (wasm only)
//!
//! Every frame is painted from scratch, limited to the visible rows and columns.

pub mod backend;
mod body;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
mod display_list;
mod headers;
pub mod selection;

pub use backend::{Stroke, Surface, TextAlign, TextStyle};
pub use body::render_body;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use colors::{palette, CssColor, Rgb};
pub use display_list::{DisplayList, DrawOp};
pub use headers::{render_column_headers, render_row_headers};

use crate::layout::Viewport;
use crate::types::{GridConfig, Selection, Sheet};

/// Live resize indicator, in body coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeGuide {
    /// Vertical line at the dragged column boundary
    Column { x: f64 },
    /// Horizontal line at the dragged row boundary
    Row { y: f64 },
}

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub sheet: &'a Sheet,
    pub viewport: &'a Viewport,
    pub selection: &'a Selection,
    pub config: &'a GridConfig,
    pub guide: Option<ResizeGuide>,
}

/// Redraw column header, row header and body, in that order.
pub fn render_all<S: Surface + ?Sized>(
    params: &RenderParams<'_>,
    col_header: &mut S,
    row_header: &mut S,
    body: &mut S,
) {
    render_column_headers(col_header, params);
    render_row_headers(row_header, params);
    render_body(body, params);
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

    struct Frame {
        sheet: Sheet,
        viewport: Viewport,
        config: GridConfig,
    }

    impl Frame {
        fn new() -> Self {
            let mut sheet = Sheet::new(100, 30, 100.0, 24.0);
            sheet.cell_mut(0, 0).unwrap().value = "42".to_string();
            sheet.cell_mut(0, 1).unwrap().value = "name".to_string();
            Self {
                sheet,
                viewport: Viewport::new(400.0, 240.0),
                config: GridConfig::default(),
            }
        }

        fn draw(&self, selection: &Selection, guide: Option<ResizeGuide>) -> [DisplayList; 3] {
            let params = RenderParams {
                sheet: &self.sheet,
                viewport: &self.viewport,
                selection,
                config: &self.config,
                guide,
            };
            let mut col_header = DisplayList::new(400.0, 24.0);
            let mut row_header = DisplayList::new(50.0, 240.0);
            let mut body = DisplayList::new(400.0, 240.0);
            render_all(&params, &mut col_header, &mut row_header, &mut body);
            [col_header, row_header, body]
        }
    }

    fn text_align(list: &DisplayList, text: &str) -> TextAlign {
        match list.find_text(text) {
            Some(DrawOp::Text { align, .. }) => *align,
            other => panic!("no text {text:?}: {other:?}"),
        }
    }

    #[test]
    fn only_visible_cells_are_painted() {
        let frame = Frame::new();
        let [col_header, row_header, body] = frame.draw(&Selection::default(), None);
        // 4 columns fill 400px exactly, the 5th starts at the edge
        assert_eq!(col_header.texts(), ["A", "B", "C", "D", "E"]);
        // 240 / 24 = 10 rows, plus the one starting at the bottom edge
        assert_eq!(row_header.texts().len(), 11);
        assert_eq!(body.texts(), ["42", "name"]);
    }

    #[test]
    fn labels_sit_on_the_bottom_edge() {
        let frame = Frame::new();
        let [col_header, row_header, body] = frame.draw(&Selection::default(), None);
        let y_of = |list: &DisplayList, text: &str| match list.find_text(text) {
            Some(DrawOp::Text { y, .. }) => *y,
            other => panic!("no text {text:?}: {other:?}"),
        };
        assert_eq!(y_of(&col_header, "A"), 21.0);
        assert_eq!(y_of(&row_header, "2"), 45.0);
        assert_eq!(y_of(&body, "42"), 22.0);
    }

    #[test]
    fn integers_align_right() {
        let frame = Frame::new();
        let [_, _, body] = frame.draw(&Selection::default(), None);
        assert_eq!(text_align(&body, "42"), TextAlign::Right);
        assert_eq!(text_align(&body, "name"), TextAlign::Left);
    }

    #[test]
    fn editing_cell_text_is_hidden() {
        let mut frame = Frame::new();
        frame.sheet.cell_mut(0, 0).unwrap().editing = true;
        let [_, _, body] = frame.draw(&Selection::default(), None);
        assert_eq!(body.texts(), ["name"]);
    }

    #[test]
    fn range_tints_all_but_anchor_and_draws_handle() {
        let frame = Frame::new();
        let [col_header, row_header, body] = frame.draw(&Selection::range(0, 0, 1, 1), None);
        assert_eq!(body.fill_at(50.0, 12.0), Some(palette::WHITE));
        assert_eq!(body.fill_at(150.0, 36.0), Some(palette::SELECTION_FILL));
        assert_eq!(body.fill_at(250.0, 36.0), Some(palette::WHITE));
        // Fill handle at the bottom-right corner of the 200x48 range
        assert_eq!(body.fill_at(200.5, 48.5), Some("#127940"));

        assert_eq!(col_header.fill_at(150.0, 10.0), Some(palette::SELECTION_FILL));
        assert_eq!(col_header.fill_at(250.0, 10.0), Some(palette::HEADER_BG));
        assert_eq!(row_header.fill_at(10.0, 30.0), Some(palette::SELECTION_FILL));
    }

    #[test]
    fn row_selection_tints_column_header_strip() {
        let frame = Frame::new();
        let [col_header, row_header, body] = frame.draw(&Selection::row_range(2, 3, 29), None);
        assert_eq!(col_header.fill_at(390.0, 5.0), Some(palette::HEADER_STRIP));
        assert_eq!(row_header.fill_at(10.0, 60.0), Some(palette::ACCENT));
        assert_eq!(row_header.fill_at(10.0, 10.0), Some(palette::HEADER_BG));
        assert_eq!(body.fill_at(350.0, 80.0), Some(palette::SELECTION_FILL));
        // Top edge of row 2 and bottom edge of row 3, per visible column
        assert_eq!(body.lines_in(palette::ACCENT).len(), 2 * 5);
    }

    #[test]
    fn column_guide_spans_header_and_body() {
        let frame = Frame::new();
        let [col_header, row_header, body] =
            frame.draw(&Selection::default(), Some(ResizeGuide::Column { x: 130.0 }));
        let guide = body.lines_in(palette::ACCENT);
        assert_eq!(guide.len(), 1);
        match guide[0] {
            DrawOp::Line { from, to, dash, .. } => {
                assert_eq!(*from, (130.0, 0.0));
                assert_eq!(*to, (130.0, 240.0));
                assert_eq!(dash, &vec![6.0, 6.0]);
            }
            other => panic!("unexpected op {other:?}"),
        }
        assert_eq!(col_header.lines_in(palette::ACCENT).len(), 1);
        assert!(row_header.lines_in(palette::ACCENT).is_empty());
    }
}
