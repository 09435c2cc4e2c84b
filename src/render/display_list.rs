//! Recording surface.
//!
//! Captures draw calls instead of rasterizing them, so render output can be
//! asserted on natively and benchmarked without a browser.

use super::backend::{Stroke, Surface, TextAlign, TextStyle};
use crate::layout::Rect;

/// One recorded draw call with owned parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect {
        rect: Rect,
        color: String,
    },
    StrokeRect {
        rect: Rect,
        color: String,
        width: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: String,
        width: f64,
        dash: Vec<f64>,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: String,
        font: String,
        align: TextAlign,
    },
}

/// A [`Surface`] that records every call of the current frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Calls recorded since the last [`Surface::clear`].
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// All text runs, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The recorded text op whose string equals `text`, if any.
    pub fn find_text(&self, text: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text: t, .. } if t == text))
    }

    /// Color of the topmost filled rectangle covering `(x, y)`.
    pub fn fill_at(&self, x: f64, y: f64) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::FillRect { rect, color } if rect.contains(x, y) => Some(color.as_str()),
            _ => None,
        })
    }

    /// Lines drawn in `color`.
    pub fn lines_in(&self, color: &str) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { color: c, .. } if c == color))
            .collect()
    }
}

impl Surface for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn resize(&mut self, width: f64, height: f64, _dpr: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ops.push(DrawOp::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke<'_>) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>) {
        self.ops.push(DrawOp::Line {
            from: (x1, y1),
            to: (x2, y2),
            color: stroke.color.to_string(),
            width: stroke.width,
            dash: stroke.dash.to_vec(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle<'_>) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color: style.color.to_string(),
            font: style.font.to_string(),
            align: style.align,
        });
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

    #[test]
    fn clear_starts_a_new_frame() {
        let mut list = DisplayList::new(100.0, 50.0);
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), "#FFF");
        list.clear();
        assert_eq!(list.ops(), &[DrawOp::Clear]);
    }

    #[test]
    fn fill_at_returns_topmost() {
        let mut list = DisplayList::new(100.0, 50.0);
        list.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), "white");
        list.fill_rect(Rect::new(10.0, 10.0, 10.0, 10.0), "green");
        assert_eq!(list.fill_at(15.0, 15.0), Some("green"));
        assert_eq!(list.fill_at(50.0, 40.0), Some("white"));
        assert_eq!(list.fill_at(150.0, 40.0), None);
    }
}
