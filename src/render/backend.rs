//! Drawing surface trait for pluggable render targets.
//!
//! The grid paints through `Surface` so the same painters drive the Canvas 2D
//! element in the browser and the recording [`DisplayList`](super::DisplayList)
//! used by tests and benchmarks.

use crate::layout::Rect;

/// Horizontal text anchor relative to the x passed to [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Stroke parameters for lines and rectangle outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    /// Dash pattern; empty for a solid line
    pub dash: &'a [f64],
}

impl<'a> Stroke<'a> {
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            dash: &[],
        }
    }

    pub fn dashed(color: &'a str, width: f64, dash: &'a [f64]) -> Self {
        Self { color, width, dash }
    }
}

/// Font, color and anchoring for one text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub color: &'a str,
    pub align: TextAlign,
    /// Text is squeezed or clipped to this width when set
    pub max_width: Option<f64>,
}

/// Immediate-mode 2D drawing target addressed in logical pixels.
///
/// Painters never read pixels back; every frame starts with [`Surface::clear`].
pub trait Surface {
    /// Logical width in pixels
    fn width(&self) -> f64;

    /// Logical height in pixels
    fn height(&self) -> f64;

    /// Resize the backing store. `dpr` is the device pixel ratio.
    fn resize(&mut self, width: f64, height: f64, dpr: f64);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke<'_>);

    /// Straight segment from `(x1, y1)` to `(x2, y2)`.
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>);

    /// Draw `text` with its bottom edge on `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle<'_>);
}
