//! Canvas 2D surface.
//!
//! Draws through the HTML Canvas 2D API via web-sys. The backing store is
//! sized in physical pixels and the context scaled by the device pixel ratio,
//! so painters work in logical pixels throughout.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::backend::{Stroke, Surface, TextStyle};
use crate::error::{GridError, Result};
use crate::layout::Rect;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Wrap a canvas element, taking its current size as the logical size.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GridError::Surface("failed to get 2d context".into()))?
            .ok_or_else(|| GridError::Surface("no 2d context available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GridError::Surface("failed to cast to CanvasRenderingContext2d".into()))?;

        let width = f64::from(canvas.width());
        let height = f64::from(canvas.height());
        Ok(Self {
            canvas,
            ctx,
            width,
            height,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_dash(&self, dash: &[f64]) {
        let pattern: js_sys::Array = dash.iter().map(|d| JsValue::from_f64(*d)).collect();
        let _ = self.ctx.set_line_dash(&pattern);
    }
}

/// Logical size to whole physical pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn physical(logical: f64, dpr: f64) -> u32 {
    (logical * dpr).round().clamp(0.0, f64::from(u32::MAX)) as u32
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };

        // Setting the buffer size also resets the context state
        self.canvas.set_width(physical(self.width, dpr));
        self.canvas.set_height(physical(self.height, dpr));
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke<'_>) {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.set_dash(stroke.dash);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>) {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.set_dash(stroke.dash);
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
        if !stroke.dash.is_empty() {
            self.set_dash(&[]);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle<'_>) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_text_align(style.align.as_css());
        self.ctx.set_text_baseline("bottom");
        let _ = match style.max_width {
            Some(max_width) => self.ctx.fill_text_with_max_width(text, x, y, max_width),
            None => self.ctx.fill_text(text, x, y),
        };
    }
}
