//! Viewport state management for scrolling.

use crate::types::Sheet;

/// Viewport state - the visible window onto the grid body.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position in grid coordinates
    pub scroll_x: f64,
    /// Vertical scroll position in grid coordinates
    pub scroll_y: f64,
    /// Body surface width in logical pixels
    pub width: f64,
    /// Body surface height in logical pixels
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Largest horizontal scroll that still fills the viewport.
    pub fn max_scroll_x(&self, sheet: &Sheet) -> f64 {
        (sheet.total_width() - self.width).max(0.0)
    }

    /// Largest vertical scroll that still fills the viewport.
    pub fn max_scroll_y(&self, sheet: &Sheet) -> f64 {
        (sheet.total_height() - self.height).max(0.0)
    }

    /// Clamp scroll position to `[0, content - viewport]` on each axis.
    pub fn clamp_scroll(&mut self, sheet: &Sheet) {
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll_x(sheet));
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll_y(sheet));
    }

    /// Scroll by delta amounts. Returns true if the position changed.
    pub fn scroll_by(&mut self, delta_x: f64, delta_y: f64, sheet: &Sheet) -> bool {
        self.set_scroll(self.scroll_x + delta_x, self.scroll_y + delta_y, sheet)
    }

    /// Set absolute scroll position. Returns true if the position changed.
    pub fn set_scroll(&mut self, x: f64, y: f64, sheet: &Sheet) -> bool {
        let (old_x, old_y) = (self.scroll_x, self.scroll_y);
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(sheet);
        (self.scroll_x - old_x).abs() > f64::EPSILON || (self.scroll_y - old_y).abs() > f64::EPSILON
    }

    /// Resize the viewport and re-clamp the scroll position.
    pub fn resize(&mut self, width: f64, height: f64, sheet: &Sheet) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.clamp_scroll(sheet);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped_to_content() {
        // 10 cols x 100px = 1000 wide, 50 rows x 24px = 1200 tall
        let sheet = Sheet::new(50, 10, 100.0, 24.0);
        let mut viewport = Viewport::new(400.0, 300.0);

        assert!(!viewport.scroll_by(-50.0, -50.0, &sheet));
        assert_eq!((viewport.scroll_x, viewport.scroll_y), (0.0, 0.0));

        assert!(viewport.scroll_by(5000.0, 5000.0, &sheet));
        assert_eq!(viewport.scroll_x, 600.0);
        assert_eq!(viewport.scroll_y, 900.0);
    }

    #[test]
    fn content_smaller_than_viewport_never_scrolls() {
        let sheet = Sheet::new(2, 2, 100.0, 24.0);
        let mut viewport = Viewport::new(800.0, 600.0);
        assert!(!viewport.set_scroll(100.0, 100.0, &sheet));
        assert_eq!(viewport.max_scroll_x(&sheet), 0.0);
    }

    #[test]
    fn growing_viewport_reclamps() {
        let sheet = Sheet::new(50, 10, 100.0, 24.0);
        let mut viewport = Viewport::new(400.0, 300.0);
        viewport.set_scroll(600.0, 900.0, &sheet);
        viewport.resize(800.0, 1000.0, &sheet);
        assert_eq!(viewport.scroll_x, 200.0);
        assert_eq!(viewport.scroll_y, 200.0);
    }
}
