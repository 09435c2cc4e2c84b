//! Scroll-related logic for `Grid`.
//!
//! Includes wheel scrolling, edge auto-scroll while drag-selecting, and the
//! scrollbar thumb model (size, position, drag and track clicks).

use serde::Serialize;

use super::{Grid, GridState};
use crate::layout::Viewport;
use crate::render::Surface;
use crate::types::Sheet;

/// Smallest thumb length in pixels
pub const MIN_THUMB_SIZE: f64 = 30.0;

/// Edge auto-scroll state: per-axis direction and the last pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoScroll {
    /// -1, 0 or 1 per axis
    pub direction: (i8, i8),
    /// Last pointer position in body coordinates
    pub pointer: (f64, f64),
}

impl AutoScroll {
    pub fn is_active(&self) -> bool {
        self.direction != (0, 0)
    }

    pub fn stop(&mut self) {
        self.direction = (0, 0);
    }

    /// Recompute the direction for a pointer at `(x, y)` against a body of
    /// `width` x `height` with the given edge `margin`.
    pub fn track(&mut self, x: f64, y: f64, width: f64, height: f64, margin: f64) {
        self.pointer = (x, y);
        self.direction = (edge_direction(x, width, margin), edge_direction(y, height, margin));
    }
}

fn edge_direction(pos: f64, extent: f64, margin: f64) -> i8 {
    if pos < margin {
        -1
    } else if pos > extent - margin {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

/// Thumb geometry for one scrollbar, in track pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollbarMetrics {
    pub thumb_size: f64,
    pub thumb_pos: f64,
    pub max_scroll: f64,
    /// Distance the thumb can travel (`visible - thumb_size`)
    pub travel: f64,
}

impl ScrollbarMetrics {
    /// `visible` doubles as the track length.
    pub fn new(visible: f64, total: f64, scroll: f64) -> Self {
        let visible = visible.max(0.0);
        let thumb_size = if total > 0.0 {
            (visible * visible / total).max(MIN_THUMB_SIZE).min(visible)
        } else {
            visible
        };
        let max_scroll = (total - visible).max(0.0);
        let travel = (visible - thumb_size).max(0.0);
        let thumb_pos = if max_scroll > 0.0 {
            (scroll / max_scroll).clamp(0.0, 1.0) * travel
        } else {
            0.0
        };
        Self {
            thumb_size,
            thumb_pos,
            max_scroll,
            travel,
        }
    }

    /// Scroll offset after dragging the thumb `delta` pixels from `start_scroll`.
    pub fn scroll_for_drag(&self, start_scroll: f64, delta: f64) -> f64 {
        if self.travel <= 0.0 {
            return start_scroll.clamp(0.0, self.max_scroll);
        }
        (start_scroll + delta / self.travel * self.max_scroll).clamp(0.0, self.max_scroll)
    }

    /// Scroll offset that centers the thumb on a track click at `click`.
    pub fn scroll_for_track_click(&self, click: f64) -> f64 {
        if self.travel <= 0.0 {
            return 0.0;
        }
        ((click - self.thumb_size / 2.0) / self.travel * self.max_scroll)
            .clamp(0.0, self.max_scroll)
    }
}

/// Thumb drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbDrag {
    pub axis: ScrollAxis,
    pub start_pointer: f64,
    pub start_scroll: f64,
}

pub(crate) fn axis_metrics(sheet: &Sheet, viewport: &Viewport, axis: ScrollAxis) -> ScrollbarMetrics {
    match axis {
        ScrollAxis::Horizontal => {
            ScrollbarMetrics::new(viewport.width, sheet.total_width(), viewport.scroll_x)
        }
        ScrollAxis::Vertical => {
            ScrollbarMetrics::new(viewport.height, sheet.total_height(), viewport.scroll_y)
        }
    }
}

fn set_axis_scroll(state: &mut GridState, axis: ScrollAxis, value: f64) -> bool {
    let (x, y) = match axis {
        ScrollAxis::Horizontal => (value, state.viewport.scroll_y),
        ScrollAxis::Vertical => (state.viewport.scroll_x, value),
    };
    state.viewport.set_scroll(x, y, &state.sheet)
}

impl GridState {
    /// One auto-scroll frame. Returns true if the scroll position changed.
    ///
    /// The moving end of the selection is re-derived from the last pointer
    /// position against the shifted scroll offsets.
    pub(crate) fn auto_scroll_step(&mut self) -> bool {
        let Some(gesture) = self.gesture.as_ref() else {
            self.auto_scroll.stop();
            return false;
        };
        if !gesture.is_selecting() {
            self.auto_scroll.stop();
            return false;
        }
        let (dx, dy) = self.auto_scroll.direction;
        let step = self.config.auto_scroll_step;
        let changed = self.viewport.scroll_by(
            f64::from(dx) * step,
            f64::from(dy) * step,
            &self.sheet,
        );
        if changed {
            let (x, y) = self.auto_scroll.pointer;
            if let Some(mut gesture) = self.gesture.take() {
                gesture.extend_to(self, x, y);
                self.gesture = Some(gesture);
            }
            log::trace!(
                "auto-scroll to ({}, {})",
                self.viewport.scroll_x,
                self.viewport.scroll_y
            );
        }
        changed
    }
}

impl<S: Surface> Grid<S> {
    /// Wheel scrolling: `scroll += delta` on both axes, clamped.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) -> bool {
        let changed = self
            .state
            .viewport
            .scroll_by(delta_x, delta_y, &self.state.sheet);
        if changed {
            self.render_all();
        }
        changed
    }

    /// Set the absolute scroll position (clamped). Renders when it changed.
    pub fn scroll_to(&mut self, x: f64, y: f64) -> bool {
        let changed = self.state.viewport.set_scroll(x, y, &self.state.sheet);
        if changed {
            self.render_all();
        }
        changed
    }

    /// Advance edge auto-scroll by one frame.
    ///
    /// Returns whether the host should schedule another frame: false once the
    /// drag has ended or the pointer has left the edge margin.
    pub fn auto_scroll_tick(&mut self) -> bool {
        if self.state.auto_scroll_step() {
            self.render_all();
        }
        self.state.auto_scroll.is_active()
            && self.state.gesture.as_ref().is_some_and(|g| g.is_selecting())
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.state.auto_scroll.is_active()
    }

    pub fn scrollbar(&self, axis: ScrollAxis) -> ScrollbarMetrics {
        axis_metrics(&self.state.sheet, &self.state.viewport, axis)
    }

    /// Start dragging the thumb at track coordinate `pointer`.
    pub fn begin_thumb_drag(&mut self, axis: ScrollAxis, pointer: f64) {
        let start_scroll = match axis {
            ScrollAxis::Horizontal => self.state.viewport.scroll_x,
            ScrollAxis::Vertical => self.state.viewport.scroll_y,
        };
        self.state.thumb_drag = Some(ThumbDrag {
            axis,
            start_pointer: pointer,
            start_scroll,
        });
    }

    /// Move an active thumb drag. Returns true if the scroll position changed.
    pub fn drag_thumb(&mut self, pointer: f64) -> bool {
        let Some(drag) = self.state.thumb_drag else {
            return false;
        };
        let metrics = self.scrollbar(drag.axis);
        let target = metrics.scroll_for_drag(drag.start_scroll, pointer - drag.start_pointer);
        let changed = set_axis_scroll(&mut self.state, drag.axis, target);
        if changed {
            self.render_all();
        }
        changed
    }

    pub fn end_thumb_drag(&mut self) {
        self.state.thumb_drag = None;
    }

    /// Jump so the thumb is centered on a click at track coordinate `click`.
    pub fn track_click(&mut self, axis: ScrollAxis, click: f64) -> bool {
        let target = self.scrollbar(axis).scroll_for_track_click(click);
        let changed = set_axis_scroll(&mut self.state, axis, target);
        if changed {
            self.render_all();
        }
        changed
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
    fn edge_directions() {
        let mut auto = AutoScroll::default();
        auto.track(10.0, 200.0, 400.0, 300.0, 30.0);
        assert_eq!(auto.direction, (-1, 0));
        auto.track(380.0, 290.0, 400.0, 300.0, 30.0);
        assert_eq!(auto.direction, (1, 1));
        auto.track(200.0, 150.0, 400.0, 300.0, 30.0);
        assert!(!auto.is_active());
        // Past the edge still scrolls
        auto.track(-50.0, 500.0, 400.0, 300.0, 30.0);
        assert_eq!(auto.direction, (-1, 1));
    }

    #[test]
    fn thumb_geometry() {
        // 400px visible over 1600px content
        let m = ScrollbarMetrics::new(400.0, 1600.0, 600.0);
        assert_eq!(m.thumb_size, 100.0);
        assert_eq!(m.max_scroll, 1200.0);
        assert_eq!(m.travel, 300.0);
        assert_eq!(m.thumb_pos, 150.0);
    }

    #[test]
    fn thumb_has_minimum_size() {
        let m = ScrollbarMetrics::new(300.0, 240_000.0, 0.0);
        assert_eq!(m.thumb_size, MIN_THUMB_SIZE);
        assert_eq!(m.thumb_pos, 0.0);
    }

    #[test]
    fn content_smaller_than_track() {
        let m = ScrollbarMetrics::new(400.0, 200.0, 0.0);
        assert_eq!(m.thumb_size, 400.0);
        assert_eq!(m.max_scroll, 0.0);
        assert_eq!(m.scroll_for_drag(0.0, 50.0), 0.0);
        assert_eq!(m.scroll_for_track_click(100.0), 0.0);
    }

    #[test]
    fn drag_and_track_click_map_through_travel() {
        let m = ScrollbarMetrics::new(400.0, 1600.0, 0.0);
        // 300px of travel covers 1200px of scroll
        assert_eq!(m.scroll_for_drag(0.0, 75.0), 300.0);
        assert_eq!(m.scroll_for_drag(600.0, -1000.0), 0.0);
        assert_eq!(m.scroll_for_drag(600.0, 1000.0), 1200.0);
        // Centering a 100px thumb on 200 puts its start at 150 -> half way
        assert_eq!(m.scroll_for_track_click(200.0), 600.0);
        assert_eq!(m.scroll_for_track_click(10.0), 0.0);
    }
}
