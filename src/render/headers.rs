//! Row and column header rendering.
//!
//! Headers are drawn on their own surfaces, aligned with the body so x in the
//! column header and y in the row header are body coordinates. They mirror
//! the body selection:
//! - Cell ranges tint the intersecting headers and underline them in the accent color
//! - Selected rows/columns get an accent fill with light text
//! - Whole-row selections tint the full column header strip, and vice versa

use super::backend::{Stroke, Surface, TextAlign, TextStyle};
use super::colors::palette;
use super::selection::{column_header_state, row_header_state, HeaderState};
use super::{RenderParams, ResizeGuide};
use crate::layout::{visible_cols, visible_rows, Rect};

/// Width of the accent underline / edge on highlighted headers
const HIGHLIGHT_EDGE: f64 = 3.0;
/// Width of the accent edge along a fully tinted strip
const STRIP_EDGE: f64 = 1.5;

/// Render column headers (A, B, C, ...)
pub fn render_column_headers<S: Surface + ?Sized>(surface: &mut S, params: &RenderParams<'_>) {
    surface.clear();
    let config = params.config;
    let selection = params.selection;
    let height = config.col_header_height;
    let strip = selection.kind.is_row_like();

    if strip {
        let width = surface.width();
        surface.fill_rect(
            Rect::new(0.0, 0.0, width, height),
            &config.header_strip_color,
        );
        surface.line(
            0.0,
            height - STRIP_EDGE,
            width,
            height - STRIP_EDGE,
            Stroke::solid(&config.accent_color, STRIP_EDGE),
        );
    }

    for band in visible_cols(params.sheet, params.viewport) {
        let Some(column) = params.sheet.columns.get(band.index) else {
            continue;
        };
        let rect = Rect::new(band.start, 0.0, band.size, height);
        let state = if strip {
            HeaderState::Normal
        } else {
            column_header_state(selection, band.index)
        };

        if !strip {
            surface.fill_rect(rect, header_fill(params, state));
            if state == HeaderState::Highlighted {
                let y = height - HIGHLIGHT_EDGE / 2.0;
                surface.line(
                    rect.x,
                    y,
                    rect.right(),
                    y,
                    Stroke::solid(&config.accent_color, HIGHLIGHT_EDGE),
                );
            }
        }
        surface.stroke_rect(
            Rect::new(rect.x + 0.5, 0.5, rect.width, height),
            Stroke::solid(&config.grid_line_color, 1.0),
        );
        surface.fill_text(
            &column.name,
            rect.x + rect.width / 2.0,
            height - 3.0,
            TextStyle {
                font: &config.font,
                color: header_text_color(params, state),
                align: TextAlign::Center,
                max_width: Some(rect.width),
            },
        );
    }

    if let Some(ResizeGuide::Column { x }) = params.guide {
        surface.line(
            x,
            0.0,
            x,
            height,
            Stroke::dashed(&config.accent_color, 2.0, &palette::GUIDE_DASH),
        );
    }
}

/// Render row headers (1, 2, 3, ...)
pub fn render_row_headers<S: Surface + ?Sized>(surface: &mut S, params: &RenderParams<'_>) {
    surface.clear();
    let config = params.config;
    let selection = params.selection;
    let width = config.row_header_width;
    let strip = selection.kind.is_column_like();

    if strip {
        let height = surface.height();
        surface.fill_rect(
            Rect::new(0.0, 0.0, width, height),
            &config.selection_fill_color,
        );
        surface.line(
            width - STRIP_EDGE,
            0.0,
            width - STRIP_EDGE,
            height,
            Stroke::solid(&config.accent_color, STRIP_EDGE),
        );
    }

    for band in visible_rows(params.sheet, params.viewport) {
        let rect = Rect::new(0.0, band.start, width, band.size);
        let state = row_header_state(selection, band.index);

        if !strip {
            surface.fill_rect(rect, header_fill(params, state));
            if state == HeaderState::Highlighted {
                let x = width - HIGHLIGHT_EDGE / 2.0;
                surface.line(
                    x,
                    rect.y,
                    x,
                    rect.bottom(),
                    Stroke::solid(&config.accent_color, HIGHLIGHT_EDGE),
                );
            }
        }
        surface.stroke_rect(
            Rect::new(0.5, rect.y + 0.5, width, rect.height),
            Stroke::solid(&config.grid_line_color, 1.0),
        );
        surface.fill_text(
            &(band.index + 1).to_string(),
            width - 6.0,
            rect.bottom() - 3.0,
            TextStyle {
                font: &config.font,
                color: header_text_color(params, state),
                align: TextAlign::Right,
                max_width: None,
            },
        );
    }

    if let Some(ResizeGuide::Row { y }) = params.guide {
        surface.line(
            0.0,
            y,
            width,
            y,
            Stroke::dashed(&config.accent_color, 2.0, &palette::GUIDE_DASH),
        );
    }
}

fn header_fill<'a>(params: &'a RenderParams<'_>, state: HeaderState) -> &'a str {
    match state {
        HeaderState::Selected => &params.config.accent_color,
        HeaderState::Highlighted => &params.config.selection_fill_color,
        HeaderState::Normal => &params.config.header_background_color,
    }
}

fn header_text_color<'a>(params: &'a RenderParams<'_>, state: HeaderState) -> &'a str {
    if state == HeaderState::Selected {
        &params.config.selected_header_text_color
    } else {
        &params.config.header_text_color
    }
}
