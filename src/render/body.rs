//! Main body painter: cell backgrounds, grid lines, values and selection decoration.

use super::backend::{Stroke, Surface, TextAlign, TextStyle};
use super::colors::{fill_handle_color, palette};
use super::selection::{is_cell_tinted, selection_overlay};
use super::{RenderParams, ResizeGuide};
use crate::layout::{visible_cols, visible_rows, Rect};
use crate::types::Cell;

/// Width of the accent edges around whole-row / whole-column selections
const LINE_SELECTION_EDGE: f64 = 3.0;
/// Width of the cell/range selection border
const RANGE_BORDER: f64 = 2.0;

pub fn render_body<S: Surface + ?Sized>(surface: &mut S, params: &RenderParams<'_>) {
    surface.clear();
    let RenderParams {
        sheet,
        viewport,
        selection,
        config,
        ..
    } = params;

    let rows = visible_rows(sheet, viewport);
    let cols = visible_cols(sheet, viewport);
    let grid_line = Stroke::solid(&config.grid_line_color, 1.0);
    let edge = Stroke::solid(&config.accent_color, LINE_SELECTION_EDGE);

    for row_band in &rows {
        let Some(row) = sheet.rows.get(row_band.index) else {
            continue;
        };
        for col_band in &cols {
            let Some(cell) = row.cells.get(col_band.index) else {
                continue;
            };
            let rect = Rect::new(col_band.start, row_band.start, col_band.size, row_band.size);

            let background = if is_cell_tinted(selection, row_band.index, col_band.index) {
                &config.selection_fill_color
            } else {
                &config.background_color
            };
            surface.fill_rect(rect, background);
            surface.stroke_rect(
                Rect::new(rect.x + 0.5, rect.y + 0.5, rect.width, rect.height),
                grid_line,
            );
            paint_value(surface, params, cell, rect);

            if selection.is_col_in_range(col_band.index) {
                let (_, min_col, _, max_col) = selection.bounds();
                if col_band.index == min_col {
                    let x = rect.x + LINE_SELECTION_EDGE / 2.0;
                    surface.line(x, rect.y, x, rect.bottom(), edge);
                }
                if col_band.index == max_col {
                    let x = rect.right() - LINE_SELECTION_EDGE / 2.0;
                    surface.line(x, rect.y, x, rect.bottom(), edge);
                }
            }
            if selection.is_row_in_range(row_band.index) {
                let (min_row, _, max_row, _) = selection.bounds();
                if row_band.index == min_row {
                    let y = rect.y + LINE_SELECTION_EDGE / 2.0;
                    surface.line(rect.x, y, rect.right(), y, edge);
                }
                if row_band.index == max_row {
                    let y = rect.bottom() - LINE_SELECTION_EDGE / 2.0;
                    surface.line(rect.x, y, rect.right(), y, edge);
                }
            }
        }
    }

    if let Some(overlay) = selection_overlay(sheet, viewport, selection) {
        let border = Stroke::solid(&config.accent_color, RANGE_BORDER);
        for (x1, y1, x2, y2) in overlay.border_segments() {
            surface.line(x1, y1, x2, y2, border);
        }
        surface.fill_rect(overlay.handle, &fill_handle_color(&config.accent_color));
    }

    paint_guide(surface, params);
}

/// Integers hug the right edge, everything else the left. Cells under the
/// editor overlay are left blank.
fn paint_value<S: Surface + ?Sized>(
    surface: &mut S,
    params: &RenderParams<'_>,
    cell: &Cell,
    rect: Rect,
) {
    if cell.editing || cell.value.is_empty() {
        return;
    }
    let padding = params.config.text_padding;
    let (x, align) = if cell.is_integer_like() {
        (rect.right() - padding, TextAlign::Right)
    } else {
        (rect.x + padding, TextAlign::Left)
    };
    surface.fill_text(
        &cell.value,
        x,
        rect.bottom() - 2.0,
        TextStyle {
            font: &params.config.font,
            color: &params.config.text_color,
            align,
            max_width: Some((rect.width - padding * 2.0).max(0.0)),
        },
    );
}

fn paint_guide<S: Surface + ?Sized>(surface: &mut S, params: &RenderParams<'_>) {
    let stroke = Stroke::dashed(&params.config.accent_color, 2.0, &palette::GUIDE_DASH);
    let (width, height) = (surface.width(), surface.height());
    match params.guide {
        Some(ResizeGuide::Column { x }) => surface.line(x, 0.0, x, height, stroke),
        Some(ResizeGuide::Row { y }) => surface.line(0.0, y, width, y, stroke),
        None => {}
    }
}
