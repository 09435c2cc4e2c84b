use serde::Deserialize;

use crate::render::{palette, CssColor};

/// Dimensions, interaction thresholds and colors for a grid.
///
/// Hosts may pass a partial object; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Height of the column header strip in pixels
    pub col_header_height: f64,
    /// Width of the row header strip in pixels
    pub row_header_width: f64,
    pub default_col_width: f64,
    pub default_row_height: f64,
    /// Columns never shrink below this width
    pub min_col_width: f64,
    /// Rows never shrink below this height
    pub min_row_height: f64,
    /// Distance from a header edge that counts as "on the border"
    pub border_tolerance: f64,
    /// Resize drags shorter than this are discarded
    pub resize_dead_zone: f64,
    /// Distance from the body edge that triggers auto-scroll while dragging
    pub auto_scroll_margin: f64,
    /// Pixels scrolled per auto-scroll frame
    pub auto_scroll_step: f64,
    pub font: String,
    /// Horizontal inset of cell text from the cell edge
    pub text_padding: f64,
    pub background_color: CssColor,
    pub grid_line_color: CssColor,
    pub text_color: CssColor,
    pub header_background_color: CssColor,
    pub header_text_color: CssColor,
    /// Tint for selected cells and highlighted headers
    pub selection_fill_color: CssColor,
    /// Tint for the column header strip while whole rows are selected
    pub header_strip_color: CssColor,
    /// Selection borders, selected headers and resize guides
    pub accent_color: CssColor,
    pub selected_header_text_color: CssColor,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            col_header_height: 24.0,
            row_header_width: 50.0,
            default_col_width: 100.0,
            default_row_height: 24.0,
            min_col_width: 30.0,
            min_row_height: 16.0,
            border_tolerance: 3.0,
            resize_dead_zone: 2.0,
            auto_scroll_margin: 30.0,
            auto_scroll_step: 20.0,
            font: "14px sans-serif".to_string(),
            text_padding: 4.0,
            background_color: palette::WHITE.to_string(),
            grid_line_color: palette::GRID_LINE.to_string(),
            text_color: palette::BLACK.to_string(),
            header_background_color: palette::HEADER_BG.to_string(),
            header_text_color: palette::BLACK.to_string(),
            selection_fill_color: palette::SELECTION_FILL.to_string(),
            header_strip_color: palette::HEADER_STRIP.to_string(),
            accent_color: palette::ACCENT.to_string(),
            selected_header_text_color: palette::WHITE.to_string(),
        }
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
    fn partial_config_keeps_defaults() {
        let config: GridConfig =
            serde_json::from_str(r##"{"defaultColWidth": 80, "accentColor": "#123456"}"##)
                .unwrap();
        assert_eq!(config.default_col_width, 80.0);
        assert_eq!(config.accent_color, "#123456");
        assert_eq!(config.min_col_width, 30.0);
        assert_eq!(config.col_header_height, 24.0);
    }
}
