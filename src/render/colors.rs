//! Grid palette and small color helpers.
//!
//! Colors stay CSS strings end to end so they go straight to Canvas 2D.

/// A CSS color string (e.g., "#137E43", "rgb(16, 124, 65)")
pub type CssColor = String;

/// RGB color with u8 components, used for deriving shades from configured colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
                g: u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
                b: u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
            }),
            3 => {
                let nibble = |i: usize| -> Option<u8> {
                    let v = u8::from_str_radix(hex.get(i..=i)?, 16).ok()?;
                    Some(v * 17)
                };
                Some(Self {
                    r: nibble(0)?,
                    g: nibble(1)?,
                    b: nibble(2)?,
                })
            }
            _ => None,
        }
    }

    /// `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Blend toward black. 0.0 = unchanged, 1.0 = black.
    pub fn darken(self, factor: f64) -> Self {
        Self {
            r: blend_component(self.r, 0, factor),
            g: blend_component(self.g, 0, factor),
            b: blend_component(self.b, 0, factor),
        }
    }
}

// Clamped to [0, 255] before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend_component(from: u8, to: u8, factor: f64) -> u8 {
    let from = f64::from(from);
    let to = f64::from(to);
    let blended = from + (to - from) * factor.clamp(0.0, 1.0);
    blended.clamp(0.0, 255.0).round() as u8
}

/// Fill handle square: a slightly darker shade of the accent.
///
/// Non-hex accents (e.g. `rgb(...)`) are used as-is.
pub fn fill_handle_color(accent: &str) -> CssColor {
    Rgb::from_hex(accent).map_or_else(|| accent.to_string(), |c| c.darken(0.04).to_hex())
}

/// Default grid colors (CSS format)
pub mod palette {
    pub const WHITE: &str = "#FFFFFF";
    pub const BLACK: &str = "#000000";

    /// Cell and header grid lines (gray)
    pub const GRID_LINE: &str = "#BBBBBB";

    /// Header background
    pub const HEADER_BG: &str = "#F0F0F0";

    /// Selected cells and highlighted headers (light green)
    pub const SELECTION_FILL: &str = "#CAEAD8";

    /// Column header strip while whole rows are selected
    pub const HEADER_STRIP: &str = "#E8F2EC";

    /// Selection borders, selected headers, resize guides (dark green)
    pub const ACCENT: &str = "#137E43";

    /// Dash pattern of the resize guide line
    pub const GUIDE_DASH: [f64; 2] = [6.0, 6.0];

    /// Side of the fill handle square
    pub const FILL_HANDLE_SIZE: f64 = 4.5;
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
    fn parse_hex_forms() {
        assert_eq!(Rgb::from_hex("#137E43"), Some(Rgb::new(0x13, 0x7E, 0x43)));
        assert_eq!(Rgb::from_hex("bbb"), Some(Rgb::new(0xBB, 0xBB, 0xBB)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("rgb(1, 2, 3)"), None);
    }

    #[test]
    fn shades() {
        let c = Rgb::new(100, 100, 100);
        assert_eq!(c.darken(1.0), Rgb::new(0, 0, 0));
        assert_eq!(c.darken(0.0), c);
        assert_eq!(c.darken(0.5), Rgb::new(50, 50, 50));
    }

    #[test]
    fn fill_handle_is_darker_accent() {
        assert_eq!(fill_handle_color(palette::ACCENT), "#127940");
        assert_eq!(fill_handle_color("rgb(16,124,65)"), "rgb(16,124,65)");
    }
}
