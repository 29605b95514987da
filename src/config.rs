//! Display configuration

use embedded_graphics::geometry::Size;

/// Capabilities of the panel the watchface runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Panel resolution in pixels
    pub size: Size,
    /// Whether the panel shows colors
    pub supports_color: bool,
}

/// PineTime: 240×240 ST7789, RGB565
pub const PINETIME: DisplayConfig = DisplayConfig {
    size: Size::new(240, 240),
    supports_color: true,
};
