//! Colors for color and black & white displays

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Dark gray (#555555)
pub const DARK_GRAY: Rgb565 = Rgb565::new(0x55 >> 3, 0x55 >> 2, 0x55 >> 3);
/// Folly (#FF0055), the accent color of the second hand
pub const FOLLY: Rgb565 = Rgb565::new(0xff >> 3, 0x00 >> 2, 0x55 >> 3);

/// Colors used by the watchface, picked once from the display capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Solid background layer
    pub background: Rgb565,
    /// Lit pixels of the dial bitmap
    pub dial: Rgb565,
    /// Unlit pixels of the dial bitmap, `None` lets the background show through
    pub dial_off: Option<Rgb565>,
    /// Hour and minute hand fill
    pub hands: Rgb565,
    /// Hand outline, only used where fills need extra contrast
    pub outline: Option<Rgb565>,
    pub second_hand: Rgb565,
    /// Center dot
    pub dot: Rgb565,
    /// Inner dot on top of the center dot
    pub accent: Option<Rgb565>,
}

impl Palette {
    pub const COLOR: Palette = Palette {
        background: DARK_GRAY,
        dial: Rgb565::WHITE,
        dial_off: None,
        hands: Rgb565::WHITE,
        outline: None,
        second_hand: FOLLY,
        dot: Rgb565::WHITE,
        accent: Some(FOLLY),
    };

    pub const MONOCHROME: Palette = Palette {
        background: Rgb565::BLACK,
        dial: Rgb565::WHITE,
        dial_off: Some(Rgb565::BLACK),
        hands: Rgb565::WHITE,
        outline: Some(Rgb565::BLACK),
        second_hand: Rgb565::WHITE,
        dot: Rgb565::WHITE,
        accent: None,
    };

    pub const fn new(supports_color: bool) -> Self {
        if supports_color {
            Self::COLOR
        } else {
            Self::MONOCHROME
        }
    }
}
