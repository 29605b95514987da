//! Compiled-in resources

use embedded_graphics::{
    image::{GetPixel, ImageRaw},
    pixelcolor::{BinaryColor, Rgb565},
    prelude::*,
    primitives::{PointsIter, Rectangle},
};

/// Monochrome image, one bit per pixel, most significant bit first, each row
/// padded to a whole byte.
pub type RawBitmap = ImageRaw<'static, BinaryColor>;

const BACKGROUND_WIDTH: u32 = 240;
static BACKGROUND: &[u8] = include_bytes!("../assets/background.bin");

/// Identifies a resource built into the firmware image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceId {
    /// Watch dial with hour and minute marks
    Background,
}

impl ResourceId {
    pub fn bitmap(self) -> RawBitmap {
        match self {
            ResourceId::Background => ImageRaw::new(BACKGROUND, BACKGROUND_WIDTH),
        }
    }
}

/// Draw `image` at the top left of `area`, cropped to it.
///
/// Lit pixels use `on`. Unlit pixels use `off` or are skipped when it is
/// `None`, leaving whatever is below visible.
pub fn composite<D>(
    image: &RawBitmap,
    target: &mut D,
    area: &Rectangle,
    on: Rgb565,
    off: Option<Rgb565>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    // Only the part the target can show, in image coordinates
    let visible = image
        .bounding_box()
        .intersection(&Rectangle::new(Point::zero(), area.size))
        .intersection(&target.bounding_box().translate(-area.top_left));
    let pixels = visible.points().filter_map(|p| {
        let color = match image.pixel(p)? {
            BinaryColor::On => Some(on),
            BinaryColor::Off => off,
        };
        color.map(|c| Pixel(p + area.top_left, c))
    });
    target.draw_iter(pixels)
}
