//! Off-screen strip buffer
//!
//! The panel holds 240×240 pixels but the whole RAM is 64 KiB, so a frame is
//! composed one band of rows at a time and each finished band is sent to the
//! panel in a single window write. Every panel pixel is written once per
//! frame.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{ContainsPoint, Rectangle},
};

/// `W` columns by `R` rows of pixels, placed anywhere on the panel.
///
/// Drawing uses panel coordinates; anything outside the current band is
/// dropped.
pub struct StripBuffer<const W: usize, const R: usize> {
    rows: [[Rgb565; W]; R],
    area: Rectangle,
}

impl<const W: usize, const R: usize> StripBuffer<W, R> {
    pub const fn new() -> Self {
        Self {
            rows: [[Rgb565::BLACK; W]; R],
            area: Rectangle::new(Point::zero(), Size::zero()),
        }
    }

    /// Split `area` into bands the buffer can hold, top to bottom.
    pub fn bands(area: Rectangle) -> impl Iterator<Item = Rectangle> {
        let width = area.size.width.min(W as u32);
        let height = area.size.height;
        (0..height).step_by(R.max(1)).map(move |y| {
            Rectangle::new(
                area.top_left + Point::new(0, y as i32),
                Size::new(width, (height - y).min(R as u32)),
            )
        })
    }

    /// Move the buffer to `band` and clear it to black.
    pub fn start(&mut self, band: Rectangle) {
        let size = Size::new(
            band.size.width.min(W as u32),
            band.size.height.min(R as u32),
        );
        self.area = Rectangle::new(band.top_left, size);
        for row in self.rows.iter_mut() {
            row.fill(Rgb565::BLACK);
        }
    }

    /// Send the current band to `target`.
    pub fn flush<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let width = self.area.size.width as usize;
        let height = self.area.size.height as usize;
        let colors = self.rows[..height]
            .iter()
            .flat_map(move |row| row[..width].iter().copied());
        target.fill_contiguous(&self.area, colors)
    }

    fn row_mut(&mut self, y: i32) -> &mut [Rgb565; W] {
        &mut self.rows[(y - self.area.top_left.y) as usize]
    }
}

impl<const W: usize, const R: usize> Default for StripBuffer<W, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const R: usize> Dimensions for StripBuffer<W, R> {
    fn bounding_box(&self) -> Rectangle {
        self.area
    }
}

impl<const W: usize, const R: usize> DrawTarget for StripBuffer<W, R> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let left = self.area.top_left.x;
        for Pixel(point, color) in pixels {
            if self.area.contains(point) {
                self.row_mut(point.y)[(point.x - left) as usize] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.area);
        if area.is_zero_sized() {
            return Ok(());
        }
        let start = (area.top_left.x - self.area.top_left.x) as usize;
        let end = start + area.size.width as usize;
        for y in area.rows() {
            self.row_mut(y)[start..end].fill(color);
        }
        Ok(())
    }
}
