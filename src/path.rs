//! Polygon paths for the watch hands

use embedded_graphics::{
    pixelcolor::PixelColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};

use crate::trig::{Angle, MAX_RATIO};

/// A closed polygon of `N` points, defined around its own origin.
///
/// The path is placed with [`move_to`](Self::move_to) and turned around that
/// origin with [`rotate_to`](Self::rotate_to). Both only update the transform;
/// the point list is never touched.
///
/// Not built on `primitives::Triangle`: a hand may have any number of points,
/// it turns in place about its origin without rebuilding the shape, and the
/// fill uses half-open rows and columns so polygons sharing an edge never
/// paint the same pixel.
#[derive(Clone, Debug)]
pub struct HandPath<const N: usize> {
    points: [Point; N],
    offset: Point,
    rotation: Angle,
}

impl<const N: usize> HandPath<N> {
    pub const fn new(points: [Point; N]) -> Self {
        Self {
            points,
            offset: Point::zero(),
            rotation: Angle::ZERO,
        }
    }

    /// Set the screen position of the path origin.
    pub fn move_to(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Set the absolute rotation around the path origin.
    pub fn rotate_to(&mut self, angle: Angle) {
        self.rotation = angle;
    }

    /// Points in screen coordinates after rotation and translation.
    pub fn transformed(&self) -> [Point; N] {
        let sin = self.rotation.sin();
        let cos = self.rotation.cos();
        self.points.map(|p| {
            Point::new(
                (p.x * cos - p.y * sin) / MAX_RATIO,
                (p.y * cos + p.x * sin) / MAX_RATIO,
            ) + self.offset
        })
    }

    /// Fill the polygon using even-odd scanlines.
    ///
    /// Pixel rows and columns are half open: a square from (0, 0) to (4, 4)
    /// covers exactly 4×4 pixels, so adjacent polygons never overlap.
    pub fn draw_filled<D, C>(&self, target: &mut D, color: C) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor,
    {
        let points = self.transformed();
        let Some(first) = points.first() else {
            return Ok(());
        };
        let (top, bottom) = points
            .iter()
            .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

        let mut crossings = [0i32; N];
        for y in top..bottom {
            let mut count = 0;
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % N];
                let (upper, lower) = if a.y < b.y { (*a, b) } else { (b, *a) };
                if y < upper.y || y >= lower.y {
                    continue;
                }
                crossings[count] =
                    upper.x + (y - upper.y) * (lower.x - upper.x) / (lower.y - upper.y);
                count += 1;
            }

            let row = &mut crossings[..count];
            row.sort_unstable();
            for span in row.chunks_exact(2) {
                let width = (span[1] - span[0]) as u32;
                if width > 0 {
                    let area = Rectangle::new(Point::new(span[0], y), Size::new(width, 1));
                    target.fill_solid(&area, color)?;
                }
            }
        }

        Ok(())
    }

    /// Stroke the closed outline one pixel wide.
    pub fn draw_outline<D, C>(&self, target: &mut D, color: C) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor,
    {
        let points = self.transformed();
        let style = PrimitiveStyle::with_stroke(color, 1);
        for (i, start) in points.iter().enumerate() {
            Line::new(*start, points[(i + 1) % N])
                .into_styled(style)
                .draw(target)?;
        }

        Ok(())
    }
}
