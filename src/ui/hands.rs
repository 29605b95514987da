//! Clock hands

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
};

use crate::{
    palette::Palette,
    path::HandPath,
    time::ClockTime,
    trig::{Angle, MAX_RATIO},
};

/// Minute hand around its pivot, pointing at 12 o'clock
pub const MINUTE_HAND_POINTS: [Point; 3] =
    [Point::new(-10, 24), Point::new(10, 24), Point::new(0, -100)];

/// Hour hand around its pivot, pointing at 12 o'clock
pub const HOUR_HAND_POINTS: [Point; 3] =
    [Point::new(-8, 24), Point::new(8, 24), Point::new(0, -70)];

/// Side of the center dot
const DOT_SIZE: u32 = 5;
/// Side of the accent dot inside the center dot
const ACCENT_SIZE: u32 = 3;

pub fn second_angle(time: ClockTime) -> Angle {
    Angle::from_fraction(time.second as i32, 60)
}

pub fn minute_angle(time: ClockTime) -> Angle {
    Angle::from_fraction(time.minute as i32, 60)
}

/// The hour hand moves in 10 minute steps: 6 steps per hour, 72 per turn.
pub fn hour_angle(time: ClockTime) -> Angle {
    let steps = (time.hour % 12) as i32 * 6 + time.minute as i32 / 10;
    Angle::from_fraction(steps, 12 * 6)
}

/// End of a hand of `length` pixels starting at `center`.
pub fn hand_end(center: Point, length: i32, angle: Angle) -> Point {
    Point::new(
        angle.sin() * length / MAX_RATIO,
        -angle.cos() * length / MAX_RATIO,
    ) + center
}

/// Center of a surface, rounded towards its top left corner.
pub fn center_of(bounds: &Rectangle) -> Point {
    bounds.top_left + Point::new(bounds.size.width as i32 / 2, bounds.size.height as i32 / 2)
}

/// Draws the hour, minute and second hands.
pub struct HandRenderer {
    hour_hand: HandPath<3>,
    minute_hand: HandPath<3>,
    /// Pivot of all hands, fixed at startup
    center: Point,
    palette: Palette,
}

impl HandRenderer {
    /// Place the hands in the middle of `bounds`.
    pub fn new(bounds: Rectangle, palette: Palette) -> Self {
        let center = center_of(&bounds);
        let mut hour_hand = HandPath::new(HOUR_HAND_POINTS);
        let mut minute_hand = HandPath::new(MINUTE_HAND_POINTS);
        hour_hand.move_to(center);
        minute_hand.move_to(center);

        Self {
            hour_hand,
            minute_hand,
            center,
            palette,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Paint the hands for `time` on a surface of `bounds`.
    pub fn draw<D>(
        &mut self,
        target: &mut D,
        bounds: Rectangle,
        time: ClockTime,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let palette = self.palette;

        self.hour_hand.rotate_to(hour_angle(time));
        self.hour_hand.draw_filled(target, palette.hands)?;
        if let Some(outline) = palette.outline {
            self.hour_hand.draw_outline(target, outline)?;
        }

        self.minute_hand.rotate_to(minute_angle(time));
        self.minute_hand.draw_filled(target, palette.hands)?;
        if let Some(outline) = palette.outline {
            self.minute_hand.draw_outline(target, outline)?;
        }

        let length = bounds.size.width as i32 / 2;
        let second_hand = hand_end(self.center, length, second_angle(time));
        Line::new(second_hand, self.center)
            .into_styled(PrimitiveStyle::with_stroke(palette.second_hand, 1))
            .draw(target)?;

        // Dot in the middle
        let half = Point::new(bounds.size.width as i32 / 2, bounds.size.height as i32 / 2);
        let dot = Rectangle::new(half - Point::new(2, 2), Size::new_equal(DOT_SIZE));
        target.fill_solid(&dot, palette.dot)?;
        if let Some(accent) = palette.accent {
            let inner = Rectangle::new(half - Point::new(1, 1), Size::new_equal(ACCENT_SIZE));
            target.fill_solid(&inner, accent)?;
        }

        Ok(())
    }
}
