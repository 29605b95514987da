//! Fixed-point angles
//!
//! A full turn is [`FULL_CIRCLE`] units and trigonometric results are scaled by
//! [`MAX_RATIO`], so hand geometry stays in integer arithmetic.

use core::f32::consts::TAU;

/// One full rotation in angle units.
pub const FULL_CIRCLE: i32 = 0x10000;

/// Scale of the values returned by [`Angle::sin`] and [`Angle::cos`] (1.0).
pub const MAX_RATIO: i32 = 0xffff;

/// Angle measured clockwise from 12 o'clock, in units of [`FULL_CIRCLE`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(i32);

impl Angle {
    pub const ZERO: Angle = Angle(0);

    /// Wrap raw angle units.
    pub const fn new(units: i32) -> Self {
        Self(units)
    }

    /// `FULL_CIRCLE * num / den`, rounded towards zero.
    pub const fn from_fraction(num: i32, den: i32) -> Self {
        Self(FULL_CIRCLE * num / den)
    }

    /// Raw angle units.
    pub const fn units(self) -> i32 {
        self.0
    }

    fn radians(self) -> f32 {
        self.0 as f32 * TAU / FULL_CIRCLE as f32
    }

    /// Sine scaled by [`MAX_RATIO`].
    pub fn sin(self) -> i32 {
        libm::roundf(libm::sinf(self.radians()) * MAX_RATIO as f32) as i32
    }

    /// Cosine scaled by [`MAX_RATIO`].
    pub fn cos(self) -> i32 {
        libm::roundf(libm::cosf(self.radians()) * MAX_RATIO as f32) as i32
    }
}
