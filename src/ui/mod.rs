//! UI definitions module
//!
//! The analog watchface and the pieces it is drawn from.

mod analog_watchface;
pub mod hands;

pub use analog_watchface::Watchface;
