//! Analog watchface for the PineTime
//!
//! A dial bitmap over a solid background, with hour, minute and second hands
//! redrawn once per second. The windowing system is abstracted by
//! [`host::Host`]; [`compositor::Compositor`] is a small implementation of it
//! that the firmware renders through.

#![cfg_attr(not(test), no_std)]

// This must go first so the macros are visible to the other modules
mod fmt;

pub mod app;
pub mod compositor;
pub mod config;
pub mod host;
pub mod palette;
pub mod path;
pub mod resources;
pub mod strip;
pub mod time;
pub mod trig;
pub mod ui;

#[cfg(test)]
mod testing;
