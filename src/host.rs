//! Interface to the host windowing system
//!
//! The host owns the window, its layer stack, the resource loader and the tick
//! timer. The watchface only talks to it through [`Host`] and answers its
//! callbacks through [`WindowHandlers`], [`TickHandler`] and [`LayerPainter`].

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use crate::{
    resources::{RawBitmap, ResourceId},
    time::{ClockTime, TimeUnits},
};

/// Handle to a layer allocated by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(pub u8);

/// A bitmap loaded by the host.
///
/// Not `Clone`: it goes back to the host through [`Host::destroy_bitmap`]
/// exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct Bitmap {
    slot: u8,
    resource: ResourceId,
}

impl Bitmap {
    /// Only hosts create bitmaps.
    pub fn new(slot: u8, resource: ResourceId) -> Self {
        Self { slot, resource }
    }

    /// Host bookkeeping slot.
    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn image(&self) -> RawBitmap {
        self.resource.bitmap()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No free layer slot
    OutOfLayers,
    /// No free bitmap slot
    OutOfBitmaps,
}

/// Services provided by the host to the watchface.
pub trait Host {
    /// Bounds of the window root layer.
    fn root_bounds(&self) -> Rectangle;

    /// Whether the display shows colors. Read once at startup.
    fn supports_color(&self) -> bool;

    /// Allocate a layer with the given frame.
    fn create_layer(&mut self, frame: Rectangle) -> Result<LayerId, Error>;

    /// Stack a layer on top of the root layer's children.
    fn add_child(&mut self, layer: LayerId);

    /// Release a layer, removing it from the stack.
    fn destroy_layer(&mut self, layer: LayerId);

    fn load_bitmap(&mut self, resource: ResourceId) -> Result<Bitmap, Error>;

    fn destroy_bitmap(&mut self, bitmap: Bitmap);

    /// Request a redraw of the whole window.
    fn mark_dirty(&mut self);

    /// Deliver ticks whenever `units` (or a coarser unit) change.
    fn subscribe_ticks(&mut self, units: TimeUnits);

    fn unsubscribe_ticks(&mut self);
}

/// Window load and unload callbacks.
pub trait WindowHandlers<H: Host + ?Sized> {
    /// The window is about to appear: allocate layers and resources.
    fn on_show(&mut self, host: &mut H) -> Result<(), Error>;

    /// The window went away: release everything `on_show` allocated.
    fn on_hide(&mut self, host: &mut H);
}

/// Tick timer callback.
pub trait TickHandler<H: Host + ?Sized> {
    fn on_tick(&mut self, host: &mut H, tick_time: ClockTime, units_changed: TimeUnits);
}

/// Layer update callback, called by the host during a redraw pass.
pub trait LayerPainter {
    /// Paint `layer` into `target`. `bounds` is the layer's own coordinate
    /// space, with its origin at the layer's top left corner.
    fn paint<D>(
        &mut self,
        layer: LayerId,
        bounds: Rectangle,
        target: &mut D,
        now: ClockTime,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}
