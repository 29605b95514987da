//! Analog watchface
//!
//! Three layers stacked on the window root: a solid background, the dial
//! bitmap and the hands.

use core::mem;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use super::hands::HandRenderer;
use crate::{
    host::{Bitmap, Error, Host, LayerId, LayerPainter, TickHandler, WindowHandlers},
    palette::Palette,
    resources::{self, ResourceId},
    time::{ClockTime, TimeUnits},
};

/// Handles owned while the window is shown. Each one is taken out exactly
/// once when released.
#[derive(Debug, Default)]
struct Layers {
    solid: Option<LayerId>,
    background: Option<Bitmap>,
    dial: Option<LayerId>,
    hands: Option<LayerId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Solid,
    Dial,
    Hands,
}

impl Layers {
    /// Allocate everything or nothing.
    fn allocate<H: Host + ?Sized>(host: &mut H, frame: Rectangle) -> Result<Self, Error> {
        let mut layers = Self::default();
        if let Err(error) = layers.fill(host, frame) {
            warn!("Watchface allocation failed, releasing what was allocated");
            layers.release(host);
            return Err(error);
        }
        Ok(layers)
    }

    fn fill<H: Host + ?Sized>(&mut self, host: &mut H, frame: Rectangle) -> Result<(), Error> {
        self.solid = Some(host.create_layer(frame)?);
        self.background = Some(host.load_bitmap(ResourceId::Background)?);
        self.dial = Some(host.create_layer(frame)?);
        self.hands = Some(host.create_layer(frame)?);
        Ok(())
    }

    /// Stack the layers in drawing order.
    fn stack<H: Host + ?Sized>(&self, host: &mut H) {
        for layer in [self.solid, self.dial, self.hands].into_iter().flatten() {
            host.add_child(layer);
        }
    }

    /// Release in reverse dependency order: the dial layer goes before the
    /// bitmap it shows.
    fn release<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(layer) = self.hands.take() {
            host.destroy_layer(layer);
        }
        if let Some(layer) = self.dial.take() {
            host.destroy_layer(layer);
        }
        if let Some(bitmap) = self.background.take() {
            host.destroy_bitmap(bitmap);
        }
        if let Some(layer) = self.solid.take() {
            host.destroy_layer(layer);
        }
    }

    fn role(&self, layer: LayerId) -> Option<Role> {
        let layer = Some(layer);
        if layer == self.solid {
            Some(Role::Solid)
        } else if layer == self.dial {
            Some(Role::Dial)
        } else if layer == self.hands {
            Some(Role::Hands)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Unloaded,
    Loaded(Layers),
}

/// Analog watchface: owns its layers while shown and paints them on request.
pub struct Watchface {
    hands: HandRenderer,
    palette: Palette,
    state: State,
}

impl Watchface {
    /// Create the face for a window of `bounds`. The hand pivot is fixed here.
    pub fn new(bounds: Rectangle, supports_color: bool) -> Self {
        let palette = Palette::new(supports_color);
        Self {
            hands: HandRenderer::new(bounds, palette),
            palette,
            state: State::Unloaded,
        }
    }

    /// Create the face for the host's root window.
    pub fn for_host<H: Host + ?Sized>(host: &H) -> Self {
        Self::new(host.root_bounds(), host.supports_color())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Solid, dial and hands layer, bottom first, while loaded.
    pub fn layers(&self) -> Option<[LayerId; 3]> {
        match &self.state {
            State::Loaded(Layers {
                solid: Some(solid),
                dial: Some(dial),
                hands: Some(hands),
                ..
            }) => Some([*solid, *dial, *hands]),
            _ => None,
        }
    }
}

impl<H: Host + ?Sized> WindowHandlers<H> for Watchface {
    fn on_show(&mut self, host: &mut H) -> Result<(), Error> {
        if self.is_loaded() {
            warn!("Watchface shown twice");
            return Ok(());
        }

        let frame = host.root_bounds();
        let layers = Layers::allocate(host, frame)?;
        layers.stack(host);
        host.subscribe_ticks(TimeUnits::SECOND);
        self.state = State::Loaded(layers);
        info!("Watchface loaded");
        Ok(())
    }

    fn on_hide(&mut self, host: &mut H) {
        let State::Loaded(mut layers) = mem::take(&mut self.state) else {
            return;
        };
        host.unsubscribe_ticks();
        layers.release(host);
        info!("Watchface unloaded");
    }
}

impl<H: Host + ?Sized> TickHandler<H> for Watchface {
    fn on_tick(&mut self, host: &mut H, tick_time: ClockTime, _units_changed: TimeUnits) {
        if !self.is_loaded() {
            return;
        }
        trace!(
            "Tick {}:{}:{}",
            tick_time.hour,
            tick_time.minute,
            tick_time.second
        );
        host.mark_dirty();
    }
}

impl LayerPainter for Watchface {
    fn paint<D>(
        &mut self,
        layer: LayerId,
        bounds: Rectangle,
        target: &mut D,
        now: ClockTime,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let State::Loaded(layers) = &self.state else {
            return Ok(());
        };

        match layers.role(layer) {
            Some(Role::Solid) => target.fill_solid(&bounds, self.palette.background),
            Some(Role::Dial) => match &layers.background {
                Some(bitmap) => resources::composite(
                    &bitmap.image(),
                    target,
                    &bounds,
                    self.palette.dial,
                    self.palette.dial_off,
                ),
                None => Ok(()),
            },
            Some(Role::Hands) => self.hands.draw(target, bounds, now),
            None => Ok(()),
        }
    }
}
