//! Minimal window host
//!
//! Keeps the root layer's children in stacking order, hands out bitmap slots
//! and runs the redraw pass. Everything lives in fixed-size tables so it runs
//! without an allocator.

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use crate::{
    config::DisplayConfig,
    host::{Bitmap, Error, Host, LayerId, LayerPainter},
    resources::ResourceId,
    strip::StripBuffer,
    time::{ClockTime, TickTimer, TimeUnits},
};

pub const MAX_LAYERS: usize = 8;
pub const MAX_BITMAPS: usize = 4;

pub struct Compositor {
    config: DisplayConfig,
    /// Frame of each allocated layer, indexed by `LayerId`
    layers: [Option<Rectangle>; MAX_LAYERS],
    /// Children of the root layer, bottom first
    stack: [LayerId; MAX_LAYERS],
    depth: usize,
    bitmaps: [Option<ResourceId>; MAX_BITMAPS],
    dirty: bool,
    subscription: Option<TimeUnits>,
    timer: TickTimer,
    frames: u32,
}

impl Compositor {
    pub const fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            layers: [None; MAX_LAYERS],
            stack: [LayerId(0); MAX_LAYERS],
            depth: 0,
            bitmaps: [None; MAX_BITMAPS],
            dirty: false,
            subscription: None,
            timer: TickTimer::new(),
            frames: 0,
        }
    }

    /// Layers currently stacked on the root, bottom first.
    pub fn stack(&self) -> &[LayerId] {
        &self.stack[..self.depth]
    }

    pub fn live_layers(&self) -> usize {
        self.layers.iter().flatten().count()
    }

    pub fn live_bitmaps(&self) -> usize {
        self.bitmaps.iter().flatten().count()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Completed redraw passes.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn subscription(&self) -> Option<TimeUnits> {
        self.subscription
    }

    /// Feed the wall clock to the tick timer. Return the changed units when
    /// they reach the current subscription.
    pub fn poll_tick(&mut self, now: NaiveDateTime) -> Option<TimeUnits> {
        let units = self.timer.poll(now)?;
        let granularity = self.subscription?;
        units.reaches(granularity).then_some(units)
    }

    /// Redraw pass: paint every stacked layer, bottom first, if anything
    /// requested a redraw. Return whether a frame was painted.
    ///
    /// Layers are painted straight into `target`, so a panel shows every
    /// intermediate layer. See [`render_strips`](Self::render_strips).
    pub fn render<P, D>(
        &mut self,
        painter: &mut P,
        target: &mut D,
        now: ClockTime,
    ) -> Result<bool, D::Error>
    where
        P: LayerPainter,
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.dirty {
            return Ok(false);
        }
        self.paint_layers(painter, target, now)?;
        self.finish_frame();
        Ok(true)
    }

    /// Redraw pass that composes the frame in `strip`, one band at a time,
    /// and sends each finished band to `target`. Every pixel of the root
    /// layer reaches `target` exactly once.
    pub fn render_strips<P, D, const W: usize, const R: usize>(
        &mut self,
        painter: &mut P,
        target: &mut D,
        now: ClockTime,
        strip: &mut StripBuffer<W, R>,
    ) -> Result<bool, D::Error>
    where
        P: LayerPainter,
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.dirty {
            return Ok(false);
        }
        for band in StripBuffer::<W, R>::bands(self.root_bounds()) {
            strip.start(band);
            if let Err(never) = self.paint_layers(painter, strip, now) {
                match never {}
            }
            strip.flush(target)?;
        }
        self.finish_frame();
        Ok(true)
    }

    fn paint_layers<P, D>(
        &self,
        painter: &mut P,
        target: &mut D,
        now: ClockTime,
    ) -> Result<(), D::Error>
    where
        P: LayerPainter,
        D: DrawTarget<Color = Rgb565>,
    {
        for &layer in self.stack() {
            let Some(frame) = self.layers[layer.0 as usize] else {
                continue;
            };
            let bounds = Rectangle::new(Point::zero(), frame.size);
            let mut translated = target.translated(frame.top_left);
            let mut clipped = translated.clipped(&bounds);
            painter.paint(layer, bounds, &mut clipped, now)?;
        }
        Ok(())
    }

    fn finish_frame(&mut self) {
        self.dirty = false;
        self.frames = self.frames.wrapping_add(1);
        trace!("Frame {} painted", self.frames);
    }
}

impl Host for Compositor {
    fn root_bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.config.size)
    }

    fn supports_color(&self) -> bool {
        self.config.supports_color
    }

    fn create_layer(&mut self, frame: Rectangle) -> Result<LayerId, Error> {
        let index = self
            .layers
            .iter()
            .position(Option::is_none)
            .ok_or(Error::OutOfLayers)?;
        self.layers[index] = Some(frame);
        debug!("Layer {} created", index);
        Ok(LayerId(index as u8))
    }

    fn add_child(&mut self, layer: LayerId) {
        if self.layers.get(layer.0 as usize).copied().flatten().is_none() {
            warn!("Cannot stack unknown layer {}", layer.0);
            return;
        }
        if self.stack().contains(&layer) || self.depth == MAX_LAYERS {
            return;
        }
        self.stack[self.depth] = layer;
        self.depth += 1;
        self.dirty = true;
    }

    fn destroy_layer(&mut self, layer: LayerId) {
        match self.layers.get_mut(layer.0 as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => {
                warn!("Layer {} destroyed twice or never created", layer.0);
                return;
            }
        }

        if let Some(position) = self.stack().iter().position(|&l| l == layer) {
            self.stack.copy_within(position + 1..self.depth, position);
            self.depth -= 1;
            self.dirty = true;
        }
        debug!("Layer {} destroyed", layer.0);
    }

    fn load_bitmap(&mut self, resource: ResourceId) -> Result<Bitmap, Error> {
        let index = self
            .bitmaps
            .iter()
            .position(Option::is_none)
            .ok_or(Error::OutOfBitmaps)?;
        self.bitmaps[index] = Some(resource);
        debug!("Bitmap {} loaded", index);
        Ok(Bitmap::new(index as u8, resource))
    }

    fn destroy_bitmap(&mut self, bitmap: Bitmap) {
        match self.bitmaps.get_mut(bitmap.slot() as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                debug!("Bitmap {} destroyed", bitmap.slot());
            }
            _ => warn!("Bitmap {} destroyed twice or never loaded", bitmap.slot()),
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn subscribe_ticks(&mut self, units: TimeUnits) {
        self.subscription = Some(units);
    }

    fn unsubscribe_ticks(&mut self) {
        self.subscription = None;
    }
}
