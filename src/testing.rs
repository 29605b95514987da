//! Test doubles for the host and the display

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{ContainsPoint, Rectangle},
};

use crate::{
    host::{Bitmap, Error, Host, LayerId},
    resources::ResourceId,
    time::TimeUnits,
};

/// In-memory RGB565 display.
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new(size: Size, fill: Rgb565) -> Self {
        Self {
            size,
            pixels: vec![fill; (size.width * size.height) as usize],
        }
    }

    pub fn pixel(&self, point: Point) -> Rgb565 {
        self.pixels[point.y as usize * self.size.width as usize + point.x as usize]
    }

    /// Pixels of one row, left to right.
    pub fn row(&self, y: i32) -> &[Rgb565] {
        let width = self.size.width as usize;
        &self.pixels[y as usize * width..(y as usize + 1) * width]
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        let width = self.size.width as usize;
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                self.pixels[point.y as usize * width + point.x as usize] = color;
            }
        }
        Ok(())
    }
}

/// Display that counts the writes to each pixel during one pass.
pub struct CountingPanel {
    frame: FrameBuffer,
    writes: Vec<u32>,
    conflicts: usize,
}

impl CountingPanel {
    pub fn new(size: Size) -> Self {
        Self {
            frame: FrameBuffer::new(size, Rgb565::BLACK),
            writes: vec![0; (size.width * size.height) as usize],
            conflicts: 0,
        }
    }

    /// Forget the counts, keep the picture.
    pub fn next_pass(&mut self) {
        self.writes.fill(0);
        self.conflicts = 0;
    }

    /// Most writes any single pixel received this pass.
    pub fn max_writes(&self) -> u32 {
        self.writes.iter().copied().max().unwrap_or(0)
    }

    /// Pixels never written this pass.
    pub fn untouched(&self) -> usize {
        self.writes.iter().filter(|&&w| w == 0).count()
    }

    /// Writes that changed a pixel already written this pass.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

impl OriginDimensions for CountingPanel {
    fn size(&self) -> Size {
        self.frame.size
    }
}

impl DrawTarget for CountingPanel {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        let width = self.frame.size.width as usize;
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let index = point.y as usize * width + point.x as usize;
            if self.writes[index] > 0 && self.frame.pixels[index] != color {
                self.conflicts += 1;
            }
            self.writes[index] += 1;
            self.frame.pixels[index] = color;
        }
        Ok(())
    }
}

/// Host calls, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    CreateLayer(LayerId),
    AddChild(LayerId),
    DestroyLayer(LayerId),
    LoadBitmap(u8),
    DestroyBitmap(u8),
    MarkDirty,
    Subscribe(TimeUnits),
    Unsubscribe,
}

/// Host that records every call and counts live allocations.
pub struct RecordingHost {
    pub bounds: Rectangle,
    pub color: bool,
    pub calls: Vec<Call>,
    /// Fail the n-th (zero based) layer allocation
    pub fail_layer: Option<usize>,
    pub fail_bitmap: bool,
    layers: Vec<LayerId>,
    bitmaps: Vec<u8>,
    next_id: u8,
    created_layers: usize,
}

impl RecordingHost {
    pub fn new(size: Size, color: bool) -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), size),
            color,
            calls: Vec::new(),
            fail_layer: None,
            fail_bitmap: false,
            layers: Vec::new(),
            bitmaps: Vec::new(),
            next_id: 0,
            created_layers: 0,
        }
    }

    pub fn live_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn live_bitmaps(&self) -> usize {
        self.bitmaps.len()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }

    pub fn dirty_marks(&self) -> usize {
        self.count(Call::MarkDirty)
    }

    fn next_id(&mut self) -> u8 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for RecordingHost {
    fn root_bounds(&self) -> Rectangle {
        self.bounds
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn create_layer(&mut self, _frame: Rectangle) -> Result<LayerId, Error> {
        let attempt = self.created_layers;
        self.created_layers += 1;
        if self.fail_layer == Some(attempt) {
            return Err(Error::OutOfLayers);
        }
        let layer = LayerId(self.next_id());
        self.layers.push(layer);
        self.calls.push(Call::CreateLayer(layer));
        Ok(layer)
    }

    fn add_child(&mut self, layer: LayerId) {
        self.calls.push(Call::AddChild(layer));
    }

    fn destroy_layer(&mut self, layer: LayerId) {
        let index = self
            .layers
            .iter()
            .position(|&l| l == layer)
            .expect("layer destroyed twice or never created");
        self.layers.remove(index);
        self.calls.push(Call::DestroyLayer(layer));
    }

    fn load_bitmap(&mut self, resource: ResourceId) -> Result<Bitmap, Error> {
        if self.fail_bitmap {
            return Err(Error::OutOfBitmaps);
        }
        let slot = self.next_id();
        self.bitmaps.push(slot);
        self.calls.push(Call::LoadBitmap(slot));
        Ok(Bitmap::new(slot, resource))
    }

    fn destroy_bitmap(&mut self, bitmap: Bitmap) {
        let index = self
            .bitmaps
            .iter()
            .position(|&b| b == bitmap.slot())
            .expect("bitmap destroyed twice or never loaded");
        self.bitmaps.remove(index);
        self.calls.push(Call::DestroyBitmap(bitmap.slot()));
    }

    fn mark_dirty(&mut self) {
        self.calls.push(Call::MarkDirty);
    }

    fn subscribe_ticks(&mut self, units: TimeUnits) {
        self.calls.push(Call::Subscribe(units));
    }

    fn unsubscribe_ticks(&mut self) {
        self.calls.push(Call::Unsubscribe);
    }
}
