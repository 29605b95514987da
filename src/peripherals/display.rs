//! Display control module for PineTime

use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use mipidsi::{models::ST7789, Builder, Orientation};

use super::backlight::Backlight;

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

/// ST7789 panel on SPI2
pub type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

pub struct Display {
    /// Display instance
    lcd: Lcd,
    /// Kept alive with the panel, dropping the pins turns the light off
    #[allow(unused)]
    backlight: Backlight,
}

impl Display {
    /// Configure display settings on boot and clear the panel
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs_pin: Output<'static, AnyPin>,
        dc_pin: Output<'static, AnyPin>,
        rst_pin: Output<'static, AnyPin>,
        backlight: Backlight,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd, backlight };
        display.clear(Rgb565::BLACK)?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Interface)
    }

    /// Draw target of the panel
    pub fn lcd(&mut self) -> &mut Lcd {
        &mut self.lcd
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Panel did not accept the init sequence
    Init,
    /// SPI transfer failed
    Interface,
}
