//! SSD1306 128×64 OLED as a char/graphic display.
//!
//! Char mode emulates a text LCD: cell (col, row) maps to a 6×10 pixel box
//! and text is drawn with an opaque background, so a write overwrites
//! whatever the cells held before. Graphic mode blits full-screen bitmaps.
//!
//! Drawing only touches the RAM frame buffer; `flush` sends the dirty area
//! over I²C, once per refresh.

use crate::drivers::bitmaps::Bitmap;
use crate::error::Error;
use crate::hal::{DisplayDriver, DisplayMode};
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Character cell width in pixels.
const CELL_WIDTH: i32 = 6;
/// Character cell height in pixels.
const CELL_HEIGHT: i32 = 10;

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Buffered SSD1306 driven through the `DisplayDriver` interface.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub struct Glcd<I2C> {
    display: Driver<I2C>,
    mode: DisplayMode,
    col: u8,
    row: u8,
}

impl<I2C> Glcd<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self {
            display,
            mode: DisplayMode::Char,
            col: 0,
            row: 0,
        }
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .background_color(BinaryColor::Off)
        .build()
}

impl<I2C> DisplayDriver for Glcd<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn init(&mut self) {
        if self.display.init().is_err() {
            warn!("GLCD init failed: {:?}", Error::Display);
        }
        self.display.clear_buffer();
    }

    fn clear(&mut self) {
        self.display.clear_buffer();
        self.col = 0;
        self.row = 0;
    }

    fn set_mode(&mut self, mode: DisplayMode) {
        debug!("GLCD mode: {:?}", mode);
        self.mode = mode;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col;
        self.row = row;
    }

    fn write_str(&mut self, text: &str) {
        if self.mode != DisplayMode::Char {
            debug!("GLCD: text dropped in graphic mode");
            return;
        }

        let origin = Point::new(
            i32::from(self.col) * CELL_WIDTH,
            i32::from(self.row) * CELL_HEIGHT,
        );
        let _ = Text::with_baseline(text, origin, text_style(), Baseline::Top)
            .draw(&mut self.display);
        let cells = u8::try_from(text.len()).unwrap_or(u8::MAX);
        self.col = self.col.saturating_add(cells);
    }

    fn write_bitmap(&mut self, bitmap: &Bitmap) {
        let raw: ImageRaw<BinaryColor> = ImageRaw::new(bitmap, crate::config::GLCD_WIDTH as u32);
        let _ = Image::new(&raw, Point::zero()).draw(&mut self.display);
    }

    fn flush(&mut self) {
        if self.display.flush().is_err() {
            warn!("GLCD flush failed: {:?}", Error::Display);
        }
    }
}
