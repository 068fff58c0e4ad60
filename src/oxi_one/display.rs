use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use crate::util::Array2d;

/// OLED width in pixels
pub const DISPLAY_WIDTH: usize = 128;
/// OLED height in pixels
pub const DISPLAY_HEIGHT: usize = 64;
/// Number of 8-pixel-high pages the OLED memory is organized in
pub const DISPLAY_PAGES: usize = DISPLAY_HEIGHT / 8;
/// Height of one text line
pub const LINE_HEIGHT: u32 = 10;
/// Index of the text line that is drawn inverted as a status strip
pub const STATUS_LINE: usize = 4;

/// A 128x64 monochrome image of what the OLED should show.
///
/// [`BinaryColor::On`] is a dark (foreground) pixel, [`BinaryColor::Off`] the white background.
/// Besides [`Raster::from_lines`], any `embedded-graphics` drawable can be rendered onto a raster.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Raster {
    pixels: Array2d<bool>,
}

impl Default for Raster {
    fn default() -> Self {
        Self::blank()
    }
}

impl Raster {
    /// An all-background raster
    pub fn blank() -> Self {
        Self { pixels: Array2d::new(DISPLAY_WIDTH, DISPLAY_HEIGHT) }
    }

    /// Render text lines top to bottom in a 6x10 monospaced font, left-aligned.
    ///
    /// The line at index [`STATUS_LINE`] is drawn white-on-black across the full width. Lines
    /// that do not fit are clipped, never wrapped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut raster = Self::blank();
        let normal = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let inverted = MonoTextStyle::new(&FONT_6X10, BinaryColor::Off);

        for (index, line) in lines.iter().enumerate() {
            let top = index as i32 * LINE_HEIGHT as i32;
            if top >= DISPLAY_HEIGHT as i32 {
                break;
            }

            let style = if index == STATUS_LINE {
                let _ = Rectangle::new(Point::new(0, top), Size::new(DISPLAY_WIDTH as u32, LINE_HEIGHT))
                    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                    .draw(&mut raster);
                inverted
            } else {
                normal
            };

            let _ = Text::with_baseline(line.as_ref(), Point::new(0, top), style, Baseline::Top)
                .draw(&mut raster);
        }

        raster
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.pixels.get(x, y).unwrap_or(false)
    }

    /// Pack the raster the way the OLED memory is laid out: page by page, and within a page one
    /// byte per column whose bit `k` is the pixel at row `page * 8 + k`.
    pub fn to_pages(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(DISPLAY_PAGES * DISPLAY_WIDTH);
        for page in 0..DISPLAY_PAGES {
            for col in 0..DISPLAY_WIDTH {
                let byte = (0..8).fold(0u8, |byte, bit| {
                    if self.is_set(col, page * 8 + bit) {
                        byte | (1 << bit)
                    } else {
                        byte
                    }
                });
                bytes.push(byte);
            }
        }
        bytes
    }
}

impl OriginDimensions for Raster {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
    }
}

impl DrawTarget for Raster {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            self.pixels.set(coord.x as usize, coord.y as usize, color.is_on());
        }
        Ok(())
    }
}
