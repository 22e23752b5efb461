use std::{convert::Infallible, fmt};

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Size},
};

const WIDTH: usize = 128;
const HEIGHT: usize = 64;

/// A 128x64 monochrome panel kept in memory and printed as text.
pub struct AsciiDisplay {
    pixels: Vec<bool>,
}

impl AsciiDisplay {
    pub const SIZE: Size = Size::new(WIDTH as u32, HEIGHT as u32);

    pub fn new() -> Self {
        Self {
            pixels: vec![false; WIDTH * HEIGHT],
        }
    }
}

impl Default for AsciiDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for AsciiDisplay {
    fn size(&self) -> Size {
        Self::SIZE
    }
}

impl DrawTarget for AsciiDisplay {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                if x < WIDTH && y < HEIGHT {
                    self.pixels[y * WIDTH + x] = color.is_on();
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for AsciiDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.chunks(WIDTH) {
            for &on in row {
                f.write_str(if on { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
