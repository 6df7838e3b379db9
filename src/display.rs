//! 1-bit display surface.
//!
//! The framebuffer is a [`Mono1Bit`](crate::raster::PixelEncoding::Mono1Bit)
//! raster: a set bit is a white pixel, rows are byte-packed MSB first. Colors
//! drawn onto it are reduced to black or white by luma.

use std::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

use crate::raster::{PixelEncoding, Raster, RasterError};

/// Whether `color` reads as white on a 1-bit panel.
pub fn is_light(color: Rgb888) -> bool {
    let luma =
        (299 * color.r() as u32 + 587 * color.g() as u32 + 114 * color.b() as u32) / 1000;
    luma >= 128
}

pub struct Framebuffer {
    raster: Raster,
}

impl Framebuffer {
    /// All-black framebuffer of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let raster = Raster::blank(Size::new(width, height), PixelEncoding::Mono1Bit, None)?;
        Ok(Self { raster })
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, white: bool) {
        if x >= self.raster.width() || y >= self.raster.height() {
            return;
        }
        self.raster.set_bit(x, y, white);
    }

    /// Out-of-bounds reads are black.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        x < self.raster.width() && y < self.raster.height() && self.raster.bit(x, y)
    }

    pub fn fill(&mut self, white: bool) {
        for y in 0..self.raster.height() {
            for x in 0..self.raster.width() {
                self.raster.set_bit(x, y, white);
            }
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn into_raster(self) -> Raster {
        self.raster
    }

    /// Text rendering of the frame, one character per pixel: `#` for black
    /// ink, space for white.
    pub fn to_ascii(&self) -> String {
        let width = self.raster.width() as usize;
        let mut out = String::with_capacity((width + 1) * self.raster.height() as usize);
        for y in 0..self.raster.height() {
            for x in 0..self.raster.width() {
                out.push(if self.raster.bit(x, y) { ' ' } else { '#' });
            }
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.raster.size()
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, is_light(color));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_luma_threshold() {
        assert!(is_light(Rgb888::WHITE));
        assert!(!is_light(Rgb888::BLACK));
        assert!(is_light(Rgb888::new(0x00, 0xFF, 0x00)));
        assert!(!is_light(Rgb888::new(0x00, 0x00, 0xFF)));
        assert!(!is_light(Rgb888::new(0xFF, 0x00, 0x00)));
    }

    #[test]
    fn test_new_framebuffer_is_black() {
        let fb = Framebuffer::new(10, 3).unwrap();
        assert_eq!(fb.size(), Size::new(10, 3));
        assert!(fb.raster().pixels().iter().all(|&b| b == 0));
        assert_eq!(fb.raster().row_stride(), 2);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.set_pixel(4, 0, true);
        fb.set_pixel(0, 9, true);
        assert!(!fb.pixel(4, 0));
        assert!(fb.raster().pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_drawing_a_white_rectangle() {
        let mut fb = Framebuffer::new(8, 4).unwrap();
        Rectangle::new(Point::new(2, 1), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
            .draw(&mut fb)
            .unwrap();

        assert!(fb.pixel(2, 1));
        assert!(fb.pixel(4, 2));
        assert!(!fb.pixel(5, 1));
        assert!(!fb.pixel(2, 3));
        // row 1 holds columns 2..=4: 0b0011_1000
        assert_eq!(fb.raster().pixels()[1], 0x38);
    }

    #[test]
    fn test_ascii_rendering() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.set_pixel(1, 0, true);
        assert_eq!(fb.to_ascii(), "# #\n###\n");
        fb.fill(true);
        assert_eq!(fb.to_ascii(), "   \n   \n");
    }
}
