//! # Packed Rasters
//!
//! A [`Raster`] is the unit every other part of the display manipulates: decoded
//! icons, scaled icons and the display surface itself are all rasters. Pixels are
//! kept in their packed form so nothing ever has to expand an icon to 32-bit color.
//!
//! ## Row Layout
//!
//! Rows are padded to a byte boundary and stored back to back:
//! - **Mono1Bit**: 8 pixels per byte, pixel 0 in the most significant bit
//! - **Indexed2Bit / Indexed4Bit**: 4 or 2 pixels per byte, same bit order
//! - **Indexed8Bit**: one palette index per byte
//!
//! `row_stride * height == pixels.len()` holds for every raster that can be
//! constructed through this module.

use std::rc::Rc;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*, Pixel};
use thiserror::Error;

/// Pixel encodings a raster can carry.
///
/// Only [`PixelEncoding::Mono1Bit`] and [`PixelEncoding::Indexed8Bit`] can be
/// scaled; the narrower palette formats are valid rasters that the scaler
/// passes through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelEncoding {
    Mono1Bit,
    Indexed2Bit,
    Indexed4Bit,
    Indexed8Bit,
}

impl PixelEncoding {
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelEncoding::Mono1Bit => 1,
            PixelEncoding::Indexed2Bit => 2,
            PixelEncoding::Indexed4Bit => 4,
            PixelEncoding::Indexed8Bit => 8,
        }
    }

    /// Bytes needed for one row of `width` pixels, padded to a whole byte.
    pub fn row_stride(self, width: u32) -> u32 {
        let bits = u64::from(width) * u64::from(self.bits_per_pixel());
        // At most one byte per pixel, so the stride never exceeds `width`
        bits.div_ceil(8) as u32
    }

    pub fn is_indexed(self) -> bool {
        !matches!(self, PixelEncoding::Mono1Bit)
    }
}

/// Color table shared by every raster decoded from the same indexed asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb888>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb888>) -> Self {
        Self { colors }
    }

    pub fn get(&self, index: u8) -> Option<Rgb888> {
        self.colors.get(index as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Errors raised while creating rasters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The pixel buffer could not be reserved.
    #[error("could not allocate {bytes} bytes for raster")]
    AllocationFailed { bytes: usize },

    /// The supplied buffer does not match `row_stride * height`.
    #[error("pixel buffer holds {actual} bytes, layout needs {expected}")]
    InvalidLayout { expected: usize, actual: usize },

    /// Indexed encodings cannot be decoded without a color table.
    #[error("{0:?} raster needs a palette")]
    MissingPalette(PixelEncoding),
}

/// An owned bitmap: packed pixels plus the metadata needed to address them.
///
/// Rasters are deliberately not `Clone`. Each buffer has exactly one owner, and
/// replacing an icon means dropping the old raster before the new one is
/// installed (see [`crate::state::RenderState`]).
#[derive(Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    row_stride: u32,
    pixels: Vec<u8>,
    palette: Option<Rc<Palette>>,
}

impl Raster {
    /// Create a zero-filled raster.
    ///
    /// The buffer is reserved with `try_reserve_exact`, so running out of
    /// memory surfaces as [`RasterError::AllocationFailed`] instead of aborting.
    pub fn blank(
        size: Size,
        encoding: PixelEncoding,
        palette: Option<Rc<Palette>>,
    ) -> Result<Self, RasterError> {
        let row_stride = encoding.row_stride(size.width);
        let bytes = (row_stride as usize)
            .checked_mul(size.height as usize)
            .ok_or(RasterError::AllocationFailed { bytes: usize::MAX })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| RasterError::AllocationFailed { bytes })?;
        pixels.resize(bytes, 0);

        Self::from_parts(size.width, size.height, encoding, pixels, palette)
    }

    /// Wrap an existing pixel buffer, validating it against the layout.
    pub fn from_parts(
        width: u32,
        height: u32,
        encoding: PixelEncoding,
        pixels: Vec<u8>,
        palette: Option<Rc<Palette>>,
    ) -> Result<Self, RasterError> {
        let row_stride = encoding.row_stride(width);
        let expected = (row_stride as usize).saturating_mul(height as usize);
        if pixels.len() != expected {
            return Err(RasterError::InvalidLayout {
                expected,
                actual: pixels.len(),
            });
        }
        if encoding.is_indexed() && palette.is_none() {
            return Err(RasterError::MissingPalette(encoding));
        }

        Ok(Self {
            width,
            height,
            encoding,
            row_stride,
            pixels,
            // Mono rasters never carry a palette
            palette: if encoding.is_indexed() { palette } else { None },
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The larger of width and height.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    pub fn row_stride(&self) -> u32 {
        self.row_stride
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn palette(&self) -> Option<&Rc<Palette>> {
        self.palette.as_ref()
    }

    /// Read one pixel of a `Mono1Bit` raster.
    pub fn bit(&self, x: u32, y: u32) -> bool {
        debug_assert_eq!(self.encoding, PixelEncoding::Mono1Bit);
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");

        let (byte_index, mask) = self.bit_position(x, y);
        self.pixels[byte_index] & mask != 0
    }

    /// Write one pixel of a `Mono1Bit` raster, leaving every other bit intact.
    pub fn set_bit(&mut self, x: u32, y: u32, on: bool) {
        debug_assert_eq!(self.encoding, PixelEncoding::Mono1Bit);
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");

        let (byte_index, mask) = self.bit_position(x, y);
        if on {
            self.pixels[byte_index] |= mask;
        } else {
            self.pixels[byte_index] &= !mask;
        }
    }

    /// Read the palette index of an `Indexed8Bit` pixel.
    pub fn index(&self, x: u32, y: u32) -> u8 {
        debug_assert_eq!(self.encoding, PixelEncoding::Indexed8Bit);
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");

        self.pixels[self.offset(y, x)]
    }

    pub fn set_index(&mut self, x: u32, y: u32, index: u8) {
        debug_assert_eq!(self.encoding, PixelEncoding::Indexed8Bit);
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");

        let offset = self.offset(y, x);
        self.pixels[offset] = index;
    }

    /// Decode any pixel to a color.
    ///
    /// Mono pixels map set bits to white. Indices missing from the palette
    /// decode as black.
    pub fn color_at(&self, x: u32, y: u32) -> Rgb888 {
        match self.encoding {
            PixelEncoding::Mono1Bit => {
                if self.bit(x, y) {
                    Rgb888::WHITE
                } else {
                    Rgb888::BLACK
                }
            }
            _ => {
                let index = self.packed_value(x, y);
                self.palette
                    .as_ref()
                    .and_then(|palette| palette.get(index))
                    .unwrap_or(Rgb888::BLACK)
            }
        }
    }

    /// Iterate over every pixel, translated so the raster's top-left corner
    /// lands on `origin`.
    pub fn pixels_at(&self, origin: Point) -> impl Iterator<Item = Pixel<Rgb888>> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| {
                Pixel(
                    origin + Point::new(x as i32, y as i32),
                    self.color_at(x, y),
                )
            })
        })
    }

    /// Buffer offset of byte `byte_in_row` of row `y`.
    fn offset(&self, y: u32, byte_in_row: u32) -> usize {
        y as usize * self.row_stride as usize + byte_in_row as usize
    }

    fn bit_position(&self, x: u32, y: u32) -> (usize, u8) {
        let byte_index = self.offset(y, x / 8);
        let mask = 0x80 >> (x % 8);
        (byte_index, mask)
    }

    /// Extract the raw value of a pixel in any packed encoding.
    fn packed_value(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");

        let bpp = self.encoding.bits_per_pixel();
        let bit_offset = u64::from(x) * u64::from(bpp);
        let byte = self.pixels[self.offset(y, (bit_offset / 8) as u32)];
        let shift = 8 - bpp - (bit_offset % 8) as u32;
        let mask = ((1u16 << bpp) - 1) as u8;
        (byte >> shift) & mask
    }
}
