//! # Nearest-Neighbour Bitmap Scaling
//!
//! Icons are shipped larger than the slot they are drawn in and are shrunk at
//! run time, directly on their packed pixel data. There is no intermediate
//! floating point image: every coordinate is computed with integer division.
//!
//! ## Sampling
//!
//! For a destination pixel `(x, y)` the source pixel is
//! `(x * src_w / dst_w, y * src_h / dst_h)`, each axis on its own. Rows and
//! columns may therefore map many-to-one independently.
//!
//! ## Failure Policy
//!
//! Scaling never fails. When the destination cannot be allocated, or the
//! source uses an encoding this module does not sample, the source comes back
//! untouched and [`Scaled::outcome`] says why. A full-size icon beats no icon.

use std::rc::Rc;

use embedded_graphics::prelude::Size;
use log::{debug, warn};

use crate::raster::{Palette, PixelEncoding, Raster, RasterError};

/// How a [`scale`] call produced its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// A new, smaller raster was allocated and filled.
    Resized,
    /// The source already fit; it is returned as-is.
    WithinBounds,
    /// The destination buffer could not be allocated; the source is returned.
    AllocationFailed,
    /// The source encoding is not sampled by the scaler; the source is returned.
    UnsupportedEncoding,
}

impl ScaleOutcome {
    /// True when the result is the source because something went wrong.
    pub fn used_fallback(self) -> bool {
        matches!(
            self,
            ScaleOutcome::AllocationFailed | ScaleOutcome::UnsupportedEncoding
        )
    }
}

/// Result of a scale request.
///
/// The scaler takes the source by value but never drops it: after a resize the
/// original is handed back next to the new raster, and the caller decides when
/// it is released. For every other outcome the result *is* the source buffer.
#[derive(Debug)]
pub struct Scaled {
    raster: Raster,
    source: Option<Raster>,
    outcome: ScaleOutcome,
}

impl Scaled {
    fn passthrough(source: Raster, outcome: ScaleOutcome) -> Self {
        Self {
            raster: source,
            source: None,
            outcome,
        }
    }

    pub fn outcome(&self) -> ScaleOutcome {
        self.outcome
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// The original raster, present only after a resize.
    pub fn source(&self) -> Option<&Raster> {
        self.source.as_ref()
    }

    /// Split into the result and, after a resize, the original.
    pub fn into_parts(self) -> (Raster, Option<Raster>) {
        (self.raster, self.source)
    }

    /// Keep only the result, releasing the original if one was handed back.
    pub fn into_raster(self) -> Raster {
        let (raster, source) = self.into_parts();
        drop(source);
        raster
    }
}

/// Destination size for a source of `width × height` bounded by
/// `max_dimension`, or `None` if the source already fits.
///
/// `max_dimension` is clamped to at least 1, and both results are floored and
/// clamped to at least 1.
pub fn target_size(width: u32, height: u32, max_dimension: u32) -> Option<Size> {
    let max_dimension = max_dimension.max(1);
    let longest = width.max(height);
    if longest <= max_dimension {
        return None;
    }

    let scale_axis = |axis: u32| -> u32 {
        let scaled = u64::from(axis) * u64::from(max_dimension) / u64::from(longest);
        (scaled as u32).max(1)
    };

    Some(Size::new(scale_axis(width), scale_axis(height)))
}

/// Shrink `source` so neither side exceeds `max_dimension`.
///
/// Uses [`Raster::blank`] to create the destination.
pub fn scale(source: Raster, max_dimension: u32) -> Scaled {
    scale_with(source, max_dimension, Raster::blank)
}

/// [`scale`] with a caller-supplied blank raster constructor.
///
/// The constructor receives the target size, the source encoding and the
/// source palette (shared, not copied).
pub fn scale_with<F>(source: Raster, max_dimension: u32, create_blank: F) -> Scaled
where
    F: FnOnce(Size, PixelEncoding, Option<Rc<Palette>>) -> Result<Raster, RasterError>,
{
    let Some(target) = target_size(source.width(), source.height(), max_dimension) else {
        return Scaled::passthrough(source, ScaleOutcome::WithinBounds);
    };

    let sampler: fn(&Raster, &mut Raster) = match source.encoding() {
        PixelEncoding::Mono1Bit => sample_mono,
        PixelEncoding::Indexed8Bit => sample_indexed,
        PixelEncoding::Indexed2Bit | PixelEncoding::Indexed4Bit => {
            warn!(
                "Not scaling {:?} raster ({}x{}), drawing unscaled",
                source.encoding(),
                source.width(),
                source.height()
            );
            return Scaled::passthrough(source, ScaleOutcome::UnsupportedEncoding);
        }
    };

    let mut destination = match create_blank(target, source.encoding(), source.palette().cloned())
    {
        Ok(raster) => raster,
        Err(error) => {
            warn!("Icon scaling fell back to the unscaled source: {}", error);
            return Scaled::passthrough(source, ScaleOutcome::AllocationFailed);
        }
    };

    sampler(&source, &mut destination);

    debug!(
        "Scaled {:?} raster {}x{} -> {}x{}",
        source.encoding(),
        source.width(),
        source.height(),
        destination.width(),
        destination.height()
    );

    Scaled {
        raster: destination,
        source: Some(source),
        outcome: ScaleOutcome::Resized,
    }
}

/// Source coordinate for a destination coordinate along one axis.
fn source_coordinate(destination: u32, source_len: u32, destination_len: u32) -> u32 {
    // destination < destination_len, so the quotient is below source_len
    (u64::from(destination) * u64::from(source_len) / u64::from(destination_len)) as u32
}

fn sample_mono(source: &Raster, destination: &mut Raster) {
    let (src_w, src_h) = (source.width(), source.height());
    let (dst_w, dst_h) = (destination.width(), destination.height());

    for y in 0..dst_h {
        let sy = source_coordinate(y, src_h, dst_h);
        for x in 0..dst_w {
            let sx = source_coordinate(x, src_w, dst_w);
            // Destination starts zeroed, so only set bits need writing
            if source.bit(sx, sy) {
                destination.set_bit(x, y, true);
            }
        }
    }
}

fn sample_indexed(source: &Raster, destination: &mut Raster) {
    let (src_w, src_h) = (source.width(), source.height());
    let (dst_w, dst_h) = (destination.width(), destination.height());

    for y in 0..dst_h {
        let sy = source_coordinate(y, src_h, dst_h);
        for x in 0..dst_w {
            let sx = source_coordinate(x, src_w, dst_w);
            destination.set_index(x, y, source.index(sx, sy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

    fn checkerboard(width: u32, height: u32) -> Raster {
        let mut raster = Raster::blank(Size::new(width, height), PixelEncoding::Mono1Bit, None)
            .unwrap();
        for y in 0..height {
            for x in 0..width {
                raster.set_bit(x, y, (x + y) % 2 == 0);
            }
        }
        raster
    }

    fn palette() -> Rc<Palette> {
        Rc::new(Palette::new(vec![
            Rgb888::WHITE,
            Rgb888::BLACK,
            Rgb888::RED,
        ]))
    }

    #[test]
    fn test_source_within_bounds_is_returned_as_is() {
        let source = checkerboard(14, 10);
        let buffer = source.pixels().as_ptr();

        let scaled = scale(source, 14);
        assert_eq!(scaled.outcome(), ScaleOutcome::WithinBounds);
        assert!(scaled.source().is_none());
        assert_eq!(scaled.raster().pixels().as_ptr(), buffer);
        assert_eq!(scaled.raster().size(), Size::new(14, 10));

        let scaled = scale(scaled.into_raster(), 100);
        assert_eq!(scaled.raster().pixels().as_ptr(), buffer);
    }

    #[test]
    fn test_target_size_floors_each_axis() {
        assert_eq!(target_size(28, 28, 20), Some(Size::new(20, 20)));
        assert_eq!(target_size(28, 14, 20), Some(Size::new(20, 10)));
        // 25 * 20 / 28 = 17.86 -> 17
        assert_eq!(target_size(25, 28, 20), Some(Size::new(17, 20)));
        assert_eq!(target_size(20, 10, 20), None);
    }

    #[test]
    fn test_target_size_clamps_to_one_pixel() {
        // 3 * 10 / 100 = 0 -> 1
        assert_eq!(target_size(3, 100, 10), Some(Size::new(1, 10)));
    }

    #[test]
    fn test_zero_max_dimension_is_treated_as_one() {
        assert_eq!(target_size(5, 3, 0), Some(Size::new(1, 1)));

        let scaled = scale(checkerboard(5, 3), 0);
        assert_eq!(scaled.outcome(), ScaleOutcome::Resized);
        assert_eq!(scaled.raster().size(), Size::new(1, 1));
        // Pixel (0, 0) of the checkerboard is set
        assert!(scaled.raster().bit(0, 0));
    }

    #[test]
    fn test_mono_nearest_neighbour_sampling() {
        let mut source = Raster::blank(Size::new(4, 4), PixelEncoding::Mono1Bit, None).unwrap();
        source.set_bit(0, 0, true);
        source.set_bit(3, 0, true);
        source.set_bit(2, 2, true);

        let scaled = scale(source, 2);
        assert_eq!(scaled.outcome(), ScaleOutcome::Resized);
        let result = scaled.raster();
        assert_eq!(result.size(), Size::new(2, 2));

        // Destination (x, y) samples source (2x, 2y)
        assert!(result.bit(0, 0));
        assert!(!result.bit(1, 0));
        assert!(!result.bit(0, 1));
        assert!(result.bit(1, 1));
        assert_eq!(
            result.pixels().len(),
            (result.row_stride() * result.height()) as usize
        );
    }

    #[test]
    fn test_mono_rows_keep_padding_clear() {
        let source = checkerboard(40, 40);
        let scaled = scale(source, 13);
        let result = scaled.raster();
        assert_eq!(result.size(), Size::new(13, 13));
        assert_eq!(result.row_stride(), 2);

        // Bits 13..16 of each row are padding and must stay zero
        for row in result.pixels().chunks(2) {
            assert_eq!(row[1] & 0b0000_0111, 0);
        }
    }

    #[test]
    fn test_very_wide_source_samples_without_overflow() {
        let mut source =
            Raster::blank(Size::new(70_000, 1), PixelEncoding::Mono1Bit, None).unwrap();
        source.set_bit(0, 0, true);
        source.set_bit(69_998, 0, true);

        let scaled = scale(source, 69_999);
        assert_eq!(scaled.outcome(), ScaleOutcome::Resized);

        let result = scaled.raster();
        assert_eq!(result.size(), Size::new(69_999, 1));
        assert!(result.bit(0, 0));
        assert!(result.bit(69_998, 0));
        let set = (0..result.width()).filter(|&x| result.bit(x, 0)).count();
        assert_eq!(set, 2);
    }

    #[test]
    fn test_indexed_copies_indices_and_shares_palette() {
        let palette = palette();
        let mut source = Raster::blank(
            Size::new(6, 3),
            PixelEncoding::Indexed8Bit,
            Some(Rc::clone(&palette)),
        )
        .unwrap();
        for x in 0..6 {
            source.set_index(x, 0, x as u8 % 3);
            source.set_index(x, 2, 2);
        }

        let scaled = scale(source, 3);
        assert_eq!(scaled.outcome(), ScaleOutcome::Resized);
        let result = scaled.raster();
        assert_eq!(result.size(), Size::new(3, 1));
        assert!(Rc::ptr_eq(result.palette().unwrap(), &palette));

        // Source columns 0, 2, 4 of row 0
        assert_eq!(result.index(0, 0), 0);
        assert_eq!(result.index(1, 0), 2);
        assert_eq!(result.index(2, 0), 1);
    }

    #[test]
    fn test_resize_hands_back_untouched_source() {
        let source = checkerboard(8, 8);
        let original: Vec<u8> = source.pixels().to_vec();

        let (result, source) = scale(source, 4).into_parts();
        let source = source.expect("resize returns the original");
        assert_eq!(source.pixels(), &original[..]);
        assert_eq!(result.size(), Size::new(4, 4));
    }

    #[test]
    fn test_unsupported_encoding_passes_through() {
        let source = Raster::from_parts(
            8,
            8,
            PixelEncoding::Indexed4Bit,
            vec![0x12; 32],
            Some(palette()),
        )
        .unwrap();
        let buffer = source.pixels().as_ptr();

        let scaled = scale(source, 4);
        assert_eq!(scaled.outcome(), ScaleOutcome::UnsupportedEncoding);
        assert!(scaled.outcome().used_fallback());
        assert_eq!(scaled.raster().pixels().as_ptr(), buffer);
        assert_eq!(scaled.raster().size(), Size::new(8, 8));
    }

    #[test]
    fn test_allocation_failure_returns_source() {
        let source = checkerboard(28, 28);
        let buffer = source.pixels().as_ptr();

        let scaled = scale_with(source, 20, |size, _, _| {
            Err(RasterError::AllocationFailed {
                bytes: (size.width.div_ceil(8) * size.height) as usize,
            })
        });

        assert_eq!(scaled.outcome(), ScaleOutcome::AllocationFailed);
        assert!(scaled.outcome().used_fallback());
        assert!(scaled.source().is_none());
        assert_eq!(scaled.raster().pixels().as_ptr(), buffer);
    }

    #[test]
    fn test_proportional_dimensions_grid() {
        for &(w, h, d) in &[(28u32, 28u32, 20u32), (30, 7, 9), (7, 30, 9), (100, 1, 3)] {
            let scaled = scale(checkerboard(w, h), d);
            let longest = w.max(h);
            let size = scaled.raster().size();
            assert_eq!(size.width, (w * d / longest).max(1));
            assert_eq!(size.height, (h * d / longest).max(1));
        }
    }
}
