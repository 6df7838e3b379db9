//! # Two-Fragment Line Layout
//!
//! A display line carries a *value* fragment (`03:41`, `72°F`, `85%`) and an
//! optional *qualifier* fragment (`PM`, `Clear`, `Great`) in a smaller font.
//! Both are measured at run time and placed as one horizontally centered group.
//!
//! ## Guarantees
//! - fragments never overlap
//! - the group never exceeds the line width
//! - the group is centered (floor division on the leftover space)
//! - a fragment that measures zero wide is hidden rather than given an empty box
//!
//! Placements are recomputed whenever the text changes; nothing is cached.

use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::text::{FontFace, TextExtent, TextMeasure};

/// Fonts and spacing for one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineStyle {
    pub value_font: FontFace,
    pub qualifier_font: FontFace,
    /// Horizontal space between the fragments when both are shown.
    pub gap: u32,
    /// How far the qualifier sits below the top of the value.
    pub qualifier_drop: i32,
}

/// Where the two fragments of a line are drawn. `None` means hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinePlacement {
    pub value: Option<Rectangle>,
    pub qualifier: Option<Rectangle>,
}

impl LinePlacement {
    pub const HIDDEN: LinePlacement = LinePlacement {
        value: None,
        qualifier: None,
    };

    pub fn is_hidden(&self) -> bool {
        self.value.is_none() && self.qualifier.is_none()
    }
}

/// Horizontal arrangement of two fragments in a line of known width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrangement {
    /// Offset of the group from the left edge of the line.
    pub start: u32,
    pub value_width: u32,
    pub gap: u32,
    pub qualifier_width: u32,
}

impl Arrangement {
    pub fn total_width(&self) -> u32 {
        self.value_width + self.gap + self.qualifier_width
    }

    pub fn qualifier_offset(&self) -> u32 {
        self.start + self.value_width + self.gap
    }
}

/// Arrange two measured widths in a line `width` pixels wide.
///
/// Each fragment is clamped to the line. If the group still does not fit, the
/// qualifier is cut to the space left after the value and gap; a qualifier cut
/// to nothing takes its gap with it.
pub fn arrange(width: u32, value_width: u32, qualifier_width: u32, gap: u32) -> Arrangement {
    let value_width = value_width.min(width);
    let mut qualifier_width = qualifier_width.min(width);
    let mut gap = if value_width > 0 && qualifier_width > 0 {
        gap
    } else {
        0
    };

    if value_width + gap + qualifier_width > width {
        qualifier_width = width.saturating_sub(value_width + gap);
        if qualifier_width == 0 {
            gap = 0;
        }
    }

    let total = value_width + gap + qualifier_width;
    Arrangement {
        start: (width - total) / 2,
        value_width,
        gap,
        qualifier_width,
    }
}

/// Measure `value` and `qualifier` and place them centered inside `bounds`.
pub fn layout_line<M>(
    measure: &M,
    bounds: Rectangle,
    style: &LineStyle,
    value: &str,
    qualifier: &str,
) -> LinePlacement
where
    M: TextMeasure + ?Sized,
{
    let value_extent = measure_fragment(measure, value, style.value_font, bounds.size);
    let qualifier_extent = measure_fragment(measure, qualifier, style.qualifier_font, bounds.size);

    let arrangement = arrange(
        bounds.size.width,
        value_extent.width,
        qualifier_extent.width,
        style.gap,
    );

    let origin = bounds.top_left;
    let value_rect = (arrangement.value_width > 0).then(|| {
        Rectangle::new(
            origin + Point::new(arrangement.start as i32, 0),
            Size::new(arrangement.value_width, value_extent.height),
        )
    });
    let qualifier_rect = (arrangement.qualifier_width > 0).then(|| {
        Rectangle::new(
            origin + Point::new(arrangement.qualifier_offset() as i32, style.qualifier_drop),
            Size::new(arrangement.qualifier_width, qualifier_extent.height),
        )
    });

    LinePlacement {
        value: value_rect,
        qualifier: qualifier_rect,
    }
}

fn measure_fragment<M>(measure: &M, text: &str, font: FontFace, bounds: Size) -> TextExtent
where
    M: TextMeasure + ?Sized,
{
    if text.is_empty() {
        return TextExtent::ZERO;
    }
    let extent = measure.measure_text(text, font, bounds);
    TextExtent {
        width: extent.width.min(bounds.width),
        height: extent.height.min(bounds.height),
    }
}
