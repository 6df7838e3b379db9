//! Fonts and text measurement.
//!
//! Layout code only ever sees [`TextExtent`]s produced through [`TextMeasure`],
//! so the fonts actually used to draw can be swapped without touching it.

use embedded_graphics::{
    mono_font::{iso_8859_1, MonoFont, MonoTextStyle},
    pixelcolor::{BinaryColor, Rgb888},
    prelude::*,
    text::{renderer::TextRenderer, Baseline},
};

/// Font faces used on the display, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Hour line
    Title,
    /// Minute words
    Heading,
    /// Secondary labels (period, condition, battery status, date)
    Body,
    /// Values next to an icon (temperature, percentage)
    BodyBold,
}

impl FontFace {
    pub fn font(self) -> &'static MonoFont<'static> {
        // ISO 8859-1 variants carry the degree sign
        match self {
            FontFace::Title => &iso_8859_1::FONT_10X20,
            FontFace::Heading => &iso_8859_1::FONT_9X18_BOLD,
            FontFace::Body => &iso_8859_1::FONT_6X10,
            FontFace::BodyBold => &iso_8859_1::FONT_6X13_BOLD,
        }
    }

    pub fn style<C: PixelColor>(self, color: C) -> MonoTextStyle<'static, C> {
        MonoTextStyle::new(self.font(), color)
    }
}

/// Rendered size of a string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

impl TextExtent {
    pub const ZERO: TextExtent = TextExtent {
        width: 0,
        height: 0,
    };

    pub fn is_empty(self) -> bool {
        self.width == 0
    }
}

/// Text measurement contract of the host toolkit.
pub trait TextMeasure {
    /// Size of `text` drawn in `font`, clamped to `bounds`. Empty text is
    /// [`TextExtent::ZERO`].
    fn measure_text(&self, text: &str, font: FontFace, bounds: Size) -> TextExtent;
}

/// Measurement backed by the embedded-graphics mono font metrics.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoMeasure;

impl TextMeasure for MonoMeasure {
    fn measure_text(&self, text: &str, font: FontFace, bounds: Size) -> TextExtent {
        if text.is_empty() {
            return TextExtent::ZERO;
        }

        let metrics = font
            .style(BinaryColor::On)
            .measure_string(text, Point::zero(), Baseline::Top);
        let size = metrics.bounding_box.size;

        TextExtent {
            width: size.width.min(bounds.width),
            height: size.height.min(bounds.height),
        }
    }
}

/// Drawing color for text on a given card color.
pub fn ink_for(card: Rgb888) -> Rgb888 {
    if crate::display::is_light(card) {
        Rgb888::BLACK
    } else {
        Rgb888::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_measures_zero() {
        let extent = MonoMeasure.measure_text("", FontFace::Title, Size::new(100, 40));
        assert_eq!(extent, TextExtent::ZERO);
        assert!(extent.is_empty());
    }

    #[test]
    fn test_measurement_follows_font_metrics() {
        let extent = MonoMeasure.measure_text("12:34", FontFace::Title, Size::new(200, 40));
        assert_eq!(extent.width, 5 * 10);
        assert_eq!(extent.height, 20);

        let body = MonoMeasure.measure_text("72°F", FontFace::Body, Size::new(200, 40));
        assert_eq!(body.width, 4 * 6);
    }

    #[test]
    fn test_measurement_is_clamped_to_bounds() {
        let extent =
            MonoMeasure.measure_text("FORTY SEVEN", FontFace::Heading, Size::new(60, 10));
        assert_eq!(extent.width, 60);
        assert_eq!(extent.height, 10);
    }

    #[test]
    fn test_ink_contrasts_with_card() {
        assert_eq!(ink_for(Rgb888::WHITE), Rgb888::BLACK);
        assert_eq!(ink_for(Rgb888::BLACK), Rgb888::WHITE);
    }
}
