//! # Built-in Icon Assets
//!
//! Stand-in for packaged bitmap resources: every icon is drawn once per fetch
//! with embedded-graphics primitives on a 28×28 canvas, larger than the
//! on-screen icon so the scaler always has work to do.
//!
//! - weather icons decode to `Indexed8Bit` with a two-entry palette shared by
//!   every icon of the same family
//! - battery icons decode to `Mono1Bit`
//!
//! Light-family icons are dark glyphs on white, dark-family icons the inverse.

use std::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, Polyline, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use crate::display::Framebuffer;
use crate::icons::{BatteryIcon, IconFamily, IconResource, WeatherCondition};
use crate::raster::{Palette, PixelEncoding, Raster, RasterError};

/// Side of every built-in icon.
pub const ASSET_SIZE: u32 = 28;

pub struct BuiltinAssets {
    light_palette: Rc<Palette>,
    dark_palette: Rc<Palette>,
}

impl Default for BuiltinAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinAssets {
    pub fn new() -> Self {
        BuiltinAssets {
            light_palette: Rc::new(Palette::new(vec![Rgb888::WHITE, Rgb888::BLACK])),
            dark_palette: Rc::new(Palette::new(vec![Rgb888::BLACK, Rgb888::WHITE])),
        }
    }

    /// Palette of a family: index 0 is the background, index 1 the glyph.
    pub fn palette(&self, family: IconFamily) -> &Rc<Palette> {
        match family {
            IconFamily::Light => &self.light_palette,
            IconFamily::Dark => &self.dark_palette,
        }
    }

    pub fn load(&self, resource: IconResource) -> Result<Raster, RasterError> {
        let family = resource.family();
        let (background, ink) = match family {
            IconFamily::Light => (Rgb888::WHITE, Rgb888::BLACK),
            IconFamily::Dark => (Rgb888::BLACK, Rgb888::WHITE),
        };

        let mut canvas = Framebuffer::new(ASSET_SIZE, ASSET_SIZE)?;
        canvas.fill(background == Rgb888::WHITE);

        let drawn = match resource {
            IconResource::Weather(condition, _) => draw_weather(&mut canvas, condition, ink),
            IconResource::Battery(icon, _) => draw_battery(&mut canvas, icon, ink),
        };
        if let Err(never) = drawn {
            match never {}
        }

        match resource {
            IconResource::Weather(..) => self.to_indexed(&canvas, family),
            IconResource::Battery(..) => Ok(canvas.into_raster()),
        }
    }

    fn to_indexed(&self, canvas: &Framebuffer, family: IconFamily) -> Result<Raster, RasterError> {
        let background_white = family == IconFamily::Light;
        let (width, height) = (canvas.width(), canvas.height());

        let mut pixels = Vec::new();
        let bytes = (width * height) as usize;
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| RasterError::AllocationFailed { bytes })?;
        for y in 0..height {
            for x in 0..width {
                pixels.push(u8::from(canvas.pixel(x, y) != background_white));
            }
        }

        Raster::from_parts(
            width,
            height,
            PixelEncoding::Indexed8Bit,
            pixels,
            Some(Rc::clone(self.palette(family))),
        )
    }
}

fn draw_weather(
    canvas: &mut Framebuffer,
    condition: WeatherCondition,
    ink: Rgb888,
) -> Result<(), Infallible> {
    let stroke = PrimitiveStyle::with_stroke(ink, 2);
    let fill = PrimitiveStyle::with_fill(ink);

    if condition == WeatherCondition::Sun {
        Circle::new(Point::new(8, 8), 12).into_styled(fill).draw(canvas)?;
        let rays = [
            ((14, 1), (14, 4)),
            ((14, 23), (14, 26)),
            ((1, 14), (4, 14)),
            ((23, 14), (26, 14)),
            ((5, 5), (7, 7)),
            ((21, 21), (23, 23)),
            ((5, 23), (7, 21)),
            ((21, 7), (23, 5)),
        ];
        for ((x0, y0), (x1, y1)) in rays {
            Line::new(Point::new(x0, y0), Point::new(x1, y1))
                .into_styled(stroke)
                .draw(canvas)?;
        }
        return Ok(());
    }

    draw_cloud(canvas, ink)?;
    match condition {
        WeatherCondition::Rain => {
            for x in [8, 14, 20] {
                Line::new(Point::new(x, 21), Point::new(x - 2, 26))
                    .into_styled(stroke)
                    .draw(canvas)?;
            }
        }
        WeatherCondition::Snow => {
            for (x, y) in [(5, 21), (12, 23), (19, 21)] {
                Circle::new(Point::new(x, y), 4).into_styled(fill).draw(canvas)?;
            }
        }
        WeatherCondition::Thunder => {
            let bolt = [
                Point::new(16, 18),
                Point::new(11, 23),
                Point::new(16, 23),
                Point::new(12, 27),
            ];
            Polyline::new(&bolt).into_styled(stroke).draw(canvas)?;
        }
        WeatherCondition::Cloud | WeatherCondition::Sun => {}
    }
    Ok(())
}

fn draw_cloud(canvas: &mut Framebuffer, ink: Rgb888) -> Result<(), Infallible> {
    let fill = PrimitiveStyle::with_fill(ink);
    Circle::new(Point::new(3, 9), 10).into_styled(fill).draw(canvas)?;
    Circle::new(Point::new(9, 4), 12).into_styled(fill).draw(canvas)?;
    Circle::new(Point::new(16, 8), 10).into_styled(fill).draw(canvas)?;
    Rectangle::new(Point::new(8, 12), Size::new(13, 7))
        .into_styled(fill)
        .draw(canvas)
}

fn draw_battery(canvas: &mut Framebuffer, icon: BatteryIcon, ink: Rgb888) -> Result<(), Infallible> {
    Rectangle::new(Point::new(2, 8), Size::new(21, 12))
        .into_styled(PrimitiveStyle::with_stroke(ink, 2))
        .draw(canvas)?;
    Rectangle::new(Point::new(23, 11), Size::new(3, 6))
        .into_styled(PrimitiveStyle::with_fill(ink))
        .draw(canvas)?;

    let level = match icon {
        BatteryIcon::Full => 15,
        BatteryIcon::Medium => 9,
        BatteryIcon::Low => 4,
        BatteryIcon::Warning => 0,
    };
    if level > 0 {
        Rectangle::new(Point::new(5, 11), Size::new(level, 6))
            .into_styled(PrimitiveStyle::with_fill(ink))
            .draw(canvas)?;
    } else {
        Text::with_baseline(
            "!",
            Point::new(10, 9),
            MonoTextStyle::new(&FONT_6X10, ink),
            Baseline::Top,
        )
        .draw(canvas)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::BatteryTier;

    fn all_resources() -> Vec<IconResource> {
        let conditions = [
            WeatherCondition::Sun,
            WeatherCondition::Cloud,
            WeatherCondition::Rain,
            WeatherCondition::Snow,
            WeatherCondition::Thunder,
        ];
        let batteries = [
            BatteryIcon::Full,
            BatteryIcon::Medium,
            BatteryIcon::Low,
            BatteryIcon::Warning,
        ];
        let mut resources = Vec::new();
        for family in [IconFamily::Light, IconFamily::Dark] {
            resources.extend(conditions.map(|c| IconResource::Weather(c, family)));
            resources.extend(batteries.map(|b| IconResource::Battery(b, family)));
        }
        resources
    }

    #[test]
    fn test_every_resource_loads() {
        let assets = BuiltinAssets::new();
        for resource in all_resources() {
            let raster = assets.load(resource).unwrap();
            assert_eq!(raster.size(), Size::new(ASSET_SIZE, ASSET_SIZE), "{}", resource);
        }
    }

    #[test]
    fn test_weather_icons_share_family_palette() {
        let assets = BuiltinAssets::new();
        let sun = assets
            .load(IconResource::Weather(WeatherCondition::Sun, IconFamily::Light))
            .unwrap();
        let rain = assets
            .load(IconResource::Weather(WeatherCondition::Rain, IconFamily::Light))
            .unwrap();
        assert_eq!(sun.encoding(), PixelEncoding::Indexed8Bit);
        assert!(Rc::ptr_eq(sun.palette().unwrap(), rain.palette().unwrap()));
        assert!(sun.pixels().iter().all(|&index| index <= 1));
    }

    #[test]
    fn test_families_are_inverse_of_each_other() {
        let assets = BuiltinAssets::new();
        let tier = BatteryTier::Good.icon();
        let light = assets.load(IconResource::Battery(tier, IconFamily::Light)).unwrap();
        let dark = assets.load(IconResource::Battery(tier, IconFamily::Dark)).unwrap();

        assert_eq!(light.encoding(), PixelEncoding::Mono1Bit);
        // Corner is background: white on light, black on dark
        assert_eq!(light.color_at(0, 0), Rgb888::WHITE);
        assert_eq!(dark.color_at(0, 0), Rgb888::BLACK);
        for y in 0..ASSET_SIZE {
            for x in 0..ASSET_SIZE {
                assert_ne!(light.bit(x, y), dark.bit(x, y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_glyphs_differ() {
        let assets = BuiltinAssets::new();
        let cloud = assets
            .load(IconResource::Weather(WeatherCondition::Cloud, IconFamily::Light))
            .unwrap();
        let snow = assets
            .load(IconResource::Weather(WeatherCondition::Snow, IconFamily::Light))
            .unwrap();
        assert_ne!(cloud.pixels(), snow.pixels());
        assert!(cloud.pixels().contains(&1));
    }
}
