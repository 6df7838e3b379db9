//! # Screen Geometry
//!
//! Fixed frames for every element of the watchface, derived from the surface
//! size. Constants are authored for the 144-px-wide platform and scaled by
//! `v * 200 / 144` on the 200-px-wide one.
//!
//! ```text
//! ┌──────────────── margin ────────────────┐
//! │  ┌──────────── card ────────────────┐  │
//! │  │        hour / HH:MM  [AM]         │  │
//! │  │           minute words            │  │
//! │  │               PM                  │  │
//! │  │  [icon]  72°F  Clear              │  │
//! │  │  [icon]  85%   Great              │  │
//! │  │      Friday, November 8th         │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```

use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::layout::LineStyle;
use crate::text::FontFace;

/// Width of the large platform, where every constant is scaled up.
pub const LARGE_WIDTH: u32 = 200;
const BASE_WIDTH: u32 = 144;

/// Scale a layout constant for a surface `width` pixels wide.
pub fn scaled(value: u32, width: u32) -> u32 {
    if width == LARGE_WIDTH {
        value * LARGE_WIDTH / BASE_WIDTH
    } else {
        value
    }
}

/// Every frame and style the renderer and handlers need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub size: Size,
    pub card: Rectangle,
    pub corner_radius: u32,
    /// Line holding the hour (word mode) or the full `HH:MM` (numeric mode).
    pub time_line: Rectangle,
    pub minute_frame: Rectangle,
    pub period_frame: Rectangle,
    pub weather_icon: Rectangle,
    pub weather_line: Rectangle,
    pub battery_icon: Rectangle,
    pub battery_line: Rectangle,
    pub date_frame: Rectangle,
    /// Largest side of a scaled icon.
    pub icon_size: u32,
    pub time_style: LineStyle,
    pub row_style: LineStyle,
}

impl ScreenLayout {
    pub fn for_size(size: Size) -> Self {
        let width = size.width;
        let s = |v: u32| scaled(v, width);
        let si = |v: u32| scaled(v, width) as i32;

        let margin = s(10);
        let inset = s(15);
        let top_inset = s(15);
        let content_x = (margin + inset) as i32;
        let content_width = width.saturating_sub(2 * margin + 2 * inset);
        let icon_size = s(20);

        let card = Rectangle::new(
            Point::new(margin as i32, margin as i32),
            Size::new(
                width.saturating_sub(2 * margin),
                size.height.saturating_sub(2 * margin),
            ),
        );

        let time_y = (margin + top_inset) as i32;
        let time_line = Rectangle::new(
            Point::new(content_x, time_y),
            Size::new(content_width, s(26)),
        );
        let minute_frame = Rectangle::new(
            Point::new(content_x, time_y + si(26)),
            Size::new(content_width, s(20)),
        );
        let period_frame = Rectangle::new(
            Point::new(content_x, time_y + si(46)),
            Size::new(content_width, s(12)),
        );

        let weather_y = time_y + si(62);
        let battery_y = weather_y + si(22);
        let date_y = battery_y + si(22);

        let row_text_x = content_x + icon_size as i32 + si(5);
        let row_text_width = (content_x + content_width as i32 - row_text_x).max(0) as u32;

        let weather_icon = Rectangle::new(
            Point::new(content_x, weather_y),
            Size::new(icon_size, icon_size),
        );
        let weather_line = Rectangle::new(
            Point::new(row_text_x, weather_y + si(2)),
            Size::new(row_text_width, s(18)),
        );
        let battery_icon = Rectangle::new(
            Point::new(content_x, battery_y),
            Size::new(icon_size, icon_size),
        );
        let battery_line = Rectangle::new(
            Point::new(row_text_x, battery_y + si(2)),
            Size::new(row_text_width, s(18)),
        );
        let date_frame = Rectangle::new(
            Point::new(content_x, date_y),
            Size::new(content_width, s(12)),
        );

        ScreenLayout {
            size,
            card,
            corner_radius: s(8),
            time_line,
            minute_frame,
            period_frame,
            weather_icon,
            weather_line,
            battery_icon,
            battery_line,
            date_frame,
            icon_size,
            time_style: LineStyle {
                value_font: FontFace::Title,
                qualifier_font: FontFace::Body,
                gap: s(4),
                qualifier_drop: si(8),
            },
            row_style: LineStyle {
                value_font: FontFace::BodyBold,
                qualifier_font: FontFace::Body,
                gap: s(4),
                qualifier_drop: si(2),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(inner: &Rectangle, outer: &Rectangle) -> bool {
        let (Some(inner_br), Some(outer_br)) = (inner.bottom_right(), outer.bottom_right()) else {
            return false;
        };
        inner.top_left.x >= outer.top_left.x
            && inner.top_left.y >= outer.top_left.y
            && inner_br.x <= outer_br.x
            && inner_br.y <= outer_br.y
    }

    #[test]
    fn test_constants_scale_only_on_large_platform() {
        assert_eq!(scaled(10, 144), 10);
        assert_eq!(scaled(10, 200), 13);
        assert_eq!(scaled(72, 200), 100);
        assert_eq!(scaled(20, 168), 20);
    }

    #[test]
    fn test_small_platform_frames_fit_the_card() {
        let screen = ScreenLayout::for_size(Size::new(144, 168));
        assert_eq!(screen.card, Rectangle::new(Point::new(10, 10), Size::new(124, 148)));
        assert_eq!(screen.time_line.top_left, Point::new(25, 25));
        assert_eq!(screen.time_line.size.width, 94);
        assert_eq!(screen.icon_size, 20);
        assert_eq!(screen.weather_line.top_left.x, 25 + 20 + 5);
        assert_eq!(screen.weather_line.size.width, 94 - 25);

        for frame in [
            screen.time_line,
            screen.minute_frame,
            screen.period_frame,
            screen.weather_icon,
            screen.weather_line,
            screen.battery_icon,
            screen.battery_line,
            screen.date_frame,
        ] {
            assert!(inside(&frame, &screen.card), "{:?} outside card", frame);
        }
    }

    #[test]
    fn test_large_platform_frames_fit_the_card() {
        let screen = ScreenLayout::for_size(Size::new(200, 228));
        assert_eq!(screen.icon_size, 27);
        assert_eq!(screen.corner_radius, 11);
        assert_eq!(screen.time_line.top_left, Point::new(33, 33));
        for frame in [screen.time_line, screen.weather_line, screen.date_frame] {
            assert!(inside(&frame, &screen.card), "{:?} outside card", frame);
        }
    }

    #[test]
    fn test_time_starts_below_the_card_top() {
        for (size, top_inset) in [(Size::new(144, 168), 15), (Size::new(200, 228), 20)] {
            let screen = ScreenLayout::for_size(size);
            assert_eq!(
                screen.time_line.top_left.y,
                screen.card.top_left.y + top_inset,
                "{:?}",
                size
            );
        }
    }

    #[test]
    fn test_rows_do_not_overlap() {
        let screen = ScreenLayout::for_size(Size::new(144, 168));
        let bottom = |r: &Rectangle| r.top_left.y + r.size.height as i32;
        assert!(bottom(&screen.period_frame) <= screen.weather_icon.top_left.y);
        assert!(bottom(&screen.weather_icon) <= screen.battery_icon.top_left.y);
        assert!(bottom(&screen.battery_line) <= screen.date_frame.top_left.y + 2);
    }
}
