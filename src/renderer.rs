//! # Watchface Rendering
//!
//! Paints a [`RenderState`] onto any embedded-graphics `DrawTarget<Color = Rgb888>`.
//! It also offers a development mode that renders into a 1-bit [`Framebuffer`]
//! and prints it as ASCII.
//!
//! ## Draw order
//! 1. background (black, white when inverted)
//! 2. rounded card (white, black when inverted, theme color on color displays)
//! 3. time: the two-fragment time line, then the minute and period frames in word mode
//! 4. weather and battery rows: icon, then the two-fragment line
//! 5. date
//!
//! Text is clipped to its placement rectangle, so a qualifier cut short by the
//! layout is cut short on screen too. The draw pass reads the state and never
//! changes it.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle, RoundedRectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::display::Framebuffer;
use crate::layout::{LinePlacement, LineStyle};
use crate::raster::{Raster, RasterError};
use crate::settings::Settings;
use crate::state::RenderState;
use crate::text::{ink_for, FontFace};

/// Colors of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Rgb888,
    pub card: Rgb888,
    pub ink: Rgb888,
}

impl ColorScheme {
    /// Themes only apply on color displays and never while inverted.
    pub fn for_settings(settings: &Settings, color_display: bool) -> Self {
        let (background, mut card) = if settings.invert_colors {
            (Rgb888::WHITE, Rgb888::BLACK)
        } else {
            (Rgb888::BLACK, Rgb888::WHITE)
        };

        if color_display && !settings.invert_colors {
            if let Some(theme) = settings.color_theme.card_color() {
                card = theme;
            }
        }

        ColorScheme {
            background,
            card,
            ink: ink_for(card),
        }
    }
}

/// Render the whole watchface.
pub fn draw<D>(state: &RenderState, display: &mut D, color_display: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let screen = &state.screen;
    let texts = &state.texts;
    let settings = &state.settings;
    let scheme = ColorScheme::for_settings(settings, color_display);

    display.clear(scheme.background)?;
    RoundedRectangle::with_equal_corners(
        screen.card,
        Size::new(screen.corner_radius, screen.corner_radius),
    )
    .into_styled(PrimitiveStyle::with_fill(scheme.card))
    .draw(display)?;

    draw_line(
        display,
        &state.placements.time,
        &screen.time_style,
        &texts.hour,
        &texts.period,
        scheme.ink,
    )?;
    if !settings.time_format().is_numeric() {
        draw_centered(display, screen.minute_frame, FontFace::Heading, &texts.minute, scheme.ink)?;
        draw_centered(display, screen.period_frame, FontFace::Body, &texts.period, scheme.ink)?;
    }

    if settings.show_weather {
        if let Some(icon) = state.weather_icon() {
            draw_icon(display, screen.weather_icon, icon)?;
        }
        draw_line(
            display,
            &state.placements.weather,
            &screen.row_style,
            &texts.temperature,
            &texts.condition,
            scheme.ink,
        )?;
    }

    if settings.show_battery {
        if let Some(icon) = state.battery_icon() {
            draw_icon(display, screen.battery_icon, icon)?;
        }
        draw_line(
            display,
            &state.placements.battery,
            &screen.row_style,
            &texts.battery_percent,
            &texts.battery_status,
            scheme.ink,
        )?;
    }

    if settings.show_date {
        draw_centered(display, screen.date_frame, FontFace::Body, &texts.date, scheme.ink)?;
    }

    Ok(())
}

fn draw_line<D>(
    display: &mut D,
    placement: &LinePlacement,
    style: &LineStyle,
    value: &str,
    qualifier: &str,
    ink: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if let Some(rect) = placement.value {
        draw_clipped(display, rect, style.value_font, value, ink)?;
    }
    if let Some(rect) = placement.qualifier {
        draw_clipped(display, rect, style.qualifier_font, qualifier, ink)?;
    }
    Ok(())
}

fn draw_clipped<D>(
    display: &mut D,
    rect: Rectangle,
    font: FontFace,
    text: &str,
    ink: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let mut clipped = display.clipped(&rect);
    Text::with_baseline(text, rect.top_left, font.style(ink), Baseline::Top).draw(&mut clipped)?;
    Ok(())
}

/// Single-fragment text centered in a fixed frame.
fn draw_centered<D>(
    display: &mut D,
    frame: Rectangle,
    font: FontFace,
    text: &str,
    ink: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if text.is_empty() {
        return Ok(());
    }
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    let position = Point::new(frame.center().x, frame.top_left.y);

    let mut clipped = display.clipped(&frame);
    Text::with_text_style(text, position, font.style(ink), text_style).draw(&mut clipped)?;
    Ok(())
}

fn draw_icon<D>(display: &mut D, frame: Rectangle, icon: &Raster) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let dx = frame.size.width.saturating_sub(icon.width()) / 2;
    let dy = frame.size.height.saturating_sub(icon.height()) / 2;
    let origin = frame.top_left + Point::new(dx as i32, dy as i32);

    display.clipped(&frame).draw_iter(icon.pixels_at(origin))
}

/// Render into a fresh 1-bit framebuffer sized to the state's screen.
pub fn render_framebuffer(state: &RenderState) -> Result<Framebuffer, RasterError> {
    let size = state.screen.size;
    let mut framebuffer = Framebuffer::new(size.width, size.height)?;
    if let Err(never) = draw(state, &mut framebuffer, false) {
        match never {}
    }
    Ok(framebuffer)
}

/// Development mode: print the current frame as ASCII.
pub fn draw_ascii(state: &RenderState) -> Result<(), RasterError> {
    let framebuffer = render_framebuffer(state)?;
    print!("{}", framebuffer.to_ascii());
    Ok(())
}

/// One line per visible field, for logs.
pub fn text_summary(state: &RenderState) -> String {
    let texts = &state.texts;
    let settings = &state.settings;
    let mut lines = Vec::new();

    let time = [texts.hour.as_str(), texts.minute.as_str(), texts.period.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!("time:    {}", time));
    if settings.show_weather {
        lines.push(format!("weather: {} {}", texts.temperature, texts.condition));
    }
    if settings.show_battery {
        lines.push(format!(
            "battery: {} {}",
            texts.battery_percent, texts.battery_status
        ));
    }
    if settings.show_date {
        lines.push(format!("date:    {}", texts.date));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelEncoding;
    use crate::settings::ColorTheme;
    use crate::text::MonoMeasure;
    use embedded_graphics::mock_display::MockDisplay;

    fn sample_state() -> RenderState {
        let mut state = RenderState::new(Size::new(144, 168));
        state.texts.hour = "THREE".to_string();
        state.texts.minute = "FORTY ONE".to_string();
        state.texts.period = "PM".to_string();
        state.texts.temperature = "72°F".to_string();
        state.texts.condition = "Clear".to_string();
        state.texts.battery_percent = "85%".to_string();
        state.texts.battery_status = "Great".to_string();
        state.texts.date = "Friday, November 8th".to_string();
        state.relayout(&MonoMeasure);
        state
    }

    fn ink_in(framebuffer: &Framebuffer, rect: Rectangle) -> usize {
        rect.points()
            .filter(|p| !framebuffer.pixel(p.x as u32, p.y as u32))
            .count()
    }

    #[test]
    fn test_color_scheme() {
        let mut settings = Settings::default();
        let plain = ColorScheme::for_settings(&settings, true);
        assert_eq!(plain.background, Rgb888::BLACK);
        assert_eq!(plain.card, Rgb888::WHITE);
        assert_eq!(plain.ink, Rgb888::BLACK);

        settings.color_theme = ColorTheme::Blue;
        let blue = ColorScheme::for_settings(&settings, true);
        assert_eq!(blue.card, Rgb888::new(0, 0, 0xFF));
        assert_eq!(blue.ink, Rgb888::WHITE);
        // Monochrome displays ignore the theme
        assert_eq!(ColorScheme::for_settings(&settings, false).card, Rgb888::WHITE);

        settings.invert_colors = true;
        let inverted = ColorScheme::for_settings(&settings, true);
        assert_eq!(inverted.background, Rgb888::WHITE);
        assert_eq!(inverted.card, Rgb888::BLACK);
        assert_eq!(inverted.ink, Rgb888::WHITE);
    }

    #[test]
    fn test_card_is_drawn_inside_background() {
        let state = sample_state();
        let framebuffer = render_framebuffer(&state).unwrap();

        // Corners are background, card middle edge is card
        assert!(!framebuffer.pixel(0, 0));
        assert!(!framebuffer.pixel(143, 167));
        assert!(framebuffer.pixel(72, 11));
        assert!(framebuffer.pixel(11, 84));
    }

    #[test]
    fn test_text_lands_in_placements() {
        let state = sample_state();
        let framebuffer = render_framebuffer(&state).unwrap();

        let time = state.placements.time.value.unwrap();
        assert!(ink_in(&framebuffer, time) > 0, "hour text not drawn");
        let weather = state.placements.weather.qualifier.unwrap();
        assert!(ink_in(&framebuffer, weather) > 0, "condition not drawn");
        assert!(ink_in(&framebuffer, state.screen.date_frame) > 0, "date not drawn");
    }

    #[test]
    fn test_hidden_sections_are_not_drawn() {
        let mut state = sample_state();
        state.settings.show_weather = false;
        state.settings.show_date = false;
        let framebuffer = render_framebuffer(&state).unwrap();

        assert_eq!(ink_in(&framebuffer, state.screen.weather_line), 0);
        assert_eq!(ink_in(&framebuffer, state.screen.date_frame), 0);
    }

    #[test]
    fn test_icon_is_drawn_in_its_frame() {
        let mut state = sample_state();
        let mut icon = Raster::blank(Size::new(20, 20), PixelEncoding::Mono1Bit, None).unwrap();
        // A white icon with one black pixel in the middle
        for y in 0..20 {
            for x in 0..20 {
                icon.set_bit(x, y, !(x == 10 && y == 10));
            }
        }
        state.install_weather_icon(icon);
        let framebuffer = render_framebuffer(&state).unwrap();

        let frame = state.screen.weather_icon;
        assert_eq!(ink_in(&framebuffer, frame), 1);
        let p = frame.top_left + Point::new(10, 10);
        assert!(!framebuffer.pixel(p.x as u32, p.y as u32));
    }

    #[test]
    fn test_inverted_frame_swaps_colors() {
        let mut state = sample_state();
        state.settings.invert_colors = true;
        let framebuffer = render_framebuffer(&state).unwrap();
        assert!(framebuffer.pixel(0, 0));
        assert!(!framebuffer.pixel(72, 11));
    }

    #[test]
    fn test_draws_on_mock_display() {
        let state = sample_state();
        let mut display = MockDisplay::<Rgb888>::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);

        draw(&state, &mut display, true).unwrap();

        assert_eq!(display.get_pixel(Point::new(5, 5)), Some(Rgb888::BLACK));
        assert_eq!(display.get_pixel(Point::new(30, 12)), Some(Rgb888::WHITE));

        // Inside the card, black pixels can only be the hour text
        let ink = Rectangle::new(Point::new(18, 18), Size::new(46, 46))
            .points()
            .filter(|p| display.get_pixel(*p) == Some(Rgb888::BLACK))
            .count();
        assert!(ink > 0, "hour text was not drawn on the card");
    }

    #[test]
    fn test_summary_lists_visible_fields() {
        let mut state = sample_state();
        let summary = text_summary(&state);
        assert!(summary.contains("THREE FORTY ONE PM"));
        assert!(summary.contains("72°F Clear"));
        assert!(summary.contains("Friday, November 8th"));

        state.settings.show_battery = false;
        assert!(!text_summary(&state).contains("85%"));
    }
}
