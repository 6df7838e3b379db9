//! User settings pushed by the companion.

use embedded_graphics::pixelcolor::Rgb888;
use log::warn;

use crate::icons::IconFamily;

/// How the time is spelled out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFormat {
    Words,
    TwelveHour,
    TwentyFourHour,
}

impl TimeFormat {
    /// Decode a `TimeFormat` value: 0 words, 2 24-hour, anything else 12-hour.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => TimeFormat::Words,
            2 => TimeFormat::TwentyFourHour,
            1 => TimeFormat::TwelveHour,
            unknown => {
                warn!("Unknown time format {}, using 12-hour", unknown);
                TimeFormat::TwelveHour
            }
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TimeFormat::Words => 0,
            TimeFormat::TwelveHour => 1,
            TimeFormat::TwentyFourHour => 2,
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, TimeFormat::Words)
    }
}

/// Card accent colors for color displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorTheme {
    #[default]
    Default,
    Blue,
    Red,
    Green,
    Purple,
    Orange,
    Teal,
}

impl ColorTheme {
    /// Decode a `ColorTheme` value (0–6). Out-of-range values use the default.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ColorTheme::Default,
            1 => ColorTheme::Blue,
            2 => ColorTheme::Red,
            3 => ColorTheme::Green,
            4 => ColorTheme::Purple,
            5 => ColorTheme::Orange,
            6 => ColorTheme::Teal,
            unknown => {
                warn!("Unknown color theme {}, using default", unknown);
                ColorTheme::Default
            }
        }
    }

    /// Card color, or `None` for the plain white/black card.
    pub fn card_color(self) -> Option<Rgb888> {
        match self {
            ColorTheme::Default => None,
            ColorTheme::Blue => Some(Rgb888::new(0x00, 0x00, 0xFF)),
            ColorTheme::Red => Some(Rgb888::new(0xFF, 0x00, 0x00)),
            ColorTheme::Green => Some(Rgb888::new(0x00, 0xFF, 0x00)),
            ColorTheme::Purple => Some(Rgb888::new(0xAA, 0x00, 0xFF)),
            ColorTheme::Orange => Some(Rgb888::new(0xFF, 0x55, 0x00)),
            ColorTheme::Teal => Some(Rgb888::new(0x00, 0xAA, 0xAA)),
        }
    }
}

/// Snapshot of every display setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub use_word_time: bool,
    pub use_24h: bool,
    pub use_celsius: bool,
    pub invert_colors: bool,
    pub show_weather: bool,
    pub show_battery: bool,
    pub show_date: bool,
    pub color_theme: ColorTheme,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            use_word_time: true,
            use_24h: false,
            use_celsius: false,
            invert_colors: false,
            show_weather: true,
            show_battery: true,
            show_date: true,
            color_theme: ColorTheme::Default,
        }
    }
}

impl Settings {
    pub fn time_format(&self) -> TimeFormat {
        if self.use_word_time {
            TimeFormat::Words
        } else if self.use_24h {
            TimeFormat::TwentyFourHour
        } else {
            TimeFormat::TwelveHour
        }
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.use_word_time = format == TimeFormat::Words;
        self.use_24h = format == TimeFormat::TwentyFourHour;
    }

    pub fn icon_family(&self) -> IconFamily {
        IconFamily::for_inverted(self.invert_colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.time_format(), TimeFormat::Words);
        assert!(!settings.use_celsius);
        assert!(!settings.invert_colors);
        assert!(settings.show_weather && settings.show_battery && settings.show_date);
        assert_eq!(settings.color_theme, ColorTheme::Default);
        assert_eq!(settings.icon_family(), IconFamily::Light);
    }

    #[test]
    fn test_time_format_round_trips_through_flags() {
        let mut settings = Settings::default();
        for format in [
            TimeFormat::TwelveHour,
            TimeFormat::TwentyFourHour,
            TimeFormat::Words,
        ] {
            settings.set_time_format(format);
            assert_eq!(settings.time_format(), format);
        }
    }

    #[test]
    fn test_time_format_codes() {
        assert_eq!(TimeFormat::from_code(0), TimeFormat::Words);
        assert_eq!(TimeFormat::from_code(1), TimeFormat::TwelveHour);
        assert_eq!(TimeFormat::from_code(2), TimeFormat::TwentyFourHour);
        assert_eq!(TimeFormat::from_code(9), TimeFormat::TwelveHour);
    }

    #[test]
    fn test_theme_codes_fall_back_to_default() {
        assert_eq!(ColorTheme::from_code(6), ColorTheme::Teal);
        assert_eq!(ColorTheme::from_code(7), ColorTheme::Default);
        assert_eq!(ColorTheme::Default.card_color(), None);
        assert_eq!(
            ColorTheme::Blue.card_color(),
            Some(Rgb888::new(0, 0, 0xFF))
        );
    }
}
