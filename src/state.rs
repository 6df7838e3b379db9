//! # Render State
//!
//! Everything the draw pass needs, owned by one value that is threaded through
//! the event handlers by `&mut`. There are no globals.
//!
//! ## Icon ownership
//! The state owns at most one weather raster and one battery raster. A slot
//! must be released before a replacement is installed, so two icons of the
//! same kind are never alive at once. [`RenderState::release_icons`] empties
//! both slots and reports how many rasters it dropped; a second call drops
//! nothing.

use chrono::NaiveDateTime;
use embedded_graphics::prelude::Size;
use log::debug;

use crate::icons::{BatteryTier, WeatherCondition};
use crate::layout::{layout_line, LinePlacement};
use crate::raster::Raster;
use crate::screen::ScreenLayout;
use crate::settings::Settings;
use crate::text::TextMeasure;

/// Last formatted string of every text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayTexts {
    pub hour: String,
    pub minute: String,
    pub period: String,
    pub temperature: String,
    pub condition: String,
    pub battery_percent: String,
    pub battery_status: String,
    pub date: String,
}

impl Default for DisplayTexts {
    fn default() -> Self {
        DisplayTexts {
            hour: String::new(),
            minute: String::new(),
            period: String::new(),
            temperature: String::new(),
            condition: "Loading...".to_string(),
            battery_percent: String::new(),
            battery_status: String::new(),
            date: String::new(),
        }
    }
}

/// Placements of the three two-fragment lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placements {
    pub time: LinePlacement,
    pub weather: LinePlacement,
    pub battery: LinePlacement,
}

#[derive(Debug)]
pub struct RenderState {
    pub settings: Settings,
    pub texts: DisplayTexts,
    pub weather_condition: Option<WeatherCondition>,
    /// Last reported temperature, kept so a unit change can re-format it.
    pub weather_temperature: Option<i32>,
    pub battery_tier: Option<BatteryTier>,
    pub battery_percent: Option<u8>,
    pub last_tick: Option<NaiveDateTime>,
    pub placements: Placements,
    pub screen: ScreenLayout,
    weather_icon: Option<Raster>,
    battery_icon: Option<Raster>,
}

impl RenderState {
    pub fn new(size: Size) -> Self {
        Self::with_settings(size, Settings::default())
    }

    pub fn with_settings(size: Size, settings: Settings) -> Self {
        RenderState {
            settings,
            texts: DisplayTexts::default(),
            weather_condition: None,
            weather_temperature: None,
            battery_tier: None,
            battery_percent: None,
            last_tick: None,
            placements: Placements::default(),
            screen: ScreenLayout::for_size(size),
            weather_icon: None,
            battery_icon: None,
        }
    }

    pub fn weather_icon(&self) -> Option<&Raster> {
        self.weather_icon.as_ref()
    }

    pub fn battery_icon(&self) -> Option<&Raster> {
        self.battery_icon.as_ref()
    }

    /// Drop the weather raster. Returns whether one was held.
    pub fn release_weather_icon(&mut self) -> bool {
        self.weather_icon.take().is_some()
    }

    pub fn release_battery_icon(&mut self) -> bool {
        self.battery_icon.take().is_some()
    }

    /// Install a weather raster into an empty slot.
    pub fn install_weather_icon(&mut self, raster: Raster) {
        debug_assert!(
            self.weather_icon.is_none(),
            "weather icon installed without releasing the previous one"
        );
        self.weather_icon = Some(raster);
    }

    pub fn install_battery_icon(&mut self, raster: Raster) {
        debug_assert!(
            self.battery_icon.is_none(),
            "battery icon installed without releasing the previous one"
        );
        self.battery_icon = Some(raster);
    }

    /// Release every owned raster. Returns the number dropped.
    pub fn release_icons(&mut self) -> usize {
        let released =
            self.release_weather_icon() as usize + self.release_battery_icon() as usize;
        debug!("Released {} icon raster(s)", released);
        released
    }

    /// Recompute all line placements from the current texts.
    pub fn relayout<M: TextMeasure + ?Sized>(&mut self, measure: &M) {
        let screen = &self.screen;
        let texts = &self.texts;

        // Word mode draws the AM/PM marker in its own frame below the minutes
        let time_qualifier = if self.settings.time_format().is_numeric() {
            texts.period.as_str()
        } else {
            ""
        };

        self.placements = Placements {
            time: layout_line(
                measure,
                screen.time_line,
                &screen.time_style,
                &texts.hour,
                time_qualifier,
            ),
            weather: layout_line(
                measure,
                screen.weather_line,
                &screen.row_style,
                &texts.temperature,
                &texts.condition,
            ),
            battery: layout_line(
                measure,
                screen.battery_line,
                &screen.row_style,
                &texts.battery_percent,
                &texts.battery_status,
            ),
        };
    }
}
