//! # Event Handlers
//!
//! The watchface reacts to five events, each handled to completion before the
//! next one is dispatched:
//!
//! | Event        | Handler          | Effect                                            |
//! |--------------|------------------|---------------------------------------------------|
//! | startup      | [`on_start`]     | first time, date and battery; weather request     |
//! | minute tick  | [`on_tick`]      | time and date; weather request every half hour    |
//! | battery      | [`on_battery`]   | percentage, status and battery icon               |
//! | message      | [`on_message`]   | settings first, then weather fields               |
//! | shutdown     | [`on_shutdown`]  | releases every owned raster                       |
//!
//! Handlers never block. Outbound messages go through [`Host::send`] and are
//! not awaited.

use chrono::{NaiveDateTime, Timelike};
use log::{debug, info, warn};

use crate::format::{battery_percent_text, date_text, temperature_text, time_text};
use crate::icons::{battery_icon, weather_icon, BatteryTier, IconResource, WeatherCondition};
use crate::message::{weather_request, AppMessage, MessageKey};
use crate::raster::Raster;
use crate::scaler;
use crate::settings::{ColorTheme, TimeFormat};
use crate::state::RenderState;
use crate::text::TextMeasure;

/// Minutes between automatic weather requests.
pub const WEATHER_INTERVAL_MINUTES: u32 = 30;

/// Capabilities the watchface needs from the platform.
pub trait Host: TextMeasure {
    fn now(&self) -> NaiveDateTime;

    /// Current charge, 0–100.
    fn battery_percent(&self) -> u8;

    /// Decode a packaged icon. `None` when the asset is missing or cannot be
    /// decoded.
    fn fetch_asset_raster(&mut self, resource: IconResource) -> Option<Raster>;

    /// Queue a message for the companion.
    fn send(&mut self, message: AppMessage);

    fn request_redraw(&mut self);
}

pub fn on_start<H: Host>(state: &mut RenderState, host: &mut H) {
    let now = host.now();
    info!("Starting at {}", now);

    update_time(state, now);
    if state.settings.show_date {
        update_date(state, now);
    }
    if state.settings.show_battery {
        let percent = host.battery_percent();
        update_battery(state, host, percent);
    }
    state.last_tick = Some(now);

    host.send(weather_request());
    refresh(state, host);
}

pub fn on_tick<H: Host>(state: &mut RenderState, host: &mut H, now: NaiveDateTime) {
    update_time(state, now);
    if state.settings.show_date {
        update_date(state, now);
    }
    state.last_tick = Some(now);

    if now.minute() % WEATHER_INTERVAL_MINUTES == 0 {
        debug!("Requesting weather at {}", now.time());
        host.send(weather_request());
    }
    refresh(state, host);
}

pub fn on_battery<H: Host>(state: &mut RenderState, host: &mut H, percent: u8) {
    if !state.settings.show_battery {
        debug!("Battery hidden, ignoring {}%", percent);
        return;
    }
    update_battery(state, host, percent);
    refresh(state, host);
}

/// Apply an inbound dictionary. Weather keys are read against the settings in
/// force before the message; its settings keys are applied afterwards, and a
/// unit change reformats the temperature just stored.
pub fn on_message<H: Host>(state: &mut RenderState, host: &mut H, message: &AppMessage) {
    debug!("Message with {} key(s)", message.len());
    apply_weather(state, host, message);
    apply_settings(state, host, message);
    refresh(state, host);
}

/// Release every owned raster. Returns how many were dropped.
pub fn on_shutdown(state: &mut RenderState) -> usize {
    let released = state.release_icons();
    info!("Shut down, released {} icon(s)", released);
    released
}

fn apply_settings<H: Host>(state: &mut RenderState, host: &mut H, message: &AppMessage) {
    if let Some(celsius) = message.int(MessageKey::TemperatureUnit).map(|unit| unit == 1) {
        state.settings.use_celsius = celsius;
        if state.settings.show_weather {
            if let Some(degrees) = state.weather_temperature {
                state.texts.temperature = temperature_text(degrees, celsius);
            }
        }
    }

    if let Some(code) = message.int(MessageKey::TimeFormat) {
        state.settings.set_time_format(TimeFormat::from_code(code));
        let now = state.last_tick.unwrap_or_else(|| host.now());
        update_time(state, now);
    }

    if let Some(inverted) = message.flag(MessageKey::InvertColors) {
        if inverted != state.settings.invert_colors {
            info!("Color inversion {}", if inverted { "on" } else { "off" });
            state.settings.invert_colors = inverted;
            if let Some(condition) = state.weather_condition {
                reload_weather_icon(state, host, condition);
            }
            if let Some(tier) = state.battery_tier {
                reload_battery_icon(state, host, tier);
            }
            host.send(weather_request());
        }
    }

    if let Some(code) = message.int(MessageKey::ColorTheme) {
        state.settings.color_theme = ColorTheme::from_code(code);
    }

    if let Some(show) = message.flag(MessageKey::ShowWeather) {
        state.settings.show_weather = show;
    }

    if let Some(show) = message.flag(MessageKey::ShowBattery) {
        let enabled = show && !state.settings.show_battery;
        state.settings.show_battery = show;
        if enabled {
            let percent = host.battery_percent();
            update_battery(state, host, percent);
        }
    }

    if let Some(show) = message.flag(MessageKey::ShowDate) {
        state.settings.show_date = show;
        if show {
            let now = state.last_tick.unwrap_or_else(|| host.now());
            update_date(state, now);
        }
    }
}

fn apply_weather<H: Host>(state: &mut RenderState, host: &mut H, message: &AppMessage) {
    if !state.settings.show_weather {
        return;
    }

    if let Some(degrees) = message.int(MessageKey::Temperature) {
        state.weather_temperature = Some(degrees);
        state.texts.temperature = temperature_text(degrees, state.settings.use_celsius);
    }

    if let Some(condition) = message.text(MessageKey::Condition) {
        state.texts.condition = condition.to_string();
    }

    if let Some(code) = message.int(MessageKey::WeatherIcon) {
        let condition = WeatherCondition::from_code(code);
        state.weather_condition = Some(condition);
        reload_weather_icon(state, host, condition);
    }
}

fn update_time(state: &mut RenderState, now: NaiveDateTime) {
    let text = time_text(now.hour(), now.minute(), state.settings.time_format());
    state.texts.hour = text.hour;
    state.texts.minute = text.minute;
    state.texts.period = text.period;
}

fn update_date(state: &mut RenderState, now: NaiveDateTime) {
    state.texts.date = date_text(now.date());
}

fn update_battery<H: Host>(state: &mut RenderState, host: &mut H, percent: u8) {
    let percent = percent.min(100);
    let tier = BatteryTier::from_percent(percent);

    state.texts.battery_percent = battery_percent_text(percent);
    state.texts.battery_status = tier.status_text().to_string();
    state.battery_percent = Some(percent);

    let glyph_changed = state.battery_tier.map(BatteryTier::icon) != Some(tier.icon());
    state.battery_tier = Some(tier);
    if glyph_changed || state.battery_icon().is_none() {
        reload_battery_icon(state, host, tier);
    }
}

fn reload_weather_icon<H: Host>(state: &mut RenderState, host: &mut H, condition: WeatherCondition) {
    state.release_weather_icon();
    let resource = weather_icon(condition, state.settings.invert_colors);
    if let Some(raster) = load_icon(host, resource, state.screen.icon_size) {
        state.install_weather_icon(raster);
    }
}

fn reload_battery_icon<H: Host>(state: &mut RenderState, host: &mut H, tier: BatteryTier) {
    state.release_battery_icon();
    let resource = battery_icon(tier, state.settings.invert_colors);
    if let Some(raster) = load_icon(host, resource, state.screen.icon_size) {
        state.install_battery_icon(raster);
    }
}

/// Fetch an icon and fit it to `max_dimension`. A resized icon's source is
/// dropped here, before the result is installed.
fn load_icon<H: Host>(host: &mut H, resource: IconResource, max_dimension: u32) -> Option<Raster> {
    let Some(raster) = host.fetch_asset_raster(resource) else {
        warn!("Icon {} unavailable, leaving slot empty", resource);
        return None;
    };
    let scaled = scaler::scale(raster, max_dimension);
    debug!("Icon {} {:?}", resource, scaled.outcome());
    Some(scaled.into_raster())
}

fn refresh<H: Host>(state: &mut RenderState, host: &mut H) {
    state.relayout(&*host);
    host.request_redraw();
}
