//! # Companion Weather Service
//!
//! The phone-side half of the watchface. It answers the watch's weather
//! requests and pushes the settings page values.
//!
//! ## Data Source
//! - **URL**: `http://api.weatherapi.com/v1/current.json?key=<key>&q=<location>`
//! - **Fields used**: `current.temp_c`, `current.temp_f`, `current.condition.text`
//!
//! The temperature is rounded to a whole degree in the configured unit. The
//! condition text is mapped to one of the five icon codes by the first entry
//! of [`ICON_MAP`] it contains. Anything unmatched shows a cloud.
//!
//! ## Caching Strategy
//! - **Location**: `companion.cache_path` (defaults to `/tmp`, cleared on reboot)
//! - **TTL**: `companion.cache_ttl_minutes`, checked against the file mtime
//! - **Validation**: a cached report in the other unit counts as a miss
//!
//! Cache write failures are non-fatal.

use std::{fs, io, path::Path, time::SystemTime};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{CompanionConfig, WatchfaceConfig};
use crate::message::{AppMessage, MessageKey};

pub const WEATHER_API_URL: &str = "http://api.weatherapi.com/v1/current.json";

/// Condition substrings and their icon codes, matched in order.
pub const ICON_MAP: [(&str, i32); 22] = [
    ("sunny", 0),
    ("clear", 0),
    ("partly cloudy", 1),
    ("cloudy", 1),
    ("overcast", 1),
    ("mist", 1),
    ("fog", 1),
    ("patchy rain", 2),
    ("rain", 2),
    ("light rain", 2),
    ("moderate rain", 2),
    ("heavy rain", 2),
    ("patchy snow", 3),
    ("snow", 3),
    ("light snow", 3),
    ("moderate snow", 3),
    ("heavy snow", 3),
    ("blizzard", 3),
    ("thunder", 4),
    ("thunderstorm", 4),
    ("patchy sleet", 3),
    ("sleet", 3),
];

const DEFAULT_ICON: i32 = 1;

/// Card colors offered by the settings page and their theme codes.
const THEME_COLORS: [(&str, i32); 7] = [
    ("0x000000", 0),
    ("0x0000FF", 1),
    ("0xFF0000", 2),
    ("0x00FF00", 3),
    ("0xAA00FF", 4),
    ("0xFF5500", 5),
    ("0x00AAAA", 6),
];

/// Errors that can occur while producing a weather report.
#[derive(Error, Debug)]
pub enum CompanionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no weather API key configured")]
    MissingApiKey,

    #[error("cache IO: {0}")]
    Cache(#[from] io::Error),

    #[error("unexpected weather response: {0}")]
    Json(#[from] serde_json::Error),
}

/// One weather observation, as sent to the watch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Rounded, in the unit given by `celsius`
    pub temperature: i32,
    pub condition: String,
    pub icon: i32,
    pub celsius: bool,
}

impl WeatherReport {
    pub fn to_message(&self) -> AppMessage {
        AppMessage::new()
            .with(MessageKey::Temperature, self.temperature)
            .with(MessageKey::Condition, self.condition.as_str())
            .with(MessageKey::WeatherIcon, self.icon)
    }
}

#[derive(Deserialize)]
struct CurrentResponse {
    current: Current,
}

#[derive(Deserialize)]
struct Current {
    temp_c: f64,
    temp_f: f64,
    condition: ConditionText,
}

#[derive(Deserialize)]
struct ConditionText {
    text: String,
}

/// Icon code for a condition text such as `"Patchy light rain"`.
pub fn icon_code_for_condition(condition: &str) -> i32 {
    let lower = condition.to_lowercase();
    ICON_MAP
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map_or(DEFAULT_ICON, |&(_, code)| code)
}

/// Theme code for a settings page color. Unknown colors use the default theme.
pub fn theme_code_for_hex(hex: &str) -> i32 {
    THEME_COLORS
        .iter()
        .find(|(color, _)| color.eq_ignore_ascii_case(hex))
        .map_or(0, |&(_, code)| code)
}

/// Whether a message from the watch asks for fresh weather.
pub fn wants_weather(message: &AppMessage) -> bool {
    message.contains(MessageKey::Temperature)
}

/// The settings page values as a watch message.
pub fn settings_message(watchface: &WatchfaceConfig) -> AppMessage {
    AppMessage::new()
        .with(MessageKey::TemperatureUnit, watchface.use_celsius)
        .with(MessageKey::TimeFormat, watchface.time_format)
        .with(
            MessageKey::ColorTheme,
            theme_code_for_hex(&watchface.color_theme),
        )
        .with(MessageKey::InvertColors, watchface.invert_colors)
        .with(MessageKey::ShowWeather, watchface.show_weather)
        .with(MessageKey::ShowBattery, watchface.show_battery)
        .with(MessageKey::ShowDate, watchface.show_date)
}

/// Fetch current weather from cache or weatherapi.com.
///
/// Cache-first: a fresh cached report in the requested unit is returned
/// without touching the network.
pub async fn fetch(
    config: &CompanionConfig,
    celsius: bool,
) -> Result<WeatherReport, CompanionError> {
    let ttl_secs = config.cache_ttl_minutes * 60;
    match load_cache(Path::new(&config.cache_path), ttl_secs) {
        Ok(report) if report.celsius == celsius => {
            debug!("Using cached weather from {}", config.cache_path);
            return Ok(report);
        }
        Ok(_) => debug!("Cached weather is in the other unit"),
        Err(e) => debug!("Weather cache miss: {}", e),
    }

    let report = fetch_current(config, celsius).await?;

    if let Err(e) = save_cache(Path::new(&config.cache_path), &report) {
        warn!("Could not write weather cache: {}", e);
    }

    Ok(report)
}

async fn fetch_current(
    config: &CompanionConfig,
    celsius: bool,
) -> Result<WeatherReport, CompanionError> {
    if config.api_key.is_empty() {
        return Err(CompanionError::MissingApiKey);
    }

    info!("Fetching weather for {}", config.location);
    let body = reqwest::Client::new()
        .get(WEATHER_API_URL)
        .query(&[("key", config.api_key.as_str()), ("q", config.location.as_str())])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_current(&body, celsius)
}

/// Turn a `current.json` response body into a report.
pub fn parse_current(body: &str, celsius: bool) -> Result<WeatherReport, CompanionError> {
    let response: CurrentResponse = serde_json::from_str(body)?;
    let current = response.current;
    let degrees = if celsius {
        current.temp_c
    } else {
        current.temp_f
    };

    Ok(WeatherReport {
        temperature: degrees.round() as i32,
        icon: icon_code_for_condition(&current.condition.text),
        condition: current.condition.text,
        celsius,
    })
}

fn load_cache(path: &Path, ttl_secs: u64) -> Result<WeatherReport, io::Error> {
    let meta = fs::metadata(path)?;

    let age = SystemTime::now()
        .duration_since(meta.modified()?)
        .map_err(|_| io::Error::other("time error"))?
        .as_secs();

    if age > ttl_secs {
        return Err(io::Error::other("stale"));
    }

    let data = fs::read(path)?;
    let report = serde_json::from_slice(&data)?;
    Ok(report)
}

fn save_cache(path: &Path, report: &WeatherReport) -> Result<(), io::Error> {
    let data = serde_json::to_vec(report)?;
    fs::write(path, data)?;
    Ok(())
}
