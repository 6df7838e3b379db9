//! # Configuration Management
//!
//! Runtime configuration lives in `compact-config.toml`. It covers three areas:
//!
//! - `[display]`: the surface the watchface draws on
//! - `[companion]`: where the companion fetches weather and how long it caches it
//! - `[watchface]`: the settings page; pushed to the watch once at startup
//!
//! Every section and field has a default, so a partial file is valid. A missing
//! or unparsable file falls back to the defaults.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use embedded_graphics::prelude::Size;

pub const CONFIG_FILE: &str = "compact-config.toml";

/// Application configuration loaded from compact-config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub companion: CompanionConfig,
    pub watchface: WatchfaceConfig,
}

/// Surface configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Surface width in pixels (144, or 200 for the large platform)
    pub width: u32,
    /// Surface height in pixels (168, or 228 for the large platform)
    pub height: u32,
    /// Whether the surface shows color; themes only apply when it does
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 144,
            height: 168,
            color: false,
        }
    }
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Weather source used by the companion
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// weatherapi.com key; weather is unavailable without one
    pub api_key: String,
    /// Any location the API accepts: city, ZIP code or "lat,lon"
    pub location: String,
    /// Cache TTL in minutes
    pub cache_ttl_minutes: u64,
    /// Where the last report is cached
    pub cache_path: String,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        CompanionConfig {
            api_key: String::new(),
            location: "Boston, MA".to_string(),
            cache_ttl_minutes: 30,
            cache_path: "/tmp/compact_info_weather.json".to_string(),
        }
    }
}

/// Settings page values
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchfaceConfig {
    /// 0 words, 1 12-hour, 2 24-hour
    pub time_format: i32,
    pub use_celsius: bool,
    pub invert_colors: bool,
    /// Card color as a hex string, e.g. "0x0000FF"
    pub color_theme: String,
    pub show_weather: bool,
    pub show_battery: bool,
    pub show_date: bool,
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        WatchfaceConfig {
            time_format: 0,
            use_celsius: false,
            invert_colors: false,
            color_theme: "0x000000".to_string(),
            show_weather: true,
            show_battery: true,
            show_date: true,
        }
    }
}

impl Config {
    /// Load configuration from compact-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(
                        "Loaded configuration from {} ({}x{})",
                        path.display(),
                        config.display.width,
                        config.display.height
                    );
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format: {}", e);
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
        }
    }

    /// Save current configuration to compact-config.toml
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(CONFIG_FILE)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
