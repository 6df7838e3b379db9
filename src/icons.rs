//! # Icon Selection
//!
//! Maps weather codes, battery percentages and the color inversion flag to the
//! icon asset that should be fetched. Pixels are never inverted at run time:
//! every icon exists in a light family (for the normal light card) and a dark
//! family (for the inverted card).

use std::fmt;

use log::warn;

/// Weather conditions the companion can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Sun,
    Cloud,
    Rain,
    Snow,
    Thunder,
}

impl WeatherCondition {
    /// Decode a `WeatherIcon` value. Unknown codes fall back to [`WeatherCondition::Cloud`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => WeatherCondition::Sun,
            1 => WeatherCondition::Cloud,
            2 => WeatherCondition::Rain,
            3 => WeatherCondition::Snow,
            4 => WeatherCondition::Thunder,
            unknown => {
                warn!("Unknown weather icon code {}, using cloud", unknown);
                WeatherCondition::Cloud
            }
        }
    }

    pub fn code(self) -> i32 {
        match self {
            WeatherCondition::Sun => 0,
            WeatherCondition::Cloud => 1,
            WeatherCondition::Rain => 2,
            WeatherCondition::Snow => 3,
            WeatherCondition::Thunder => 4,
        }
    }

    fn asset_name(self) -> &'static str {
        match self {
            WeatherCondition::Sun => "sun",
            WeatherCondition::Cloud => "cloud",
            WeatherCondition::Rain => "cloud-rain",
            WeatherCondition::Snow => "cloud-snow",
            WeatherCondition::Thunder => "cloud-lightning",
        }
    }
}

/// Battery level buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatteryTier {
    Full,
    Great,
    Good,
    Low,
    Critical,
}

impl BatteryTier {
    /// Bucket a charge percentage. Bounds are lower-inclusive: 100 is full,
    /// 80 great, 50 good, 20 low, anything below critical.
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            100.. => BatteryTier::Full,
            80..=99 => BatteryTier::Great,
            50..=79 => BatteryTier::Good,
            20..=49 => BatteryTier::Low,
            _ => BatteryTier::Critical,
        }
    }

    /// Status text shown next to the percentage.
    pub fn status_text(self) -> &'static str {
        match self {
            BatteryTier::Full => "Full",
            BatteryTier::Great => "Great",
            BatteryTier::Good => "Good",
            BatteryTier::Low | BatteryTier::Critical => "Low",
        }
    }

    pub fn icon(self) -> BatteryIcon {
        match self {
            BatteryTier::Full | BatteryTier::Great => BatteryIcon::Full,
            BatteryTier::Good => BatteryIcon::Medium,
            BatteryTier::Low => BatteryIcon::Low,
            BatteryTier::Critical => BatteryIcon::Warning,
        }
    }
}

/// Battery glyphs. Several tiers share one glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatteryIcon {
    Full,
    Medium,
    Low,
    Warning,
}

impl BatteryIcon {
    fn asset_name(self) -> &'static str {
        match self {
            BatteryIcon::Full => "battery-full",
            BatteryIcon::Medium => "battery-medium",
            BatteryIcon::Low => "battery-low",
            BatteryIcon::Warning => "battery-warning",
        }
    }
}

/// Which of the two pre-rendered asset sets to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconFamily {
    /// Dark glyphs for the default light card.
    Light,
    /// Light glyphs for the inverted dark card.
    Dark,
}

impl IconFamily {
    pub fn for_inverted(inverted: bool) -> Self {
        if inverted {
            IconFamily::Dark
        } else {
            IconFamily::Light
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            IconFamily::Light => "light",
            IconFamily::Dark => "dark",
        }
    }
}

/// Identifier of a pre-rendered icon asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconResource {
    Weather(WeatherCondition, IconFamily),
    Battery(BatteryIcon, IconFamily),
}

impl IconResource {
    pub fn family(self) -> IconFamily {
        match self {
            IconResource::Weather(_, family) | IconResource::Battery(_, family) => family,
        }
    }
}

impl fmt::Display for IconResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self {
            IconResource::Weather(condition, _) => condition.asset_name(),
            IconResource::Battery(icon, _) => icon.asset_name(),
        };
        write!(f, "{}-{}", base, self.family().suffix())
    }
}

pub fn weather_icon(condition: WeatherCondition, inverted: bool) -> IconResource {
    IconResource::Weather(condition, IconFamily::for_inverted(inverted))
}

pub fn battery_icon(tier: BatteryTier, inverted: bool) -> IconResource {
    IconResource::Battery(tier.icon(), IconFamily::for_inverted(inverted))
}
