//! # Companion Messages
//!
//! The watch and its companion exchange flat dictionaries of well-known keys.
//! Values are either integers or strings; on the wire (the JSON form used by
//! the simulator and the companion cache) they are untagged.
//!
//! ```json
//! { "Temperature": 72, "Condition": "Clear", "WeatherIcon": 0 }
//! ```
//!
//! Keys the watch does not know are dropped while decoding. A key carrying
//! the wrong kind of value reads as absent and is logged.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every key understood by the watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    Temperature,
    Condition,
    WeatherIcon,
    TemperatureUnit,
    TimeFormat,
    InvertColors,
    ColorTheme,
    ShowWeather,
    ShowBattery,
    ShowDate,
}

impl MessageKey {
    pub const ALL: [MessageKey; 10] = [
        MessageKey::Temperature,
        MessageKey::Condition,
        MessageKey::WeatherIcon,
        MessageKey::TemperatureUnit,
        MessageKey::TimeFormat,
        MessageKey::InvertColors,
        MessageKey::ColorTheme,
        MessageKey::ShowWeather,
        MessageKey::ShowBattery,
        MessageKey::ShowDate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MessageKey::Temperature => "Temperature",
            MessageKey::Condition => "Condition",
            MessageKey::WeatherIcon => "WeatherIcon",
            MessageKey::TemperatureUnit => "TemperatureUnit",
            MessageKey::TimeFormat => "TimeFormat",
            MessageKey::InvertColors => "InvertColors",
            MessageKey::ColorTheme => "ColorTheme",
            MessageKey::ShowWeather => "ShowWeather",
            MessageKey::ShowBattery => "ShowBattery",
            MessageKey::ShowDate => "ShowDate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    Int(i32),
    Text(String),
}

impl From<i32> for MessageValue {
    fn from(value: i32) -> Self {
        MessageValue::Int(value)
    }
}

impl From<bool> for MessageValue {
    fn from(value: bool) -> Self {
        MessageValue::Int(value as i32)
    }
}

impl From<&str> for MessageValue {
    fn from(value: &str) -> Self {
        MessageValue::Text(value.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(value: String) -> Self {
        MessageValue::Text(value)
    }
}

/// One inbound or outbound dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppMessage {
    entries: BTreeMap<MessageKey, MessageValue>,
}

impl AppMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: MessageKey, value: impl Into<MessageValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: MessageKey, value: impl Into<MessageValue>) {
        self.entries.insert(key, value.into());
    }

    pub fn contains(&self, key: MessageKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn get(&self, key: MessageKey) -> Option<&MessageValue> {
        self.entries.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = MessageKey> + '_ {
        self.entries.keys().copied()
    }

    /// Integer value of `key`. A string value reads as absent.
    pub fn int(&self, key: MessageKey) -> Option<i32> {
        match self.entries.get(&key)? {
            MessageValue::Int(value) => Some(*value),
            MessageValue::Text(text) => {
                warn!("Ignoring {}: expected an integer, got {:?}", key.name(), text);
                None
            }
        }
    }

    /// String value of `key`. An integer value reads as absent.
    pub fn text(&self, key: MessageKey) -> Option<&str> {
        match self.entries.get(&key)? {
            MessageValue::Text(text) => Some(text),
            MessageValue::Int(value) => {
                warn!("Ignoring {}: expected a string, got {}", key.name(), value);
                None
            }
        }
    }

    /// Boolean value of `key`: only `1` is true, any other integer is false.
    pub fn flag(&self, key: MessageKey) -> Option<bool> {
        self.int(key).map(|value| value == 1)
    }

    /// Decode a JSON object. Unknown keys are skipped.
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        let raw: BTreeMap<String, MessageValue> = serde_json::from_str(json)?;
        let mut message = AppMessage::new();
        for (name, value) in raw {
            match MessageKey::from_name(&name) {
                Some(key) => message.entries.insert(key, value),
                None => {
                    debug!("Skipping unknown message key {:?}", name);
                    None
                }
            };
        }
        Ok(message)
    }

    pub fn to_json(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The watch's request for fresh weather: `{ Temperature: 1 }`.
pub fn weather_request() -> AppMessage {
    AppMessage::new().with(MessageKey::Temperature, 1)
}
