//! Text formatting for every displayed field.
//!
//! All strings come from fixed English tables so the output never depends on
//! the host locale or a date/time formatter.

use chrono::{Datelike, NaiveDate};

use crate::settings::TimeFormat;

const HOUR_WORDS: [&str; 12] = [
    "TWELVE", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    "ELEVEN",
];

const MINUTE_WORDS: [&str; 60] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    "ELEVEN", "TWELVE", "THIRTEEN", "FOURTEEN", "FIFTEEN", "SIXTEEN", "SEVENTEEN", "EIGHTEEN",
    "NINETEEN", "TWENTY", "TWENTY ONE", "TWENTY TWO", "TWENTY THREE", "TWENTY FOUR",
    "TWENTY FIVE", "TWENTY SIX", "TWENTY SEVEN", "TWENTY EIGHT", "TWENTY NINE", "THIRTY",
    "THIRTY ONE", "THIRTY TWO", "THIRTY THREE", "THIRTY FOUR", "THIRTY FIVE", "THIRTY SIX",
    "THIRTY SEVEN", "THIRTY EIGHT", "THIRTY NINE", "FORTY", "FORTY ONE", "FORTY TWO",
    "FORTY THREE", "FORTY FOUR", "FORTY FIVE", "FORTY SIX", "FORTY SEVEN", "FORTY EIGHT",
    "FORTY NINE", "FIFTY", "FIFTY ONE", "FIFTY TWO", "FIFTY THREE", "FIFTY FOUR", "FIFTY FIVE",
    "FIFTY SIX", "FIFTY SEVEN", "FIFTY EIGHT", "FIFTY NINE",
];

const TWO_DIGITS: [&str; 60] = [
    "00", "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13", "14",
    "15", "16", "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29",
    "30", "31", "32", "33", "34", "35", "36", "37", "38", "39", "40", "41", "42", "43", "44",
    "45", "46", "47", "48", "49", "50", "51", "52", "53", "54", "55", "56", "57", "58", "59",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The three time strings: hour line, minute line and AM/PM marker.
///
/// Numeric formats put the whole `HH:MM` into `hour` and leave `minute` empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeText {
    pub hour: String,
    pub minute: String,
    pub period: String,
}

/// Format a wall-clock time. `hour` is 0–23, `minute` 0–59.
pub fn time_text(hour: u32, minute: u32, format: TimeFormat) -> TimeText {
    let hour = hour % 24;
    let minute = (minute % 60) as usize;
    let period = if hour >= 12 { "PM" } else { "AM" };

    match format {
        TimeFormat::Words => TimeText {
            hour: HOUR_WORDS[(hour % 12) as usize].to_string(),
            minute: MINUTE_WORDS[minute].to_string(),
            period: period.to_string(),
        },
        TimeFormat::TwelveHour => {
            let twelve = match hour % 12 {
                0 => 12,
                h => h,
            };
            TimeText {
                hour: format!("{}:{}", TWO_DIGITS[twelve as usize], TWO_DIGITS[minute]),
                minute: String::new(),
                period: period.to_string(),
            }
        }
        TimeFormat::TwentyFourHour => TimeText {
            hour: format!("{}:{}", TWO_DIGITS[hour as usize], TWO_DIGITS[minute]),
            minute: String::new(),
            period: String::new(),
        },
    }
}

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// `"Friday, November 8th"`
pub fn date_text(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    let day = date.day();
    format!("{}, {} {}{}", weekday, month, day, ordinal_suffix(day))
}

pub fn temperature_text(degrees: i32, celsius: bool) -> String {
    format!("{}°{}", degrees, if celsius { 'C' } else { 'F' })
}

pub fn battery_percent_text(percent: u8) -> String {
    format!("{}%", percent)
}
