//! A single bike-share ride as stored in the city CSV files.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, de};

use crate::filter::{month_name, weekday_name};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// One row of a city dataset.
///
/// `gender` and `birth_year` only exist in the chicago and new york city
/// files; they deserialize to `None` when the column is absent or blank.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "Start Time", deserialize_with = "deserialize_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "End Time", deserialize_with = "deserialize_timestamp")]
    pub end_time: NaiveDateTime,
    /// Seconds. Washington records fractional durations.
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl TripRecord {
    pub fn month_name(&self) -> &'static str {
        month_name(self.start_time.month())
    }

    pub fn day_name(&self) -> &'static str {
        weekday_name(self.start_time.weekday())
    }

    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Birth year as a whole year; the files store it as `1992.0`.
    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
            .filter(|y| y.is_finite())
            .map(|y| y.trunc() as i32)
    }
}

/// Parses a start or end time in any of the layouts found in the data files.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
}
