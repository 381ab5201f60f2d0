//! Result types produced by the statistics pipeline.

use serde::Serialize;

use crate::city::City;
use crate::filter::TripFilter;

/// The most frequent value of a column and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

/// A start/end station combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most frequent times of travel. Every field is `None` for an empty view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Option<Popular<&'static str>>,
    pub day: Option<Popular<&'static str>>,
    pub hour: Option<Popular<u32>>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Option<Popular<String>>,
    pub end_station: Option<Popular<String>>,
    pub trip: Option<Popular<StationPair>>,
}

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    pub mean_seconds: Option<f64>,
}

/// Count of one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub most_recent: Option<i32>,
    pub most_common: Option<i32>,
}

/// User demographics.
///
/// `genders` and `birth_years` are `None` when the city file has no such
/// column, which is reported as "not available".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<ValueCount>,
    pub genders: Option<Vec<ValueCount>>,
    pub birth_years: Option<BirthYearStats>,
}

/// Every statistic for one city and filter, as emitted by `summary --format json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub city: City,
    pub filter: TripFilter,
    pub trip_count: usize,
    pub times: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}
