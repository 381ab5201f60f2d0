//! Month and weekday filters over a loaded city dataset.

use chrono::{Datelike, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::city::City;
use crate::error::SelectionError;
use crate::loader::{CityDataset, Columns};
use crate::trip::TripRecord;

pub const MONTH_NAMES: [&str; 12] = [
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

/// Only the first half of the year is covered by the data files.
pub const FILTERABLE_MONTHS: usize = 6;

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Full name of a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// A month restriction: `All`, or a 1-based month between January and June.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    Only(u32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl MonthFilter {
    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(month) => trip.start_time.month() == *month,
        }
    }

    pub fn choices() -> String {
        let mut names = vec!["all".to_string()];
        names.extend(
            MONTH_NAMES[..FILTERABLE_MONTHS]
                .iter()
                .map(|m| m.to_lowercase()),
        );
        names.join(", ")
    }
}

impl DayFilter {
    pub fn matches(&self, trip: &TripRecord) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(day) => trip.start_time.weekday() == *day,
        }
    }

    pub fn choices() -> String {
        let mut names = vec!["all".to_string()];
        names.extend(WEEKDAY_NAMES.iter().map(|d| d.to_lowercase()));
        names.join(", ")
    }
}

impl FromStr for MonthFilter {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES[..FILTERABLE_MONTHS]
            .iter()
            .position(|m| m.eq_ignore_ascii_case(wanted))
            .map(|i| MonthFilter::Only(i as u32 + 1))
            .ok_or_else(|| SelectionError::UnknownMonth(wanted.to_string()))
    }
}

impl FromStr for DayFilter {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        WEEKDAY_NAMES
            .iter()
            .position(|d| d.eq_ignore_ascii_case(wanted))
            .map(|i| DayFilter::Only(WEEKDAYS[i]))
            .ok_or_else(|| SelectionError::UnknownDay(wanted.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(month) => f.write_str(month_name(*month)),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for DayFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Month and day restrictions, combined with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripFilter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl TripFilter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.month.matches(trip) && self.day.matches(trip)
    }

    /// Selects the matching trips of `dataset`, keeping file order.
    pub fn apply<'a>(&self, dataset: &'a CityDataset) -> TripView<'a> {
        let rows = dataset
            .trips
            .iter()
            .filter(|trip| self.matches(trip))
            .collect();

        TripView {
            city: dataset.city,
            columns: dataset.columns,
            filter: *self,
            rows,
        }
    }
}

/// Filtered rows of a [`CityDataset`].
#[derive(Debug, Clone)]
pub struct TripView<'a> {
    pub city: City,
    pub columns: Columns,
    pub filter: TripFilter,
    rows: Vec<&'a TripRecord>,
}

impl<'a> TripView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[&'a TripRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        self.rows.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_reader;

    const TRIPS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-03-06 08:00:00,2017-03-06 08:10:00,600,A,B,Subscriber
2017-03-07 09:00:00,2017-03-07 09:10:00,600,A,C,Subscriber
2017-03-13 17:30:00,2017-03-13 17:45:00,900,B,C,Customer
2017-04-03 08:00:00,2017-04-03 08:05:00,300,C,A,Subscriber
2017-01-01 12:00:00,2017-01-01 12:30:00,1800,A,B,Customer
";

    fn dataset() -> CityDataset {
        load_from_reader(City::Chicago, TRIPS.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_month_filter() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("March".parse::<MonthFilter>().unwrap(), MonthFilter::Only(3));
        assert_eq!(" june ".parse::<MonthFilter>().unwrap(), MonthFilter::Only(6));
    }

    #[test]
    fn test_parse_month_filter_rejects_second_half_of_year() {
        assert_eq!(
            "july".parse::<MonthFilter>().unwrap_err(),
            SelectionError::UnknownMonth("july".to_string())
        );
        assert!("mar".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_parse_day_filter() {
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!(
            "Monday".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Mon)
        );
        assert_eq!(
            "sunday".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Sun)
        );
        assert!("mon".parse::<DayFilter>().is_err());
        assert!("funday".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for name in ["all", "january", "june"] {
            let filter: MonthFilter = name.parse().unwrap();
            assert_eq!(filter.to_string().parse::<MonthFilter>().unwrap(), filter);
        }
        assert_eq!(DayFilter::Only(Weekday::Wed).to_string(), "Wednesday");
    }

    #[test]
    fn test_all_all_returns_full_table() {
        let dataset = dataset();
        let view = TripFilter::default().apply(&dataset);
        assert_eq!(view.len(), dataset.len());
    }

    #[test]
    fn test_month_and_day_filter() {
        let dataset = dataset();
        let filter = TripFilter::new(MonthFilter::Only(3), DayFilter::Only(Weekday::Mon));
        let view = filter.apply(&dataset);

        assert_eq!(view.len(), 2);
        for trip in view.iter() {
            assert_eq!(trip.month_name(), "March");
            assert_eq!(trip.day_name(), "Monday");
        }
        assert_eq!(view.rows()[0].start_station, "A");
        assert_eq!(view.rows()[1].start_station, "B");
    }

    #[test]
    fn test_filtered_never_exceeds_unfiltered() {
        let dataset = dataset();
        for month in ["all", "january", "march", "april", "may"] {
            for day in ["all", "monday", "tuesday", "sunday"] {
                let filter = TripFilter::new(month.parse().unwrap(), day.parse().unwrap());
                assert!(filter.apply(&dataset).len() <= dataset.len());
            }
        }
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let dataset = dataset();
        let view = TripFilter::new(MonthFilter::Only(5), DayFilter::All).apply(&dataset);
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_serializes_as_names() {
        let filter = TripFilter::new(MonthFilter::Only(2), DayFilter::All);
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"month":"February","day":"all"}"#);
    }
}
