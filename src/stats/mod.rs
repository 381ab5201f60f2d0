//! Descriptive statistics over a filtered trip view.
//!
//! Each section (travel times, stations, durations, users) is computed
//! independently so the console report can time them one by one.

pub mod compute;
pub mod types;
pub mod utility;

pub use types::{
    BirthYearStats, DurationStats, Popular, StationPair, StationStats, TimeStats, TripReport,
    UserStats, ValueCount,
};
