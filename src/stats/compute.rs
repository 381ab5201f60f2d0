use tracing::debug;

use crate::filter::TripView;
use crate::stats::types::{
    BirthYearStats, DurationStats, Popular, StationPair, StationStats, TimeStats, TripReport,
    UserStats, ValueCount,
};
use crate::stats::utility::{mean, most_frequent, value_counts};
use crate::trip::TripRecord;

fn owned_value(popular: Popular<&str>) -> Popular<String> {
    Popular {
        value: popular.value.to_string(),
        count: popular.count,
    }
}

fn counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

impl TimeStats {
    pub fn from_view(view: &TripView<'_>) -> Self {
        TimeStats {
            month: most_frequent(view.iter().map(TripRecord::month_name)),
            day: most_frequent(view.iter().map(TripRecord::day_name)),
            hour: most_frequent(view.iter().map(TripRecord::hour)),
        }
    }
}

impl StationStats {
    pub fn from_view(view: &TripView<'_>) -> Self {
        let trip = most_frequent(
            view.iter()
                .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
        )
        .map(|p| Popular {
            value: StationPair {
                start: p.value.0.to_string(),
                end: p.value.1.to_string(),
            },
            count: p.count,
        });

        StationStats {
            start_station: most_frequent(view.iter().map(|t| t.start_station.as_str()))
                .map(owned_value),
            end_station: most_frequent(view.iter().map(|t| t.end_station.as_str())).map(owned_value),
            trip,
        }
    }
}

impl DurationStats {
    pub fn from_view(view: &TripView<'_>) -> Self {
        let durations: Vec<f64> = view.iter().map(|t| t.trip_duration).collect();
        let total_seconds = durations.iter().sum();
        let mean_seconds = if durations.is_empty() {
            None
        } else {
            Some(mean(&durations))
        };

        DurationStats {
            trip_count: durations.len(),
            total_seconds,
            mean_seconds,
        }
    }
}

impl UserStats {
    pub fn from_view(view: &TripView<'_>) -> Self {
        let user_types = counts(view.iter().filter_map(|t| t.user_type.as_deref()));

        let genders = view
            .columns
            .gender
            .then(|| counts(view.iter().filter_map(|t| t.gender.as_deref())));

        let birth_years = view.columns.birth_year.then(|| {
            let years: Vec<i32> = view.iter().filter_map(TripRecord::birth_year).collect();
            BirthYearStats {
                earliest: years.iter().min().copied(),
                most_recent: years.iter().max().copied(),
                most_common: most_frequent(years.iter().copied()).map(|p| p.value),
            }
        });

        UserStats {
            user_types,
            genders,
            birth_years,
        }
    }
}

impl TripReport {
    /// Computes every section over `view`.
    #[tracing::instrument(skip_all, fields(city = %view.city, rows = view.len()))]
    pub fn from_view(view: &TripView<'_>) -> Self {
        let report = TripReport {
            city: view.city,
            filter: view.filter,
            trip_count: view.len(),
            times: TimeStats::from_view(view),
            stations: StationStats::from_view(view),
            durations: DurationStats::from_view(view),
            users: UserStats::from_view(view),
        };
        debug!("Report computed");
        report
    }
}
