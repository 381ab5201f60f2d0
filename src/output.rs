//! Console rendering of trip statistics.
//!
//! Supports the sectioned text report shown during an interactive session
//! and JSON serialization of a whole [`TripReport`].

use anyhow::Result;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

use crate::filter::TripView;
use crate::stats::{
    DurationStats, Popular, StationStats, TimeStats, TripReport, UserStats, ValueCount,
};

pub const SEPARATOR_WIDTH: usize = 40;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Formats seconds as `Xd Yh Zm Ws`, dropping any fractional second.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).trunc() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;
    format!("{days}d {hours}h {minutes}m {secs}s")
}

fn popular<T: Display>(value: &Option<Popular<T>>) -> String {
    match value {
        Some(p) => format!("{} (count: {})", p.value, p.count),
        None => "no data".to_string(),
    }
}

fn write_counts<W: Write>(out: &mut W, counts: &[ValueCount]) -> Result<()> {
    if counts.is_empty() {
        writeln!(out, "  no data")?;
    }
    for c in counts {
        writeln!(out, "  {}: {}", c.value, c.count)?;
    }
    Ok(())
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> Result<()> {
    writeln!(out, "Most common month: {}", popular(&stats.month))?;
    writeln!(out, "Most common day: {}", popular(&stats.day))?;
    writeln!(out, "Most common hour: {}", popular(&stats.hour))?;
    Ok(())
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> Result<()> {
    writeln!(
        out,
        "Most common start station: {}",
        popular(&stats.start_station)
    )?;
    writeln!(out, "Most common end station: {}", popular(&stats.end_station))?;

    let trip = match &stats.trip {
        Some(p) => format!("{} -> {} (count: {})", p.value.start, p.value.end, p.count),
        None => "no data".to_string(),
    };
    writeln!(out, "Most common start/end combination: {trip}")?;
    Ok(())
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> Result<()> {
    writeln!(out, "Total: {}", format_duration(stats.total_seconds))?;
    match stats.mean_seconds {
        Some(mean) => writeln!(out, "Mean: {}", format_duration(mean))?,
        None => writeln!(out, "Mean: no data")?,
    }
    Ok(())
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> Result<()> {
    writeln!(out, "User types:")?;
    write_counts(out, &stats.user_types)?;
    writeln!(out, "{}", separator())?;

    match &stats.genders {
        Some(genders) => {
            writeln!(out, "Gender:")?;
            write_counts(out, genders)?;
            writeln!(out, "{}", separator())?;
        }
        None => writeln!(out, "Gender data not available")?,
    }

    match &stats.birth_years {
        Some(years) => {
            let year = |y: Option<i32>| y.map_or_else(|| "no data".to_string(), |y| y.to_string());
            writeln!(out, "Birth year stats")?;
            writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH / 2))?;
            writeln!(out, "Earliest: {}", year(years.earliest))?;
            writeln!(out, "Most recent: {}", year(years.most_recent))?;
            writeln!(out, "Most common: {}", year(years.most_common))?;
        }
        None => writeln!(out, "Birth year data not available")?,
    }
    Ok(())
}

/// Runs `compute` under a heading, renders its result and reports the
/// elapsed time.
pub fn write_timed<W, T, C, R>(out: &mut W, heading: &str, compute: C, render: R) -> Result<T>
where
    W: Write,
    C: FnOnce() -> T,
    R: FnOnce(&mut W, &T) -> Result<()>,
{
    writeln!(out, "\n{heading}\n")?;
    let started = Instant::now();
    let value = compute();
    render(&mut *out, &value)?;
    let elapsed = started.elapsed();
    debug!(section = heading, elapsed_ms = elapsed.as_millis() as u64, "Section rendered");
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", separator())?;
    Ok(value)
}

/// Writes every statistics section for `view`, each one timed.
pub fn write_report<W: Write>(out: &mut W, view: &TripView<'_>) -> Result<TripReport> {
    writeln!(
        out,
        "Exploring {} trips in {} (month: {}, day: {})",
        view.len(),
        view.city,
        view.filter.month,
        view.filter.day
    )?;
    writeln!(out, "{}", separator())?;

    let times = write_timed(
        out,
        "Calculating The Most Frequent Times of Travel...",
        || TimeStats::from_view(view),
        write_time_stats,
    )?;
    let stations = write_timed(
        out,
        "Calculating The Most Popular Stations and Trip...",
        || StationStats::from_view(view),
        write_station_stats,
    )?;
    let durations = write_timed(
        out,
        "Calculating Trip Duration...",
        || DurationStats::from_view(view),
        write_duration_stats,
    )?;
    let users = write_timed(
        out,
        "Calculating User Stats...",
        || UserStats::from_view(view),
        write_user_stats,
    )?;

    Ok(TripReport {
        city: view.city,
        filter: view.filter,
        trip_count: view.len(),
        times,
        stations,
        durations,
        users,
    })
}

/// Writes any serializable value as pretty-printed JSON.
pub fn print_json<W: Write>(out: &mut W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::filter::TripFilter;
    use crate::loader::load_from_reader;
    use crate::stats::BirthYearStats;

    const WASHINGTON: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-05 07:00:00,2017-06-05 07:08:10,490.5,X,Y,Subscriber
2017-06-06 07:00:00,2017-06-06 07:20:00,1200.25,Y,X,Customer
";

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0d 0h 0m 0s");
        assert_eq!(format_duration(59.9), "0d 0h 0m 59s");
        assert_eq!(format_duration(3_661.0), "0d 1h 1m 1s");
        assert_eq!(format_duration(90_061.0), "1d 1h 1m 1s");
    }

    #[test]
    fn test_missing_demographics_are_not_available() {
        let stats = UserStats {
            user_types: vec![ValueCount {
                value: "Subscriber".to_string(),
                count: 4,
            }],
            genders: None,
            birth_years: None,
        };
        let text = render(|out| write_user_stats(out, &stats));

        assert!(text.contains("  Subscriber: 4"));
        assert!(text.contains("Gender data not available"));
        assert!(text.contains("Birth year data not available"));
    }

    #[test]
    fn test_birth_year_block() {
        let stats = UserStats {
            user_types: vec![],
            genders: Some(vec![]),
            birth_years: Some(BirthYearStats {
                earliest: Some(1899),
                most_recent: Some(2001),
                most_common: Some(1989),
            }),
        };
        let text = render(|out| write_user_stats(out, &stats));

        assert!(text.contains("Earliest: 1899"));
        assert!(text.contains("Most recent: 2001"));
        assert!(text.contains("Most common: 1989"));
        assert!(!text.contains("not available"));
    }

    #[test]
    fn test_empty_time_stats_say_no_data() {
        let stats = TimeStats {
            month: None,
            day: None,
            hour: None,
        };
        let text = render(|out| write_time_stats(out, &stats));
        assert_eq!(text.matches("no data").count(), 3);
    }

    #[test]
    fn test_write_report_sections() {
        let dataset = load_from_reader(City::Washington, WASHINGTON.as_bytes()).unwrap();
        let view = TripFilter::default().apply(&dataset);

        let mut buf = Vec::new();
        let report = write_report(&mut buf, &view).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(report.trip_count, 2);
        assert_eq!(text.matches("This took").count(), 4);
        assert!(text.contains("Most common start/end combination: X -> Y (count: 1)"));
        assert!(text.contains("Total: 0d 0h 28m 10s"));
        assert!(text.contains("Mean: 0d 0h 14m 5s"));
        assert!(text.contains("Gender data not available"));
    }

    #[test]
    fn test_print_json() {
        let dataset = load_from_reader(City::Washington, WASHINGTON.as_bytes()).unwrap();
        let report = TripReport::from_view(&TripFilter::default().apply(&dataset));

        let text = render(|out| print_json(out, &report));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["city"], "washington");
        assert_eq!(value["trip_count"], 2);
        assert_eq!(value["filter"]["month"], "all");
        assert!(value["users"]["genders"].is_null());
    }
}
