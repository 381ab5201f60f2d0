//! Pages through the raw rows of a filtered view.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::filter::TripView;
use crate::loader::Columns;
use crate::prompt::Prompter;
use crate::trip::TripRecord;

pub const PAGE_SIZE: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn header(columns: Columns) -> String {
    let mut fields = vec![
        "row",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if columns.gender {
        fields.push("Gender");
    }
    if columns.birth_year {
        fields.push("Birth Year");
    }
    fields.extend(["month", "day_of_week", "hour"]);
    fields.join(" | ")
}

/// One raw row, including the derived month, weekday and hour.
pub fn format_row(row: usize, trip: &TripRecord, columns: Columns) -> String {
    let mut fields = vec![
        row.to_string(),
        trip.start_time.format(DATE_FORMAT).to_string(),
        trip.end_time.format(DATE_FORMAT).to_string(),
        trip.trip_duration.to_string(),
        trip.start_station.clone(),
        trip.end_station.clone(),
        trip.user_type.clone().unwrap_or_default(),
    ];
    if columns.gender {
        fields.push(trip.gender.clone().unwrap_or_default());
    }
    if columns.birth_year {
        fields.push(trip.birth_year().map(|y| y.to_string()).unwrap_or_default());
    }
    fields.push(trip.month_name().to_string());
    fields.push(trip.day_name().to_string());
    fields.push(trip.hour().to_string());
    fields.join(" | ")
}

/// Shows [`PAGE_SIZE`] rows each time the user answers "yes".
///
/// Stops at the first other answer or once every row has been printed.
/// Returns the number of rows shown.
pub fn display_raw_data<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    view: &TripView<'_>,
) -> Result<usize> {
    let rows = view.rows();
    let mut start = 0;

    while start < rows.len() {
        if !prompter.confirm("\nWould you like to see 5 rows of raw data? Enter yes/no.\n")? {
            break;
        }

        let end = (start + PAGE_SIZE).min(rows.len());
        let out = prompter.output();
        writeln!(out, "{}", header(view.columns))?;
        for (i, trip) in rows[start..end].iter().enumerate() {
            writeln!(out, "{}", format_row(start + i, trip, view.columns))?;
        }
        start = end;

        if start >= rows.len() {
            writeln!(out, "\nNo more data to display.")?;
        }
    }

    debug!(shown = start, total = rows.len(), "Raw data viewer closed");
    Ok(start)
}
