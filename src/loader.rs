//! Loads a city's trip CSV into memory.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::city::City;
use crate::trip::TripRecord;

/// Which of the optional demographic columns a file carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Columns {
    pub gender: bool,
    pub birth_year: bool,
}

impl Columns {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h.trim().eq_ignore_ascii_case(name));
        Columns {
            gender: has("Gender"),
            birth_year: has("Birth Year"),
        }
    }
}

/// Every trip recorded for one city, in file order.
#[derive(Debug, Clone)]
pub struct CityDataset {
    pub city: City,
    pub columns: Columns,
    pub trips: Vec<TripRecord>,
}

impl CityDataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Reads `<data_dir>/<city file>`.
///
/// # Errors
///
/// Returns an error if the file is missing or any row fails to parse.
#[tracing::instrument(skip(data_dir), fields(city = %city))]
pub fn load_city(city: City, data_dir: &Path) -> Result<CityDataset> {
    let path = city.data_path(data_dir);
    debug!(path = %path.display(), "Opening city data");

    let file =
        File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let dataset = load_from_reader(city, file)
        .with_context(|| format!("failed to read trips from {}", path.display()))?;

    info!(
        rows = dataset.len(),
        gender = dataset.columns.gender,
        birth_year = dataset.columns.birth_year,
        "City data loaded"
    );
    Ok(dataset)
}

/// Parses trip rows from any CSV source with a header line.
pub fn load_from_reader<R: Read>(city: City, reader: R) -> Result<CityDataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?);

    let mut trips = Vec::new();
    for result in rdr.deserialize() {
        let trip: TripRecord = result?;
        trips.push(trip);
    }

    Ok(CityDataset {
        city,
        columns,
        trips,
    })
}
