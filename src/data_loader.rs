//! Data loader module for city trip datasets
//!
//! This module maps city keys to their fixed CSV files, parses the rows,
//! and derives the month and weekday columns from each trip's start time.
//!
//! Two of the three datasets (chicago, new york city) carry `Gender` and
//! `Birth Year` columns; washington does not. Column presence is detected
//! from the header row and recorded on the resulting [`TripTable`] so that
//! reporters can check the capability before computing dependent stats.
//!
//! # Examples
//!
//! ```no_run
//! use bikestat::data_loader::DataLoader;
//! use bikestat::types::City;
//!
//! # fn example() -> bikestat::Result<()> {
//! let loader = DataLoader::new();
//! let table = loader.load_city(City::Chicago)?;
//! println!("loaded {} trips", table.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{BikestatError, Result};
use crate::types::{City, Station, TIMESTAMP_FORMAT, TripRecord, TripTable};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A trip row as it appears in the source CSV
///
/// Extra columns (the files start with an unnamed index column) are ignored
/// by header-based deserialization. `Birth Year` cells are float-formatted
/// in the source files (e.g. `1992.0`), so they deserialize as `f64` first.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    duration_secs: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Loader for the fixed per-city trip datasets
///
/// Dataset file names are fixed per city; only the directory they are
/// resolved against is configurable.
pub struct DataLoader {
    /// Directory the per-city CSV files are resolved against
    data_dir: PathBuf,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    /// Create a loader resolving datasets against the current directory
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }

    /// Set the directory to resolve dataset files against
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// The path the given city's dataset is expected at
    pub fn dataset_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.data_file())
    }

    /// Load the full trip table for a city
    ///
    /// Parses every row, deriving the month and weekday columns from the
    /// start timestamp, and records which optional columns the file carried.
    ///
    /// # Errors
    ///
    /// Returns [`BikestatError::DatasetUnavailable`] if the city's file does
    /// not exist, and [`BikestatError::Parse`] (with file context) for
    /// malformed rows or timestamps. Both are fatal for the current session
    /// iteration.
    pub fn load_city(&self, city: City) -> Result<TripTable> {
        let path = self.dataset_path(city);
        if !path.exists() {
            return Err(BikestatError::DatasetUnavailable { city, path });
        }

        debug!("loading dataset for {city} from {}", path.display());
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)?;

        let headers = reader.headers()?.clone();
        let has_gender = headers.iter().any(|h| h == "Gender");
        let has_birth_year = headers.iter().any(|h| h == "Birth Year");

        let mut rows = Vec::new();
        for result in reader.deserialize::<RawTrip>() {
            let raw = result.map_err(|e| BikestatError::Parse {
                file: path.clone(),
                error: e.to_string(),
            })?;
            rows.push(Self::into_record(raw, &path)?);
        }

        info!(
            city = %city,
            rows = rows.len(),
            has_gender,
            has_birth_year,
            "loaded dataset"
        );
        Ok(TripTable::new(rows, has_gender, has_birth_year))
    }

    /// Convert a raw CSV row into a domain record
    fn into_record(raw: RawTrip, path: &Path) -> Result<TripRecord> {
        let start_time = parse_timestamp(&raw.start_time, path)?;
        let end_time = parse_timestamp(&raw.end_time, path)?;
        // Source files store birth years as floats ("1992.0")
        let birth_year = raw.birth_year.map(|y| y as i32);

        Ok(TripRecord::new(
            start_time,
            end_time,
            raw.duration_secs,
            Station::new(raw.start_station),
            Station::new(raw.end_station),
            raw.user_type,
            raw.gender,
            birth_year,
        ))
    }
}

/// Parse a timestamp cell using the datasets' fixed format
fn parse_timestamp(value: &str, path: &Path) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| BikestatError::Parse {
        file: path.to_path_buf(),
        error: format!("bad timestamp {value:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Write;

    const FULL_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";
    const BARE_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

    fn write_dataset(dir: &Path, city: City, lines: &[&str]) {
        let mut file = std::fs::File::create(dir.join(city.data_file())).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
    }

    #[test]
    fn test_load_with_optional_columns() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            City::Chicago,
            &[
                FULL_HEADER,
                "0,2017-06-23 15:09:32,2017-06-23 15:14:53,321.0,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0",
                "1,2017-05-25 18:19:03,2017-05-25 18:45:53,1610.0,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0",
                "2,2017-01-04 08:27:49,2017-01-04 08:34:45,416.0,May St & Taylor St,Wood St & Taylor St,Subscriber,,",
            ],
        );

        let loader = DataLoader::new().with_data_dir(dir.path());
        let table = loader.load_city(City::Chicago).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.has_gender());
        assert!(table.has_birth_year());

        let first = &table.rows()[0];
        assert_eq!(first.month, 6);
        assert_eq!(first.weekday, Weekday::Fri);
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.gender.as_deref(), Some("Male"));

        // Empty optional cells load as None, not as an error
        let third = &table.rows()[2];
        assert_eq!(third.gender, None);
        assert_eq!(third.birth_year, None);
    }

    #[test]
    fn test_load_without_optional_columns() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            City::Washington,
            &[
                BARE_HEADER,
                "0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber",
            ],
        );

        let loader = DataLoader::new().with_data_dir(dir.path());
        let table = loader.load_city(City::Washington).unwrap();

        assert_eq!(table.len(), 1);
        assert!(!table.has_gender());
        assert!(!table.has_birth_year());
        assert_eq!(table.rows()[0].gender, None);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new().with_data_dir(dir.path());
        let err = loader.load_city(City::NewYorkCity).unwrap_err();
        assert!(matches!(
            err,
            BikestatError::DatasetUnavailable {
                city: City::NewYorkCity,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_timestamp_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            City::Chicago,
            &[
                BARE_HEADER,
                "0,not-a-timestamp,2017-06-23 15:14:53,321.0,A,B,Subscriber",
            ],
        );

        let loader = DataLoader::new().with_data_dir(dir.path());
        let err = loader.load_city(City::Chicago).unwrap_err();
        match err {
            BikestatError::Parse { file, error } => {
                assert!(file.ends_with("chicago.csv"));
                assert!(error.contains("not-a-timestamp"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
