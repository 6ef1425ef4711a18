//! Core domain types for bikestat
//!
//! This module contains the fundamental types used throughout the bikestat
//! library. These types provide strong typing for common concepts like
//! cities, months, stations, and trip records.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used by all three source datasets
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A city with a known trip dataset
///
/// Each city maps to a fixed CSV file name; see [`City::data_file`].
///
/// # Examples
/// ```
/// use bikestat::types::City;
///
/// assert_eq!(City::Chicago.data_file(), "chicago.csv");
/// assert_eq!(City::parse("new york city"), Some(City::NewYorkCity));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All supported cities, in prompt order
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The fixed dataset file name for this city
    pub fn data_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Human-readable city name, as shown in prompts
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Parse a lowercased, trimmed prompt answer into a city
    ///
    /// Returns `None` for anything outside the fixed vocabulary.
    pub fn parse(input: &str) -> Option<City> {
        Self::ALL.iter().copied().find(|c| c.name() == input)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A month within the dataset generation period
///
/// The source datasets cover January through June only, so the month
/// vocabulary is restricted to those six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    /// All filterable months, in calendar order
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar number (January = 1)
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Look up a month by its 1-based calendar number
    pub fn from_number(n: u32) -> Option<Month> {
        Self::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    /// Lowercase month name, as used in prompts
    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    /// Parse a lowercased, trimmed prompt answer into a month
    pub fn parse(input: &str) -> Option<Month> {
        Self::ALL.iter().copied().find(|m| m.name() == input)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Full weekday name in title case, e.g. "Monday"
///
/// `chrono::Weekday`'s own `Display` abbreviates to "Mon"; reports and
/// filters use the full names.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a lowercased, trimmed full weekday name
///
/// Unlike `chrono`'s `FromStr`, abbreviations are rejected; the prompt
/// vocabulary is the seven full names only.
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|d| weekday_name(*d).to_lowercase() == input)
}

/// Strongly-typed station name wrapper
///
/// Station names are used as grouping keys for the popularity stats, so
/// they carry `Eq + Hash` and cheap cloning semantics.
///
/// # Examples
/// ```
/// use bikestat::types::Station;
///
/// let station = Station::new("Streeter Dr & Grand Ave");
/// assert_eq!(station.as_str(), "Streeter Dr & Grand Ave");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Station(String);

impl Station {
    /// Create a new Station from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Station {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single trip, immutable once loaded
///
/// The `month` and `weekday` fields are derived from `start_time` at load
/// time and never recomputed afterwards. `gender` and `birth_year` are only
/// populated for datasets that carry those columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Trip start timestamp
    pub start_time: NaiveDateTime,
    /// Trip end timestamp
    pub end_time: NaiveDateTime,
    /// Trip duration in seconds
    pub duration_secs: f64,
    /// Station where the trip started
    pub start_station: Station,
    /// Station where the trip ended
    pub end_station: Station,
    /// User category, e.g. "Subscriber" or "Customer"
    pub user_type: String,
    /// Rider gender, when the dataset records it
    pub gender: Option<String>,
    /// Rider birth year, when the dataset records it
    pub birth_year: Option<i32>,
    /// Derived: calendar month of `start_time` (1-based)
    pub month: u32,
    /// Derived: weekday of `start_time`
    pub weekday: Weekday,
}

impl TripRecord {
    /// Build a record, deriving the month and weekday columns from the
    /// start timestamp
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        duration_secs: f64,
        start_station: Station,
        end_station: Station,
        user_type: String,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            start_time,
            end_time,
            duration_secs,
            start_station,
            end_station,
            user_type,
            gender,
            birth_year,
        }
    }

    /// Hour of day the trip started (0-23)
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

/// An in-memory trip dataset for one city
///
/// Holds the loaded rows plus capability flags describing which optional
/// columns the source CSV carried. The table itself is never mutated after
/// loading; filtering produces borrowed views instead.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    rows: Vec<TripRecord>,
    has_gender: bool,
    has_birth_year: bool,
}

impl TripTable {
    /// Create a table from loaded rows and the source's column capabilities
    pub fn new(rows: Vec<TripRecord>, has_gender: bool, has_birth_year: bool) -> Self {
        Self {
            rows,
            has_gender,
            has_birth_year,
        }
    }

    /// All rows, in source order
    pub fn rows(&self) -> &[TripRecord] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the source dataset carried a gender column
    pub fn has_gender(&self) -> bool {
        self.has_gender
    }

    /// Whether the source dataset carried a birth year column
    pub fn has_birth_year(&self) -> bool {
        self.has_birth_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_city_parse() {
        assert_eq!(City::parse("chicago"), Some(City::Chicago));
        assert_eq!(City::parse("new york city"), Some(City::NewYorkCity));
        assert_eq!(City::parse("washington"), Some(City::Washington));
        assert_eq!(City::parse("boston"), None);
    }

    #[test]
    fn test_month_numbering() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::June.number(), 6);
        assert_eq!(Month::from_number(3), Some(Month::March));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(7), None);
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(parse_weekday("sunday"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("mon"), None);
        assert_eq!(parse_weekday("Sunday"), None); // input is pre-lowercased
    }

    #[test]
    fn test_derived_columns() {
        let trip = TripRecord::new(
            ts("2017-06-23 15:09:32"),
            ts("2017-06-23 15:14:53"),
            321.0,
            Station::new("A"),
            Station::new("B"),
            "Subscriber".to_string(),
            None,
            None,
        );
        assert_eq!(trip.month, 6);
        assert_eq!(trip.weekday, Weekday::Fri);
        assert_eq!(trip.start_hour(), 15);
        assert_eq!(
            trip.start_time.date(),
            NaiveDate::from_ymd_opt(2017, 6, 23).unwrap()
        );
    }
}
