//! Aggregation module for trip statistics
//!
//! This module computes the four independent report groups over a filtered
//! [`TripView`]: times of travel, station popularity, trip durations, and
//! user demographics. All four are pure reads over the view and can run in
//! any order.
//!
//! # Tie-breaking
//!
//! Every "most common" figure is a mode reduction. Ties are broken by first
//! occurrence in table order: if two values have the same count, the one
//! whose first row appears earlier wins. This is deliberate and stable
//! rather than left to hash-map iteration order.
//!
//! # Empty views
//!
//! An empty view is not an error. Every mode/min/max/mean result is an
//! `Option` that comes back `None` on an empty view, and the duration total
//! is 0; formatters render these as "no data" lines.
//!
//! # Examples
//!
//! ```
//! use bikestat::aggregation::duration_stats;
//! use bikestat::filters::TripFilter;
//! use bikestat::types::TripTable;
//!
//! let table = TripTable::default();
//! let view = TripFilter::new().apply(&table);
//! let stats = duration_stats(&view);
//! assert_eq!(stats.total_secs, 0.0);
//! assert_eq!(stats.mean_secs, None);
//! ```

use crate::filters::TripView;
use crate::types::{Month, Station};
use chrono::Weekday;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::warn;

/// Most common value of an iterator, ties broken by first occurrence
///
/// Returns `None` for an empty iterator. The returned value always occurs
/// at least once in the input.
pub fn mode<I, K>(items: I) -> Option<K>
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash,
{
    // key -> (count, index of first occurrence)
    let mut counts: HashMap<K, (usize, usize)> = HashMap::new();
    for (index, item) in items.into_iter().enumerate() {
        let entry = counts.entry(item).or_insert((0, index));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .min_by_key(|(_, (count, first))| (std::cmp::Reverse(*count), *first))
        .map(|(key, _)| key)
}

/// Count occurrences per value, ordered by descending count
///
/// Ties are broken by first occurrence in input order, matching [`mode`].
pub fn value_counts<I, K>(items: I) -> Vec<(K, u64)>
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash,
{
    let mut counts: HashMap<K, (u64, usize)> = HashMap::new();
    for (index, item) in items.into_iter().enumerate() {
        let entry = counts.entry(item).or_insert((0, index));
        entry.0 += 1;
    }

    let mut out: Vec<(K, (u64, usize))> = counts.into_iter().collect();
    out.sort_by_key(|(_, (count, first))| (std::cmp::Reverse(*count), *first));
    out.into_iter().map(|(key, (count, _))| (key, count)).collect()
}

/// Statistics on the most frequent times of travel
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Most common month of travel
    pub most_common_month: Option<Month>,
    /// Most common weekday of travel
    pub most_common_weekday: Option<Weekday>,
    /// Most common start hour (0-23)
    pub most_common_hour: Option<u32>,
}

/// Compute the time-of-travel statistics over a view
pub fn time_stats(view: &TripView<'_>) -> TimeStats {
    let most_common_month = mode(view.rows().iter().map(|t| t.month)).and_then(|m| {
        let month = Month::from_number(m);
        if month.is_none() {
            // Datasets only cover January-June; anything else is unexpected
            warn!(month = m, "most common month outside the dataset period");
        }
        month
    });

    TimeStats {
        most_common_month,
        most_common_weekday: mode(view.rows().iter().map(|t| t.weekday)),
        most_common_hour: mode(view.rows().iter().map(|t| t.start_hour())),
    }
}

/// Statistics on the most popular stations and trip
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    /// Most commonly used start station
    pub top_start: Option<Station>,
    /// Most commonly used end station
    pub top_end: Option<Station>,
    /// Most frequent (start, end) station combination
    pub top_trip: Option<(Station, Station)>,
}

/// Compute the station popularity statistics over a view
///
/// Station names are cloned into the grouping maps; they are short strings
/// and the distinct-station count is small relative to the row count.
pub fn station_stats(view: &TripView<'_>) -> StationStats {
    StationStats {
        top_start: mode(view.rows().iter().map(|t| &t.start_station)).cloned(),
        top_end: mode(view.rows().iter().map(|t| &t.end_station)).cloned(),
        top_trip: mode(
            view.rows()
                .iter()
                .map(|t| (&t.start_station, &t.end_station)),
        )
        .map(|(start, end)| (start.clone(), end.clone())),
    }
}

/// Total and average trip duration
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Sum of trip durations in seconds (0 for an empty view)
    pub total_secs: f64,
    /// Mean trip duration in seconds, `None` for an empty view
    pub mean_secs: Option<f64>,
    /// Number of trips the figures cover
    pub trips: usize,
}

/// Compute the trip duration statistics over a view
pub fn duration_stats(view: &TripView<'_>) -> DurationStats {
    let trips = view.len();
    let total_secs: f64 = view.rows().iter().map(|t| t.duration_secs).sum();
    let mean_secs = if trips > 0 {
        Some(total_secs / trips as f64)
    } else {
        None
    };

    DurationStats {
        total_secs,
        mean_secs,
        trips,
    }
}

/// Earliest, most recent, and most common rider birth year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    /// Earliest birth year (min)
    pub earliest: i32,
    /// Most recent birth year (max)
    pub most_recent: i32,
    /// Most common birth year (mode, first-occurrence tie-break)
    pub most_common: i32,
}

/// User demographic statistics
///
/// The gender and birth-year figures depend on optional dataset columns;
/// the `has_*` flags record whether the column existed at all, which
/// formatters distinguish from "column present but no matching rows".
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Trip counts per user type, descending
    pub user_types: Vec<(String, u64)>,
    /// Whether the dataset carried a gender column
    pub has_gender: bool,
    /// Trip counts per gender, descending; empty if the column is absent
    /// or no row has a value
    pub genders: Vec<(String, u64)>,
    /// Whether the dataset carried a birth year column
    pub has_birth_year: bool,
    /// Birth year figures; `None` if the column is absent or no row has
    /// a value
    pub birth_years: Option<BirthYearStats>,
}

/// Compute the user demographic statistics over a view
pub fn user_stats(view: &TripView<'_>) -> UserStats {
    let user_types = value_counts(view.rows().iter().map(|t| t.user_type.clone()));

    let genders = if view.has_gender() {
        value_counts(view.rows().iter().filter_map(|t| t.gender.clone()))
    } else {
        Vec::new()
    };

    let birth_years = if view.has_birth_year() {
        let years: Vec<i32> = view.rows().iter().filter_map(|t| t.birth_year).collect();
        match (years.iter().min(), years.iter().max(), mode(years.iter())) {
            (Some(&earliest), Some(&most_recent), Some(&most_common)) => Some(BirthYearStats {
                earliest,
                most_recent,
                most_common,
            }),
            _ => None,
        }
    } else {
        None
    };

    UserStats {
        user_types,
        has_gender: view.has_gender(),
        genders,
        has_birth_year: view.has_birth_year(),
        birth_years,
    }
}

/// All four report groups over one filtered view
///
/// Computed in one pass over the reporters so both formatters work from the
/// same figures.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Times-of-travel figures
    pub time: TimeStats,
    /// Station popularity figures
    pub stations: StationStats,
    /// Trip duration figures
    pub durations: DurationStats,
    /// User demographic figures
    pub users: UserStats,
    /// Number of rows the report covers
    pub rows: usize,
}

impl SummaryReport {
    /// Run all four reporters over a view
    pub fn from_view(view: &TripView<'_>) -> Self {
        Self {
            time: time_stats(view),
            stations: station_stats(view),
            durations: duration_stats(view),
            users: user_stats(view),
            rows: view.len(),
        }
    }
}
