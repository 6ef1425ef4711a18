//! Filtering module for trip tables
//!
//! Filters restrict a loaded [`TripTable`] by month and weekday. Both
//! criteria are optional and compose by conjunction; filtering is a pure
//! projection that borrows rows from the table rather than mutating it.
//!
//! # Examples
//!
//! ```
//! use bikestat::filters::TripFilter;
//! use bikestat::types::{Month, TripTable};
//! use chrono::Weekday;
//!
//! // Keep only March trips that started on a Sunday
//! let filter = TripFilter::new()
//!     .with_month(Month::March)
//!     .with_weekday(Weekday::Sun);
//!
//! let table = TripTable::default();
//! let view = filter.apply(&table);
//! assert!(view.is_empty());
//! ```

use crate::types::{Month, TripRecord, TripTable};
use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

/// Filter criteria for trip records
///
/// `None` means "all" for that dimension. Criteria are independently
/// optional and AND together.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    /// Month criterion (inclusive match on the derived month column)
    pub month: Option<Month>,
    /// Weekday criterion (match on the derived weekday column)
    pub weekday: Option<Weekday>,
}

impl TripFilter {
    /// Create a filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to trips starting in the given month
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Restrict to trips starting on the given weekday
    pub fn with_weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    /// Check if a trip passes the filter
    pub fn matches(&self, trip: &TripRecord) -> bool {
        if let Some(month) = self.month
            && trip.month != month.number()
        {
            return false;
        }

        if let Some(weekday) = self.weekday
            && trip.weekday != weekday
        {
            return false;
        }

        true
    }

    /// Apply the filter to a table, producing a borrowed view
    ///
    /// An empty result is valid; the table itself is never modified.
    pub fn apply<'a>(&self, table: &'a TripTable) -> TripView<'a> {
        let rows: Vec<&TripRecord> = table.rows().iter().filter(|t| self.matches(t)).collect();
        debug!(
            total = table.len(),
            kept = rows.len(),
            "applied trip filter"
        );
        TripView {
            rows,
            has_gender: table.has_gender(),
            has_birth_year: table.has_birth_year(),
        }
    }
}

/// A read-only row subset of a loaded table
///
/// Carries the table's optional-column capabilities so reporters can check
/// them without reaching back to the table. Lives for one session iteration.
#[derive(Debug, Clone)]
pub struct TripView<'a> {
    rows: Vec<&'a TripRecord>,
    has_gender: bool,
    has_birth_year: bool,
}

impl<'a> TripView<'a> {
    /// The matching rows, in table order
    pub fn rows(&self) -> &[&'a TripRecord] {
        &self.rows
    }

    /// Number of matching rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows matched
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

/// Filter settings echoed back to the user and into JSON output
#[derive(Debug, Serialize)]
pub struct FilterSummary {
    /// Month criterion name, or "all"
    pub month: String,
    /// Weekday criterion name, or "all"
    pub weekday: String,
}

impl From<&TripFilter> for FilterSummary {
    fn from(filter: &TripFilter) -> Self {
        Self {
            month: filter
                .month
                .map(|m| m.name().to_string())
                .unwrap_or_else(|| "all".to_string()),
            weekday: filter
                .weekday
                .map(|d| crate::types::weekday_name(d).to_string())
                .unwrap_or_else(|| "all".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Station, TIMESTAMP_FORMAT, TripRecord};
    use chrono::NaiveDateTime;

    fn trip(start: &str) -> TripRecord {
        let start_time = NaiveDateTime::parse_from_str(start, TIMESTAMP_FORMAT).unwrap();
        TripRecord::new(
            start_time,
            start_time + chrono::Duration::minutes(10),
            600.0,
            Station::new("A"),
            Station::new("B"),
            "Subscriber".to_string(),
            None,
            None,
        )
    }

    fn table() -> TripTable {
        TripTable::new(
            vec![
                trip("2017-01-02 08:00:00"), // Monday, January
                trip("2017-02-07 09:00:00"), // Tuesday, February
                trip("2017-03-05 10:00:00"), // Sunday, March
                trip("2017-01-09 11:00:00"), // Monday, January
                trip("2017-02-14 12:00:00"), // Tuesday, February
            ],
            false,
            false,
        )
    }

    #[test]
    fn test_unfiltered_view_keeps_everything() {
        let table = table();
        let view = TripFilter::new().apply(&table);
        assert_eq!(view.len(), table.len());
        assert_eq!(view.rows()[0], &table.rows()[0]);
    }

    #[test]
    fn test_month_filter() {
        let table = table();
        let view = TripFilter::new().with_month(Month::January).apply(&table);
        assert_eq!(view.len(), 2);
        assert!(view.rows().iter().all(|t| t.month == 1));
    }

    #[test]
    fn test_weekday_filter() {
        let table = table();
        let view = TripFilter::new().with_weekday(Weekday::Tue).apply(&table);
        assert_eq!(view.len(), 2);
        assert!(view.rows().iter().all(|t| t.weekday == Weekday::Tue));
    }

    #[test]
    fn test_criteria_compose_by_conjunction() {
        let table = table();
        let view = TripFilter::new()
            .with_month(Month::February)
            .with_weekday(Weekday::Tue)
            .apply(&table);
        assert_eq!(view.len(), 2);

        let view = TripFilter::new()
            .with_month(Month::February)
            .with_weekday(Weekday::Sun)
            .apply(&table);
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = table();
        let filter = TripFilter::new().with_month(Month::January);
        let once = filter.apply(&table);

        // Re-filtering the surviving rows changes nothing
        let twice: Vec<_> = once.rows().iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn test_view_inherits_capabilities() {
        let table = TripTable::new(vec![trip("2017-01-02 08:00:00")], true, false);
        let view = TripFilter::new().apply(&table);
        assert!(view.has_gender());
        assert!(!view.has_birth_year());
    }

    #[test]
    fn test_filter_summary() {
        let summary = FilterSummary::from(&TripFilter::new().with_month(Month::May));
        assert_eq!(summary.month, "may");
        assert_eq!(summary.weekday, "all");
    }
}
