//! Output formatting module for bikestat
//!
//! This module provides formatters for displaying trip statistics in
//! different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! Both formatters work from the same [`SummaryReport`], so everything the
//! table output shows is present in the JSON output too. Empty-view figures
//! render as "no data" cells in tables and as `null` in JSON.

use crate::aggregation::SummaryReport;
use crate::filters::FilterSummary;
use crate::types::{City, TripRecord, weekday_name};
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;

/// Trait for output formatters
///
/// Implementations render the summary report and raw-row pages; the
/// interactive loop and the one-shot mode both go through this interface.
pub trait OutputFormatter {
    /// Format the four statistic groups for one filtered view
    fn format_summary(&self, city: City, filter: &FilterSummary, report: &SummaryReport)
    -> String;

    /// Format one page of raw rows
    fn format_rows(&self, rows: &[&TripRecord]) -> String;
}

/// Table formatter for human-readable output
///
/// Produces section-per-reporter ASCII tables. Numbers carry thousands
/// separators; section headers are colored when stdout is a terminal.
pub struct TableFormatter {
    /// Whether to color section headers
    color: bool,
}

impl TableFormatter {
    /// Create a TableFormatter, coloring headers only on a terminal
    pub fn new() -> Self {
        Self {
            color: is_terminal::is_terminal(std::io::stdout()),
        }
    }

    /// Create a TableFormatter with explicit color behavior (for tests)
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Section header line
    fn section(&self, title: &str) -> String {
        if self.color {
            format!("{}", title.bold().cyan())
        } else {
            title.to_string()
        }
    }

    /// Uppercase the first letter of a vocabulary word for display
    fn title_case(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    fn time_section(&self, report: &SummaryReport) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.add_row(row![
            "Most common month",
            report
                .time
                .most_common_month
                .map(|m| Self::title_case(m.name()))
                .unwrap_or_else(|| "no data".to_string())
        ]);
        table.add_row(row![
            "Most common day of week",
            report
                .time
                .most_common_weekday
                .map(|d| weekday_name(d).to_string())
                .unwrap_or_else(|| "no data".to_string())
        ]);
        table.add_row(row![
            "Most common start hour",
            report
                .time
                .most_common_hour
                .map(|h| format!("{h:02}:00"))
                .unwrap_or_else(|| "no data".to_string())
        ]);
        format!(
            "{}\n{}",
            self.section("Most Frequent Times of Travel"),
            table
        )
    }

    fn station_section(&self, report: &SummaryReport) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.add_row(row![
            "Most common start station",
            report
                .stations
                .top_start
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "no data".to_string())
        ]);
        table.add_row(row![
            "Most common end station",
            report
                .stations
                .top_end
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "no data".to_string())
        ]);
        table.add_row(row![
            "Most common trip",
            report
                .stations
                .top_trip
                .as_ref()
                .map(|(from, to)| format!("{from} -> {to}"))
                .unwrap_or_else(|| "no data".to_string())
        ]);
        format!(
            "{}\n{}",
            self.section("Most Popular Stations and Trip"),
            table
        )
    }

    fn duration_section(&self, report: &SummaryReport) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.add_row(row![
            "Total travel time",
            format!(
                "{} seconds",
                Self::format_number(report.durations.total_secs.round() as u64)
            )
        ]);
        table.add_row(row![
            "Average travel time",
            report
                .durations
                .mean_secs
                .map(|m| format!("{m:.1} seconds"))
                .unwrap_or_else(|| "no data".to_string())
        ]);
        format!("{}\n{}", self.section("Trip Duration"), table)
    }

    fn user_section(&self, report: &SummaryReport) -> String {
        let users = &report.users;
        let mut out = format!("{}\n", self.section("User Stats"));

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "User Type", b -> "Trips"]);
        for (user_type, count) in &users.user_types {
            table.add_row(row![user_type, r -> Self::format_number(*count)]);
        }
        if users.user_types.is_empty() {
            table.add_row(row!["no data", r -> "-"]);
        }
        out.push_str(&table.to_string());

        if users.has_gender {
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
            table.set_titles(row![b -> "Gender", b -> "Trips"]);
            for (gender, count) in &users.genders {
                table.add_row(row![gender, r -> Self::format_number(*count)]);
            }
            if users.genders.is_empty() {
                table.add_row(row!["no data", r -> "-"]);
            }
            out.push_str(&table.to_string());
        } else {
            out.push_str("No gender data available for the chosen city\n");
        }

        if users.has_birth_year {
            match &users.birth_years {
                Some(years) => {
                    let mut table = Table::new();
                    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
                    table.add_row(row!["Earliest birth year", years.earliest]);
                    table.add_row(row!["Most recent birth year", years.most_recent]);
                    table.add_row(row!["Most common birth year", years.most_common]);
                    out.push_str(&table.to_string());
                }
                None => out.push_str("No birth year values in the filtered data\n"),
            }
        } else {
            out.push_str("No birth year data available for the chosen city\n");
        }

        out
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_summary(
        &self,
        city: City,
        filter: &FilterSummary,
        report: &SummaryReport,
    ) -> String {
        let header = format!(
            "{} ({} trips, month: {}, day: {})",
            Self::title_case(city.name()),
            Self::format_number(report.rows as u64),
            filter.month,
            filter.weekday,
        );

        [
            self.section(&header),
            self.time_section(report),
            self.station_section(report),
            self.duration_section(report),
            self.user_section(report),
        ]
        .join("\n")
    }

    fn format_rows(&self, rows: &[&TripRecord]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> "Start Time",
            b -> "End Time",
            b -> "Duration (s)",
            b -> "Start Station",
            b -> "End Station",
            b -> "User Type",
            b -> "Gender",
            b -> "Birth Year"
        ]);

        for trip in rows {
            table.add_row(row![
                trip.start_time.format("%Y-%m-%d %H:%M:%S"),
                trip.end_time.format("%Y-%m-%d %H:%M:%S"),
                r -> format!("{:.0}", trip.duration_secs),
                trip.start_station,
                trip.end_station,
                trip.user_type,
                trip.gender.as_deref().unwrap_or("-"),
                trip.birth_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ]);
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_summary(
        &self,
        city: City,
        filter: &FilterSummary,
        report: &SummaryReport,
    ) -> String {
        let output = json!({
            "city": city.name(),
            "filters": {
                "month": filter.month,
                "weekday": filter.weekday,
            },
            "trips": report.rows,
            "time": {
                "most_common_month": report.time.most_common_month.map(|m| m.name()),
                "most_common_weekday": report.time.most_common_weekday.map(weekday_name),
                "most_common_hour": report.time.most_common_hour,
            },
            "stations": {
                "most_common_start": report.stations.top_start.as_ref().map(|s| s.as_str()),
                "most_common_end": report.stations.top_end.as_ref().map(|s| s.as_str()),
                "most_common_trip": report.stations.top_trip.as_ref().map(|(from, to)| json!({
                    "start": from.as_str(),
                    "end": to.as_str(),
                })),
            },
            "duration": {
                "total_seconds": report.durations.total_secs,
                "mean_seconds": report.durations.mean_secs,
            },
            "users": {
                "user_types": report.users.user_types.iter()
                    .map(|(k, v)| json!({ "user_type": k, "trips": v }))
                    .collect::<Vec<_>>(),
                "genders": if report.users.has_gender {
                    Some(report.users.genders.iter()
                        .map(|(k, v)| json!({ "gender": k, "trips": v }))
                        .collect::<Vec<_>>())
                } else {
                    None
                },
                "birth_years": if report.users.has_birth_year {
                    report.users.birth_years.map(|y| json!({
                        "earliest": y.earliest,
                        "most_recent": y.most_recent,
                        "most_common": y.most_common,
                    }))
                } else {
                    None
                },
            },
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_rows(&self, rows: &[&TripRecord]) -> String {
        let output = rows
            .iter()
            .map(|trip| {
                json!({
                    "start_time": trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "end_time": trip.end_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "duration_seconds": trip.duration_secs,
                    "start_station": trip.start_station.as_str(),
                    "end_station": trip.end_station.as_str(),
                    "user_type": trip.user_type,
                    "gender": trip.gender,
                    "birth_year": trip.birth_year,
                })
            })
            .collect::<Vec<_>>();

        serde_json::to_string_pretty(&output).unwrap()
    }
}

/// Get the appropriate formatter based on output format preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}
