//! CLI interface for bikestat
//!
//! Two ways in: run with no `--city` flag for the interactive prompt flow,
//! or pass `--city` (plus optional `--month` / `--day`) for a one-shot
//! report suitable for scripting.
//!
//! # Example
//!
//! ```bash
//! # Interactive session over datasets in the current directory
//! bikestat
//!
//! # One-shot report, March Sundays in Chicago, as JSON
//! bikestat --city chicago --month march --day sunday --json
//! ```

use crate::types::{City, Month};
use chrono::Weekday;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Explore US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(name = "bikestat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// City to analyze; omit to choose interactively
    #[arg(long, value_enum)]
    pub city: Option<City>,

    /// Month to filter by
    #[arg(long, value_enum, default_value = "all")]
    pub month: MonthArg,

    /// Weekday to filter by
    #[arg(long, value_enum, default_value = "all")]
    pub day: DayArg,

    /// Output the summary as JSON (one-shot mode only)
    #[arg(long)]
    pub json: bool,

    /// Directory containing the per-city CSV files
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Suppress informational output (warnings and errors only)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Month filter vocabulary: the six dataset months plus "all"
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MonthArg {
    All,
    January,
    February,
    March,
    April,
    May,
    June,
}

impl MonthArg {
    /// Convert to a filter criterion; `All` means no constraint
    pub fn to_month(self) -> Option<Month> {
        match self {
            MonthArg::All => None,
            MonthArg::January => Some(Month::January),
            MonthArg::February => Some(Month::February),
            MonthArg::March => Some(Month::March),
            MonthArg::April => Some(Month::April),
            MonthArg::May => Some(Month::May),
            MonthArg::June => Some(Month::June),
        }
    }
}

/// Weekday filter vocabulary: the seven weekdays plus "all"
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayArg {
    All,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayArg {
    /// Convert to a filter criterion; `All` means no constraint
    pub fn to_weekday(self) -> Option<Weekday> {
        match self {
            DayArg::All => None,
            DayArg::Monday => Some(Weekday::Mon),
            DayArg::Tuesday => Some(Weekday::Tue),
            DayArg::Wednesday => Some(Weekday::Wed),
            DayArg::Thursday => Some(Weekday::Thu),
            DayArg::Friday => Some(Weekday::Fri),
            DayArg::Saturday => Some(Weekday::Sat),
            DayArg::Sunday => Some(Weekday::Sun),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "bikestat",
            "--city",
            "new-york-city",
            "--month",
            "march",
            "--day",
            "sunday",
            "--json",
        ]);
        assert_eq!(cli.city, Some(City::NewYorkCity));
        assert_eq!(cli.month.to_month(), Some(Month::March));
        assert_eq!(cli.day.to_weekday(), Some(Weekday::Sun));
        assert!(cli.json);
    }

    #[test]
    fn test_defaults_mean_no_constraint() {
        let cli = Cli::parse_from(["bikestat"]);
        assert_eq!(cli.city, None);
        assert_eq!(cli.month.to_month(), None);
        assert_eq!(cli.day.to_weekday(), None);
        assert!(!cli.json);
        assert_eq!(cli.data_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_city_rejected() {
        let result = Cli::try_parse_from(["bikestat", "--city", "boston"]);
        assert!(result.is_err());
    }
}
