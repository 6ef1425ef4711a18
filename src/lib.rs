//! bikestat - Explore US bikeshare trip data from local CSV files
//!
//! This library provides functionality to:
//! - Load per-city trip datasets and derive month/weekday columns
//! - Filter trips by month and weekday
//! - Compute travel-time, station, duration, and demographic statistics
//! - Generate reports in table and JSON formats
//! - Page through raw filtered rows
//!
//! # Examples
//!
//! ```no_run
//! use bikestat::{
//!     aggregation::SummaryReport,
//!     data_loader::DataLoader,
//!     filters::TripFilter,
//!     types::{City, Month},
//! };
//!
//! fn main() -> bikestat::Result<()> {
//!     let loader = DataLoader::new();
//!     let table = loader.load_city(City::Chicago)?;
//!
//!     let view = TripFilter::new().with_month(Month::March).apply(&table);
//!     let report = SummaryReport::from_view(&view);
//!     println!("{} trips in March", report.rows);
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod error;
pub mod filters;
pub mod output;
pub mod pagination;
pub mod prompt;
pub mod types;

// Re-export commonly used types
pub use error::{BikestatError, Result};
pub use types::{City, Month, Station, TripRecord, TripTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
