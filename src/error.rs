//! Error types for bikestat
//!
//! This module defines the error types used throughout the bikestat library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use bikestat::error::{BikestatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikestatError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::City;

/// Main error type for bikestat operations
///
/// This enum encompasses all possible errors that can occur while loading
/// and analyzing trip datasets, from IO errors to parsing failures.
#[derive(Error, Debug)]
pub enum BikestatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset file for a city could not be found
    #[error("no dataset available for {city}: {path} not found")]
    DatasetUnavailable {
        /// The requested city
        city: City,
        /// The path that was searched
        path: PathBuf,
    },

    /// Parse error with file context
    #[error("parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },
}

/// Convenience type alias for Results in bikestat
///
/// This type alias makes it easier to work with Results throughout
/// the codebase by providing a default error type.
pub type Result<T> = std::result::Result<T, BikestatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BikestatError::DatasetUnavailable {
            city: City::Chicago,
            path: PathBuf::from("chicago.csv"),
        };
        assert_eq!(
            error.to_string(),
            "no dataset available for chicago: chicago.csv not found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let bikestat_error: BikestatError = io_error.into();
        assert!(matches!(bikestat_error, BikestatError::Io(_)));
    }

    #[test]
    fn test_parse_error_display() {
        let error = BikestatError::Parse {
            file: PathBuf::from("new_york_city.csv"),
            error: "bad start time".to_string(),
        };
        assert!(error.to_string().contains("new_york_city.csv"));
        assert!(error.to_string().contains("bad start time"));
    }
}
