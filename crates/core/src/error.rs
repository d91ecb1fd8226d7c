//! Error types for vestio operations.
//!
//! This module defines the main error type [`VestioError`] which represents
//! all possible errors that can occur while fetching catalog pages,
//! transforming scraped records, and writing to sinks.
//!
//! # Example
//!
//! ```rust
//! use vestio_core::{VestioError, Result};
//!
//! fn check_batch(records: &[String]) -> Result<()> {
//!     if records.is_empty() {
//!         return Err(VestioError::EmptyBatch);
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for the catalog ETL pipeline.
///
/// Fetch errors are scoped to a single page and never abort a run; the
/// collector downgrades them to per-page failures. `EmptyBatch` and
/// `NoValidRecords` are the two terminal transform conditions and are
/// fatal to the run. Sink variants are only available when the matching
/// feature is enabled.
#[derive(Error, Debug)]
pub enum VestioError {
    /// A page request failed after exhausting the retry budget.
    ///
    /// Carries the URL and the last underlying cause. Non-2xx responses
    /// count as failed attempts the same as transport errors.
    #[cfg(feature = "fetch")]
    #[error("request for {url} failed after {attempts} attempts: {source}")]
    Fetch {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request errors outside the per-page retry loop.
    #[cfg(any(feature = "fetch", feature = "sheets"))]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// A raw record carried a timestamp that is not ISO-8601.
    #[error("Invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The transform step received no records at all.
    #[error("No records to transform")]
    EmptyBatch,

    /// Every record was rejected by the validity filter.
    #[error("No valid records after filtering")]
    NoValidRecords,

    /// File I/O errors from sink writers.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization or write errors.
    #[cfg(feature = "csv")]
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// The Sheets API rejected a clear or update call.
    #[cfg(feature = "sheets")]
    #[error("Spreadsheet update failed with status {status}: {message}")]
    Sheets { status: u16, message: String },

    /// Postgres connection or statement errors.
    #[cfg(feature = "postgres")]
    #[error("Database write failed: {0}")]
    Postgres(#[from] postgres::Error),
}

/// Result type alias for VestioError.
///
/// This is a convenience alias for `std::result::Result<T, VestioError>`.
pub type Result<T> = std::result::Result<T, VestioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VestioError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_terminal_transform_errors() {
        assert!(VestioError::EmptyBatch.to_string().contains("No records"));
        assert!(VestioError::NoValidRecords.to_string().contains("No valid records"));
    }

    #[test]
    fn test_timestamp_error_carries_value() {
        let source = chrono::NaiveDateTime::parse_from_str("garbage", "%Y-%m-%dT%H:%M:%S").unwrap_err();
        let err = VestioError::Timestamp { value: "garbage".to_string(), source };
        assert!(err.to_string().contains("garbage"));
    }
}
