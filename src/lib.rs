//! Vision Screening Export Library
//!
//! A Rust library for reading the semicolon-delimited measurement exports
//! written by vision screening devices into strongly typed records.
//!
//! This library provides tools for:
//! - Tokenizing exports with exact line/column diagnostics
//! - Validating the fixed v1 header row
//! - Decoding the twenty typed fields of every data row
//! - Rejecting truncated, malformed or over-long documents as a whole
//! - Serving uploads over HTTP and rendering accumulated records

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod screening_parser;
pub mod server;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use error::{ErrorKind, Position, Result, ScreeningError};
pub use models::{CalendarDate, Document, EyeMeasurements, Laterality, Record, ScreeningOutcome};
pub use screening_parser::{ScreeningParser, parse, parse_bytes, parse_str};
