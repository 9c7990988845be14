//! Parser for vision screening device exports
//!
//! The export is a semicolon-delimited text file: one header row of twenty
//! fixed captions followed by any number of twenty-field data rows. Parsing is
//! strict and all-or-nothing; the first problem aborts with an error that names
//! the line and column range it was found at.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`tokenizer`] - Delimiter splitting with line/column tracking
//! - [`field_parsers`] - One-token decoders for each field type
//! - [`header`] - Validation of the fixed header captions
//! - [`record_parser`] - Decoding of one twenty-field data row
//! - [`parser`] - Document orchestration and trailing content check
//! - [`stats`] - Scan statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use vision_screening::screening_parser::parse_str;
//!
//! let header = vision_screening::constants::HEADER_CAPTIONS.join(";");
//! let export = format!(
//!     "{header};\n2017-12-20T10:15:00+01:00;1001;Doe;Jane;2012-04-01;;School;;\
//!      -0.5;-0.25;180;5.1;0.25;-1.0;90;5.3;2.5;58.5;3;0;\n"
//! );
//!
//! let document = parse_str(&export).unwrap();
//! assert_eq!(document.len(), 1);
//! assert_eq!(document.records()[0].primary_key(), "1001");
//! ```

pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

use std::io::Read;

use crate::Result;
use crate::models::Document;

// Re-export main types for easy access
pub use parser::ScreeningParser;
pub use stats::{ParseResult, ParseStats};
pub use tokenizer::{Token, Tokenizer};

/// Read an export from `reader` and parse it
pub fn parse<R: Read>(reader: R) -> Result<Document> {
    ScreeningParser::new().parse_reader(reader)
}

pub fn parse_bytes(input: &[u8]) -> Result<Document> {
    ScreeningParser::new().parse_bytes(input)
}

pub fn parse_str(input: &str) -> Result<Document> {
    ScreeningParser::new().parse_bytes(input.as_bytes())
}
