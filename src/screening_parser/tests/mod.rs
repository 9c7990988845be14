//! Test utilities and fixtures for screening parser testing
//!
//! This module provides export builders and helper functions used across the
//! parser test modules (and the server tests).

use std::io::Write;
use tempfile::NamedTempFile;

use super::tokenizer::{Token, Tokenizer};
use crate::constants::HEADER_CAPTIONS;

// Test modules
mod field_parser_tests;

/// A complete, valid data row including its trailing delimiter
pub const VALID_ROW: &str = "2017-12-20T10:15:00+01:00;1001;Doe;Jane;2012-04-01;ID-7;\
Springfield Elementary;555-0100;-0.5;-0.25;180;5.1;0.25;-1.0;90;5.3;2.5;58.5;3;0;";

/// A second valid row with different values in every typed field
pub const OTHER_ROW: &str = "2018-01-02T08:00:00Z;1002;Müller;Jürgen;2010-11-30;;;;\
1.75;0;0;4;-2.50;-0.75;175.5;4.25;-1.5;61;1;2;";

/// The v1 header row including its trailing delimiter
pub fn header_row() -> String {
    let mut row = HEADER_CAPTIONS.join(";");
    row.push(';');
    row
}

/// Header followed by `rows`, each terminated by a newline
pub fn export_with_rows(rows: &[&str]) -> String {
    let mut export = header_row();
    export.push('\n');
    for row in rows {
        export.push_str(row);
        export.push('\n');
    }
    export
}

/// [`VALID_ROW`] with the field at `index` replaced by `value`
pub fn row_with_field(index: usize, value: &str) -> String {
    let mut fields: Vec<&str> = VALID_ROW.split(';').collect();
    fields[index] = value;
    fields.join(";")
}

/// First token of `input`
pub fn first_token(input: &str) -> Token<'_> {
    Tokenizer::new(input.as_bytes())
        .next_token()
        .expect("tokenizer always yields a first token")
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
