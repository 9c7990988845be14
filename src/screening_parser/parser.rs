//! Document-level parser
//!
//! Runs the header validator once, then decodes rows until the data section
//! ends, then makes sure nothing is left over. The whole document parses or
//! the call fails; records decoded before an error are dropped.

use std::io::Read;
use tracing::{debug, info};

use super::header::validate_header;
use super::record_parser::parse_data_row;
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::Tokenizer;
use crate::error::{Result, ScreeningError};
use crate::models::Document;

/// Parser for v1 vision screening exports
///
/// Holds no state between calls; each call owns its own cursor, so one
/// parser can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreeningParser;

impl ScreeningParser {
    pub fn new() -> Self {
        Self
    }

    /// Read `reader` to the end and parse it
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Document> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        self.parse_bytes(&buffer)
    }

    pub fn parse_bytes(&self, input: &[u8]) -> Result<Document> {
        self.parse_with_stats(input).map(|result| result.document)
    }

    /// Parse and report scan statistics alongside the document
    pub fn parse_with_stats(&self, input: &[u8]) -> Result<ParseResult> {
        let mut tokens = Tokenizer::new(input);

        validate_header(&mut tokens)?;

        let mut records = Vec::new();
        while let Some(record) = parse_data_row(&mut tokens)? {
            records.push(record);
        }
        debug!("Data section ended after {} rows", records.len());

        // Rows stop in front of leftover content without consuming it
        if let Some(token) = tokens.next_token() {
            return Err(ScreeningError::TrailingTokens {
                token: token.trimmed(),
                position: token.position(),
            });
        }

        let stats = ParseStats {
            rows_parsed: records.len(),
            tokens_consumed: tokens.tokens_consumed(),
            lines_scanned: tokens.line(),
            bytes_read: tokens.input_len(),
        };
        info!(
            "Parsed {} records from {} bytes ({} lines)",
            stats.rows_parsed, stats.bytes_read, stats.lines_scanned
        );

        Ok(ParseResult {
            document: Document::new(records),
            stats,
        })
    }
}
