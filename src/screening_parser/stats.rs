//! Parsing statistics and result structures
//!
//! This module provides types for reporting how much of an export was read
//! alongside the parsed document.

use crate::models::Document;

/// Parsed document together with scan statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The fully parsed document
    pub document: Document,

    /// Statistics collected while scanning
    pub stats: ParseStats,
}

/// Scan statistics for one parse call
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParseStats {
    /// Number of data rows decoded
    pub rows_parsed: usize,

    /// Number of tokens handed out by the tokenizer, header included
    pub tokens_consumed: usize,

    /// Number of lines the tokenizer advanced through
    pub lines_scanned: usize,

    /// Size of the input in bytes
    pub bytes_read: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another file's statistics into this one
    pub fn merge(&mut self, other: &ParseStats) {
        self.rows_parsed += other.rows_parsed;
        self.tokens_consumed += other.tokens_consumed;
        self.lines_scanned += other.lines_scanned;
        self.bytes_read += other.bytes_read;
    }
}
