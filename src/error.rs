//! Error handling for screening export parsing.
//!
//! Every parse failure carries the source position it was detected at, and
//! field-level failures also carry the field name and the offending raw text.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Line and column range of a token in the source document.
///
/// Lines and columns are 1-based. The column range is half-open: `column_start`
/// is the first character of the token on its last line, `column_end` is the
/// delimiter (or end of input) that terminated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl Position {
    pub fn new(line: usize, column_start: usize, column_end: usize) -> Self {
        Self {
            line,
            column_start,
            column_end,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}-{}",
            self.line, self.column_start, self.column_end
        )
    }
}

#[derive(Error, Debug)]
pub enum ScreeningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Header does not match the v1 definition: expected [{expected}], found [{found}] at {position}")]
    HeaderMismatch {
        expected: &'static str,
        found: String,
        position: Position,
    },

    #[error("Input ended inside the header while expecting [{expected}] at {position}")]
    TruncatedInput {
        expected: &'static str,
        position: Position,
    },

    #[error("Invalid date-time for {field}: \"{token}\" ({reason}) at {position}")]
    InvalidTimestamp {
        field: &'static str,
        token: String,
        reason: String,
        position: Position,
    },

    #[error("Invalid date for {field}: \"{token}\" (expected YYYY-MM-DD) at {position}")]
    InvalidDate {
        field: &'static str,
        token: String,
        position: Position,
    },

    #[error("Invalid number for {field}: \"{token}\" at {position}")]
    InvalidNumber {
        field: &'static str,
        token: String,
        position: Position,
    },

    #[error("Expected a value for {field} but got none at {position}")]
    MissingRequiredField {
        field: &'static str,
        token: String,
        position: Position,
    },

    #[error("Invalid code for {field}: expected one of {allowed}, got \"{token}\" at {position}")]
    InvalidEnumValue {
        field: &'static str,
        token: String,
        allowed: &'static str,
        position: Position,
    },

    #[error("Input ended inside a data row while expecting {field} at {position}")]
    TruncatedRow {
        field: &'static str,
        position: Position,
    },

    #[error("Unexpected content after the last data row: \"{token}\" at {position}")]
    TrailingTokens { token: String, position: Position },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Discriminant of [`ScreeningError`], for matching and for wire error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    Io,
    HeaderMismatch,
    TruncatedInput,
    InvalidTimestamp,
    InvalidDate,
    InvalidNumber,
    MissingRequiredField,
    InvalidEnumValue,
    TruncatedRow,
    TrailingTokens,
    Configuration,
}

impl ErrorKind {
    /// Stable numeric code reported to upload clients
    pub fn code(self) -> u16 {
        match self {
            ErrorKind::Io => 1,
            ErrorKind::HeaderMismatch => 10,
            ErrorKind::TruncatedInput => 11,
            ErrorKind::InvalidTimestamp => 20,
            ErrorKind::InvalidDate => 21,
            ErrorKind::InvalidNumber => 22,
            ErrorKind::MissingRequiredField => 23,
            ErrorKind::InvalidEnumValue => 24,
            ErrorKind::TruncatedRow => 30,
            ErrorKind::TrailingTokens => 31,
            ErrorKind::Configuration => 90,
        }
    }
}

impl ScreeningError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScreeningError::Io(_) => ErrorKind::Io,
            ScreeningError::HeaderMismatch { .. } => ErrorKind::HeaderMismatch,
            ScreeningError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            ScreeningError::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            ScreeningError::InvalidDate { .. } => ErrorKind::InvalidDate,
            ScreeningError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            ScreeningError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            ScreeningError::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            ScreeningError::TruncatedRow { .. } => ErrorKind::TruncatedRow,
            ScreeningError::TrailingTokens { .. } => ErrorKind::TrailingTokens,
            ScreeningError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Source position of a parse error, `None` for I/O and configuration errors
    pub fn position(&self) -> Option<Position> {
        match self {
            ScreeningError::HeaderMismatch { position, .. }
            | ScreeningError::TruncatedInput { position, .. }
            | ScreeningError::InvalidTimestamp { position, .. }
            | ScreeningError::InvalidDate { position, .. }
            | ScreeningError::InvalidNumber { position, .. }
            | ScreeningError::MissingRequiredField { position, .. }
            | ScreeningError::InvalidEnumValue { position, .. }
            | ScreeningError::TruncatedRow { position, .. }
            | ScreeningError::TrailingTokens { position, .. } => Some(*position),
            ScreeningError::Io(_) | ScreeningError::Configuration { .. } => None,
        }
    }

    /// Raw text of the token that caused the error, when one was read
    pub fn token(&self) -> Option<&str> {
        match self {
            ScreeningError::HeaderMismatch { found, .. } => Some(found),
            ScreeningError::InvalidTimestamp { token, .. }
            | ScreeningError::InvalidDate { token, .. }
            | ScreeningError::InvalidNumber { token, .. }
            | ScreeningError::MissingRequiredField { token, .. }
            | ScreeningError::InvalidEnumValue { token, .. }
            | ScreeningError::TrailingTokens { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreeningError>;
