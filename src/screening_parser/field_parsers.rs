//! Field decoders for screening export rows
//!
//! Each decoder turns one token into one typed value. They are pure: the row
//! decoder pulls the token with [`next_field`] first, so the cursor advances by
//! exactly one token whether decoding succeeds or not.

use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use super::tokenizer::{Token, Tokenizer};
use crate::constants::{DATE_FORMAT, DATE_PATTERN, NUMBER_PATTERN, laterality_codes, outcome_codes};
use crate::error::{Result, ScreeningError};
use crate::models::{CalendarDate, Laterality, ScreeningOutcome};

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_PATTERN).expect("date pattern is valid"));

/// Pull the token for `field`, failing with `TruncatedRow` if the input ended
///
/// A blank final token is the tail after the last delimiter, not a field.
pub fn next_field<'a>(tokens: &mut Tokenizer<'a>, field: &'static str) -> Result<Token<'a>> {
    match tokens.next_token() {
        Some(token) if !(token.is_final() && token.is_blank()) => Ok(token),
        Some(token) => Err(ScreeningError::TruncatedRow {
            field,
            position: token.position(),
        }),
        None => Err(ScreeningError::TruncatedRow {
            field,
            position: tokens.last_position(),
        }),
    }
}

/// Parse an RFC 3339 date-time
pub fn decode_timestamp(token: &Token<'_>, field: &'static str) -> Result<DateTime<FixedOffset>> {
    let value = token.trimmed();
    let invalid = |reason: String| ScreeningError::InvalidTimestamp {
        field,
        token: value.clone(),
        reason,
        position: token.position(),
    };

    // chrono also takes a space here; the export profile does not
    if value
        .as_bytes()
        .get(10)
        .is_some_and(|separator| !matches!(separator, b'T' | b't'))
    {
        return Err(invalid("expected 'T' between date and time".to_string()));
    }

    DateTime::parse_from_rfc3339(&value).map_err(|e| invalid(e.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn decode_date(token: &Token<'_>, field: &'static str) -> Result<CalendarDate> {
    let value = token.trimmed();
    let invalid = || ScreeningError::InvalidDate {
        field,
        token: value.clone(),
        position: token.position(),
    };

    if !DATE_RE.is_match(&value) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map(CalendarDate::from)
        .map_err(|_| invalid())
}

/// Parse a dot-decimal number, optionally negative; must fit a finite `f64`
pub fn decode_number(token: &Token<'_>, field: &'static str) -> Result<f64> {
    let value = token.trimmed();
    let invalid = || ScreeningError::InvalidNumber {
        field,
        token: value.clone(),
        position: token.position(),
    };

    if !NUMBER_RE.is_match(&value) {
        return Err(invalid());
    }

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(invalid()),
    }
}

/// A string that must hold more than whitespace; returned untrimmed
pub fn decode_required_string(token: &Token<'_>, field: &'static str) -> Result<String> {
    if token.is_blank() {
        return Err(ScreeningError::MissingRequiredField {
            field,
            token: token.text().into_owned(),
            position: token.position(),
        });
    }
    Ok(token.text().into_owned())
}

/// A string that may be empty; returned verbatim
pub fn decode_optional_string(token: &Token<'_>) -> String {
    token.text().into_owned()
}

pub fn decode_laterality(token: &Token<'_>, field: &'static str) -> Result<Laterality> {
    Laterality::from_code(&token.trimmed()).ok_or_else(|| ScreeningError::InvalidEnumValue {
        field,
        token: token.text().into_owned(),
        allowed: laterality_codes::ALLOWED,
        position: token.position(),
    })
}

pub fn decode_outcome(token: &Token<'_>, field: &'static str) -> Result<ScreeningOutcome> {
    ScreeningOutcome::from_code(&token.trimmed()).ok_or_else(|| {
        ScreeningError::InvalidEnumValue {
            field,
            token: token.text().into_owned(),
            allowed: outcome_codes::ALLOWED,
            position: token.position(),
        }
    })
}
