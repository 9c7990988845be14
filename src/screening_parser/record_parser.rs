//! Data row decoding
//!
//! A row is exactly twenty fields in wire order. It is either complete or
//! absent: running out of input before the first field ends the data section
//! cleanly, running out anywhere later is a truncated row. A short tail that
//! does not open with a timestamp also ends the section and is left for the
//! driver to reject.

use tracing::trace;

use super::field_parsers::{
    decode_date, decode_laterality, decode_number, decode_optional_string, decode_outcome,
    decode_required_string, decode_timestamp, next_field,
};
use super::tokenizer::Tokenizer;
use crate::constants::{FIELD_COUNT, fields};
use crate::error::Result;
use crate::models::{EyeMeasurements, Record};

/// Check whether the data section has ended, consuming a blank final token
///
/// Rows are delimiter-terminated, so a well-formed export leaves either
/// nothing or only a trailing newline after the last row.
pub fn at_end_of_rows(tokens: &mut Tokenizer<'_>) -> bool {
    match tokens.peek() {
        None => true,
        Some(token) if token.is_final() && token.is_blank() => {
            tokens.next_token();
            true
        }
        Some(_) => false,
    }
}

/// Check whether the remaining tokens are leftover content rather than a row
///
/// Fewer than twenty tokens that do not open with a timestamp cannot be a
/// row. Nothing is consumed; the caller decides how to report them.
pub fn is_trailing_content(tokens: &Tokenizer<'_>) -> bool {
    if tokens.has_at_least(FIELD_COUNT) {
        return false;
    }
    tokens
        .peek()
        .is_some_and(|token| decode_timestamp(&token, fields::DATE_OF_MEASUREMENT).is_err())
}

/// Decode the next data row, `None` when the data section has ended
///
/// The data section also ends in front of trailing content, which is left
/// unconsumed.
pub fn parse_data_row(tokens: &mut Tokenizer<'_>) -> Result<Option<Record>> {
    if at_end_of_rows(tokens) || is_trailing_content(tokens) {
        return Ok(None);
    }

    let date_of_measurement = decode_timestamp(
        &next_field(tokens, fields::DATE_OF_MEASUREMENT)?,
        fields::DATE_OF_MEASUREMENT,
    )?;

    let primary_key = decode_required_string(
        &next_field(tokens, fields::PRIMARY_KEY)?,
        fields::PRIMARY_KEY,
    )?;
    let family_name = decode_optional_string(&next_field(tokens, fields::FAMILY_NAME)?);
    let first_name = decode_optional_string(&next_field(tokens, fields::FIRST_NAME)?);
    let date_of_birth = decode_date(
        &next_field(tokens, fields::DATE_OF_BIRTH)?,
        fields::DATE_OF_BIRTH,
    )?;
    let id = decode_optional_string(&next_field(tokens, fields::ID)?);
    let location = decode_optional_string(&next_field(tokens, fields::LOCATION)?);
    let contact = decode_optional_string(&next_field(tokens, fields::CONTACT)?);

    let od = EyeMeasurements {
        sphere: number_field(tokens, fields::SPHERE_OD)?,
        cylinder: number_field(tokens, fields::CYLINDER_OD)?,
        axis: number_field(tokens, fields::AXIS_OD)?,
        pupil_size: number_field(tokens, fields::PUPIL_SIZE_OD)?,
    };
    let os = EyeMeasurements {
        sphere: number_field(tokens, fields::SPHERE_OS)?,
        cylinder: number_field(tokens, fields::CYLINDER_OS)?,
        axis: number_field(tokens, fields::AXIS_OS)?,
        pupil_size: number_field(tokens, fields::PUPIL_SIZE_OS)?,
    };
    let gaze_asymmetry_os = number_field(tokens, fields::GAZE_ASYMMETRY_OS)?;
    let pupil_distance = number_field(tokens, fields::PUPIL_DISTANCE)?;

    let monocular = decode_laterality(
        &next_field(tokens, fields::MONOCULAR)?,
        fields::MONOCULAR,
    )?;
    let screening_result = decode_outcome(
        &next_field(tokens, fields::SCREENING_RESULT)?,
        fields::SCREENING_RESULT,
    )?;

    trace!("Decoded row ending at {}", tokens.last_position());

    Ok(Some(Record {
        date_of_measurement,
        primary_key,
        family_name,
        first_name,
        date_of_birth,
        id,
        location,
        contact,
        od,
        os,
        gaze_asymmetry_os,
        pupil_distance,
        monocular,
        screening_result,
    }))
}

fn number_field(tokens: &mut Tokenizer<'_>, field: &'static str) -> Result<f64> {
    decode_number(&next_field(tokens, field)?, field)
}
