//! Tests for the one-token field decoders

use super::*;
use crate::error::{ErrorKind, ScreeningError};
use crate::models::{Laterality, ScreeningOutcome};
use crate::screening_parser::field_parsers::*;
use chrono::{Datelike, Timelike};

#[test]
fn test_timestamp_with_offset() {
    let timestamp = decode_timestamp(&first_token("2017-12-20T10:15:00+01:00;"), "ts").unwrap();
    assert_eq!(timestamp.year(), 2017);
    assert_eq!(timestamp.hour(), 10);
    assert_eq!(timestamp.offset().local_minus_utc(), 3600);
}

#[test]
fn test_timestamp_is_trimmed() {
    let timestamp = decode_timestamp(&first_token("\r\n 2018-01-02T08:00:00Z ;"), "ts").unwrap();
    assert_eq!(timestamp.day(), 2);
    assert_eq!(timestamp.offset().local_minus_utc(), 0);
}

#[test]
fn test_timestamp_rejects_other_profiles() {
    for input in [
        "2017-12-20",
        "2017-12-20 10:15:00",
        "2017-12-20 10:15:00+01:00",
        "2017-12-20_10:15:00Z",
        "2017-12-20T10:15:00",
        "20/12/2017 10:15",
        "",
    ] {
        let error = decode_timestamp(&first_token(input), "ts").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidTimestamp, "input {input:?}");
    }
}

#[test]
fn test_timestamp_accepts_lowercase_separator() {
    let timestamp = decode_timestamp(&first_token("2017-12-20t10:15:00Z"), "ts").unwrap();
    assert_eq!(timestamp.minute(), 15);
}

#[test]
fn test_space_separated_timestamp_reports_separator() {
    match decode_timestamp(&first_token("2017-12-20 10:15:00+01:00"), "ts").unwrap_err() {
        ScreeningError::InvalidTimestamp { token, reason, .. } => {
            assert_eq!(token, "2017-12-20 10:15:00+01:00");
            assert!(reason.contains("'T'"));
        }
        other => panic!("expected InvalidTimestamp, got {other:?}"),
    }
}

#[test]
fn test_date_of_birth() {
    let date = decode_date(&first_token(" 2012-04-01\r;"), "dob").unwrap();
    assert_eq!((date.year(), date.month(), date.day()), (2012, 4, 1));
}

#[test]
fn test_date_rejects_invalid_values() {
    for input in ["2020-13-40", "2021-02-29", "2012-4-1", "12-04-01", "2012-04-01T00:00:00Z", ""] {
        let error = decode_date(&first_token(input), "dob").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidDate, "input {input:?}");
    }
}

#[test]
fn test_numbers_accept_negative_and_fractional() {
    assert_eq!(decode_number(&first_token("-2.50"), "n").unwrap(), -2.5);
    assert_eq!(decode_number(&first_token("180"), "n").unwrap(), 180.0);
    assert_eq!(decode_number(&first_token(" 0.25\r\n"), "n").unwrap(), 0.25);
    assert_eq!(decode_number(&first_token("-0"), "n").unwrap(), 0.0);
}

#[test]
fn test_numbers_reject_other_formats() {
    for input in ["abc", "", "1,5", "+1", "1e5", ".5", "5.", "--1", "NaN", "inf", "1 2"] {
        let error = decode_number(&first_token(input), "sphere OD").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidNumber, "input {input:?}");
    }
}

#[test]
fn test_numbers_must_be_finite() {
    let digits = "9".repeat(400);
    let error = decode_number(&first_token(&digits), "pupil distance").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidNumber);
    assert_eq!(error.token(), Some(digits.as_str()));

    let long_fraction = format!("1.{}", "0".repeat(400));
    assert_eq!(decode_number(&first_token(&long_fraction), "n").unwrap(), 1.0);
}

#[test]
fn test_number_error_names_field_and_token() {
    match decode_number(&first_token("abc"), "sphere OD").unwrap_err() {
        ScreeningError::InvalidNumber { field, token, .. } => {
            assert_eq!(field, "sphere OD");
            assert_eq!(token, "abc");
        }
        other => panic!("expected InvalidNumber, got {other:?}"),
    }
}

#[test]
fn test_required_string_keeps_raw_text() {
    assert_eq!(decode_required_string(&first_token(" 1001 "), "pk").unwrap(), " 1001 ");
}

#[test]
fn test_required_string_rejects_blank() {
    for input in ["", "   ", "\r\n"] {
        let error = decode_required_string(&first_token(input), "primary key").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredField);
    }
}

#[test]
fn test_optional_string_is_verbatim() {
    assert_eq!(decode_optional_string(&first_token("")), "");
    assert_eq!(decode_optional_string(&first_token("  Doe ")), "  Doe ");
    assert_eq!(decode_optional_string(&first_token("Müller;")), "Müller");
}

#[test]
fn test_laterality_codes() {
    assert_eq!(decode_laterality(&first_token("1"), "m").unwrap(), Laterality::Od);
    assert_eq!(decode_laterality(&first_token("2\r\n"), "m").unwrap(), Laterality::Os);
    assert_eq!(decode_laterality(&first_token(" 3"), "m").unwrap(), Laterality::Binocular);

    for input in ["0", "4", "OD", "", "1.0"] {
        let error = decode_laterality(&first_token(input), "monocular").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidEnumValue, "input {input:?}");
    }
}

#[test]
fn test_outcome_codes() {
    assert_eq!(decode_outcome(&first_token("0"), "r").unwrap(), ScreeningOutcome::Pass);
    assert_eq!(decode_outcome(&first_token("1"), "r").unwrap(), ScreeningOutcome::Refer);
    assert_eq!(
        decode_outcome(&first_token("2\n"), "r").unwrap(),
        ScreeningOutcome::ReferOrTryAgain
    );

    let error = decode_outcome(&first_token("3"), "screening result").unwrap_err();
    assert!(error.to_string().contains("\"3\""));
    assert!(error.to_string().contains("0, 1, 2"));
}

#[test]
fn test_enum_error_keeps_raw_text() {
    let error = decode_laterality(&first_token(" 4 "), "monocular").unwrap_err();
    assert_eq!(error.token(), Some(" 4 "));
}

#[test]
fn test_next_field_reports_truncation() {
    let mut tokens = Tokenizer::new(b"only");
    assert!(next_field(&mut tokens, "first").is_ok());
    let error = next_field(&mut tokens, "second").unwrap_err();
    match error {
        ScreeningError::TruncatedRow { field, .. } => assert_eq!(field, "second"),
        other => panic!("expected TruncatedRow, got {other:?}"),
    }
}

#[test]
fn test_next_field_treats_blank_tail_as_end() {
    let mut tokens = Tokenizer::new(b"3;\r\n");
    assert_eq!(next_field(&mut tokens, "monocular").unwrap().text(), "3");
    let error = next_field(&mut tokens, "screening result").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TruncatedRow);
    assert!(tokens.is_exhausted());
}
