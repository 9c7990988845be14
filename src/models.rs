//! Core data structures for parsed screening exports.
//!
//! Defines the typed values decoded from the wire (calendar dates,
//! laterality, screening outcome), the immutable [`Record`] built from one
//! data row, and the [`Document`] returned by a successful parse.

use crate::constants::{DATE_FORMAT, DELIMITER, HEADER_CAPTIONS, laterality_codes, outcome_codes};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, SecondsFormat};
use serde::Serialize;
use std::fmt;

/// A date without time of day or offset, used for the date of birth
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its parts, `None` if it is not a real calendar date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Which eye(s) a monocular measurement applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Laterality {
    /// Right eye
    Od,
    /// Left eye
    Os,
    Binocular,
}

impl Laterality {
    /// Map the exact wire code to a variant
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            laterality_codes::OD => Some(Laterality::Od),
            laterality_codes::OS => Some(Laterality::Os),
            laterality_codes::BINOCULAR => Some(Laterality::Binocular),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Laterality::Od => laterality_codes::OD,
            Laterality::Os => laterality_codes::OS,
            Laterality::Binocular => laterality_codes::BINOCULAR,
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Laterality::Od => "OD",
            Laterality::Os => "OS",
            Laterality::Binocular => "BINOCULAR",
        };
        f.write_str(name)
    }
}

/// Verdict of one screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreeningOutcome {
    Pass,
    Refer,
    ReferOrTryAgain,
}

impl ScreeningOutcome {
    /// Map the exact wire code to a variant
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            outcome_codes::PASS => Some(ScreeningOutcome::Pass),
            outcome_codes::REFER => Some(ScreeningOutcome::Refer),
            outcome_codes::REFER_OR_TRY_AGAIN => Some(ScreeningOutcome::ReferOrTryAgain),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ScreeningOutcome::Pass => outcome_codes::PASS,
            ScreeningOutcome::Refer => outcome_codes::REFER,
            ScreeningOutcome::ReferOrTryAgain => outcome_codes::REFER_OR_TRY_AGAIN,
        }
    }
}

impl fmt::Display for ScreeningOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreeningOutcome::Pass => "PASS",
            ScreeningOutcome::Refer => "REFER",
            ScreeningOutcome::ReferOrTryAgain => "REFER_OR_TRY_AGAIN",
        };
        f.write_str(name)
    }
}

/// Refraction and pupil measurements of one eye
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyeMeasurements {
    /// Sphere in dioptres
    pub sphere: f64,
    /// Cylinder in dioptres
    pub cylinder: f64,
    /// Axis in degrees
    pub axis: f64,
    /// Pupil size in millimetres
    pub pupil_size: f64,
}

/// One fully decoded data row
///
/// Fields are private; a record never changes after the row decoder builds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub(crate) date_of_measurement: DateTime<FixedOffset>,
    pub(crate) primary_key: String,
    pub(crate) family_name: String,
    pub(crate) first_name: String,
    pub(crate) date_of_birth: CalendarDate,
    pub(crate) id: String,
    pub(crate) location: String,
    pub(crate) contact: String,
    pub(crate) od: EyeMeasurements,
    pub(crate) os: EyeMeasurements,
    pub(crate) gaze_asymmetry_os: f64,
    pub(crate) pupil_distance: f64,
    pub(crate) monocular: Laterality,
    pub(crate) screening_result: ScreeningOutcome,
}

impl Record {
    pub fn date_of_measurement(&self) -> DateTime<FixedOffset> {
        self.date_of_measurement
    }

    /// Primary key exactly as written, surrounding whitespace included
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn date_of_birth(&self) -> CalendarDate {
        self.date_of_birth
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Right eye measurements
    pub fn od(&self) -> &EyeMeasurements {
        &self.od
    }

    /// Left eye measurements
    pub fn os(&self) -> &EyeMeasurements {
        &self.os
    }

    pub fn gaze_asymmetry_os(&self) -> f64 {
        self.gaze_asymmetry_os
    }

    pub fn pupil_distance(&self) -> f64 {
        self.pupil_distance
    }

    pub fn monocular(&self) -> Laterality {
        self.monocular
    }

    pub fn screening_result(&self) -> ScreeningOutcome {
        self.screening_result
    }

    /// Render the record as one delimiter-terminated wire row, without newline
    ///
    /// Parsing the output under the v1 header yields an equal record.
    pub fn to_wire_row(&self) -> String {
        let fields: [String; 20] = [
            self.date_of_measurement
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.primary_key.clone(),
            self.family_name.clone(),
            self.first_name.clone(),
            self.date_of_birth.to_string(),
            self.id.clone(),
            self.location.clone(),
            self.contact.clone(),
            self.od.sphere.to_string(),
            self.od.cylinder.to_string(),
            self.od.axis.to_string(),
            self.od.pupil_size.to_string(),
            self.os.sphere.to_string(),
            self.os.cylinder.to_string(),
            self.os.axis.to_string(),
            self.os.pupil_size.to_string(),
            self.gaze_asymmetry_os.to_string(),
            self.pupil_distance.to_string(),
            self.monocular.code().to_string(),
            self.screening_result.code().to_string(),
        ];

        let delimiter = char::from(DELIMITER);
        let mut row = String::new();
        for field in &fields {
            row.push_str(field);
            row.push(delimiter);
        }
        row
    }
}

/// A successfully parsed export: the validated header and every data row
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    records: Vec<Record>,
}

impl Document {
    pub(crate) fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Header captions the document was validated against
    pub fn header(&self) -> &'static [&'static str] {
        &HEADER_CAPTIONS
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render header and rows back into the export format
    pub fn to_wire_text(&self) -> String {
        let delimiter = char::from(DELIMITER);
        let mut text = String::new();
        for caption in self.header() {
            text.push_str(caption);
            text.push(delimiter);
        }
        text.push('\n');
        for record in &self.records {
            text.push_str(&record.to_wire_row());
            text.push('\n');
        }
        text
    }
}
