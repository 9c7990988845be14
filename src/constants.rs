//! Application constants for the screening export parser
//!
//! This module contains the wire format definition (delimiter, header
//! captions, field names, enumeration codes) and the default values used by
//! the command line and the upload service.

// =============================================================================
// Wire Format
// =============================================================================

/// Field delimiter of the device export
pub const DELIMITER: u8 = b';';

/// Number of fields in every data row (and captions in the header)
pub const FIELD_COUNT: usize = 20;

/// Header captions of the v1 export, in wire order
///
/// `Cylinder[dpt] OS` really has no space before the bracket; the device
/// writes it that way.
pub const HEADER_CAPTIONS: [&str; FIELD_COUNT] = [
    "Date of measurement",
    "Primary key",
    "Family name",
    "First name",
    "Date of birth",
    "ID",
    "Location",
    "Contact",
    "Sphere [dpt] OD",
    "Cylinder [dpt] OD",
    "Axis [°] OD",
    "Pupil size [mm] OD",
    "Sphere [dpt] OS",
    "Cylinder[dpt] OS",
    "Axis [°] OS",
    "Pupil size [mm] OS",
    "Gaze asymmetry [°] OS",
    "Pupil distance [mm]",
    "Monocular {1=OD, 2=OS, 3=Binocular}",
    "Screening result {0=Pass, 1=Refer, 2=Refer or try again}",
];

/// Field names used in diagnostics, in wire order
pub mod fields {
    pub const DATE_OF_MEASUREMENT: &str = "date of measurement";
    pub const PRIMARY_KEY: &str = "primary key";
    pub const FAMILY_NAME: &str = "family name";
    pub const FIRST_NAME: &str = "first name";
    pub const DATE_OF_BIRTH: &str = "date of birth";
    pub const ID: &str = "id";
    pub const LOCATION: &str = "location";
    pub const CONTACT: &str = "contact";
    pub const SPHERE_OD: &str = "sphere OD";
    pub const CYLINDER_OD: &str = "cylinder OD";
    pub const AXIS_OD: &str = "axis OD";
    pub const PUPIL_SIZE_OD: &str = "pupil size OD";
    pub const SPHERE_OS: &str = "sphere OS";
    pub const CYLINDER_OS: &str = "cylinder OS";
    pub const AXIS_OS: &str = "axis OS";
    pub const PUPIL_SIZE_OS: &str = "pupil size OS";
    pub const GAZE_ASYMMETRY_OS: &str = "gaze asymmetry OS";
    pub const PUPIL_DISTANCE: &str = "pupil distance";
    pub const MONOCULAR: &str = "monocular";
    pub const SCREENING_RESULT: &str = "screening result";

    /// All field names in wire order
    pub const ALL: [&str; super::FIELD_COUNT] = [
        DATE_OF_MEASUREMENT,
        PRIMARY_KEY,
        FAMILY_NAME,
        FIRST_NAME,
        DATE_OF_BIRTH,
        ID,
        LOCATION,
        CONTACT,
        SPHERE_OD,
        CYLINDER_OD,
        AXIS_OD,
        PUPIL_SIZE_OD,
        SPHERE_OS,
        CYLINDER_OS,
        AXIS_OS,
        PUPIL_SIZE_OS,
        GAZE_ASYMMETRY_OS,
        PUPIL_DISTANCE,
        MONOCULAR,
        SCREENING_RESULT,
    ];
}

/// Characters stripped by the trimming decoders
pub const TRIM_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

/// Calendar date layout of the date-of-birth field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted shape of a number field: optional minus, digits, optional fraction
pub const NUMBER_PATTERN: &str = r"^-?[0-9]+(\.[0-9]+)?$";

/// Accepted shape of a calendar date before it is checked against the calendar
pub const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

/// Wire codes of the monocular field
pub mod laterality_codes {
    pub const OD: &str = "1";
    pub const OS: &str = "2";
    pub const BINOCULAR: &str = "3";

    pub const ALLOWED: &str = "1, 2, 3";
}

/// Wire codes of the screening result field
pub mod outcome_codes {
    pub const PASS: &str = "0";
    pub const REFER: &str = "1";
    pub const REFER_OR_TRY_AGAIN: &str = "2";

    pub const ALLOWED: &str = "0, 1, 2";
}

// =============================================================================
// Upload Service
// =============================================================================

/// Default listen address of the upload service
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:9000";

/// Default upper bound for an upload body (8 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Upload endpoint path
pub const UPLOAD_PATH: &str = "/v1/camera/upload";

/// Endpoint rendering every accumulated record
pub const DATA_PATH: &str = "/data";

/// Prefix under which static assets are served
pub const ASSETS_PREFIX: &str = "/assets";

/// Seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 10;

// =============================================================================
// Command Line
// =============================================================================

/// Default file name pattern when checking directories
pub const DEFAULT_FILE_PATTERN: &str = "*.csv";

/// Default log level when neither --verbose nor --quiet is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";
