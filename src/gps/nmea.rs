// src/gps/nmea.rs
//! NMEA sentence parsing
//!
//! Only RMC (Recommended Minimum) sentences produce fixes. GGA and GSA are
//! recognized so they can be counted separately instead of being lumped in
//! with malformed input.

use super::data::Record;
use std::fmt;

/// Speed over ground is reported in knots
pub const KNOTS_TO_MPS: f64 = 0.514444;

/// Sentence IDs that produce a [`Record`]
pub const SUPPORTED_SENTENCES: [&str; 2] = ["$GPRMC", "$GNRMC"];

/// Sentence IDs we recognize but deliberately skip
pub const UNSUPPORTED_SENTENCES: [&str; 4] = ["$GPGGA", "$GPGSA", "$GNGGA", "$GNGSA"];

const STATUS_ACTIVE: char = 'A';
const MIN_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    MissingDecimalPoint,
    InvalidDegrees,
    InvalidMinutes,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::MissingDecimalPoint => write!(f, "no DDMM.MMMM decimal point"),
            CoordinateError::InvalidDegrees => write!(f, "invalid degrees"),
            CoordinateError::InvalidMinutes => write!(f, "invalid minutes"),
        }
    }
}

impl std::error::Error for CoordinateError {}

/// Why an RMC sentence was rejected, in the order the checks run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    TooFewFields(usize),
    UnknownSentence,
    NoFix,
    MissingTimestamp,
    BadHemisphere,
    Coordinate(CoordinateError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooFewFields(n) => {
                write!(f, "expected at least {} fields, found {}", MIN_FIELDS, n)
            }
            ParseError::UnknownSentence => write!(f, "not an RMC sentence"),
            ParseError::NoFix => write!(f, "receiver status is not active"),
            ParseError::MissingTimestamp => write!(f, "missing UTC time"),
            ParseError::BadHemisphere => write!(f, "hemisphere must be a single character"),
            ParseError::Coordinate(e) => write!(f, "coordinate: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<CoordinateError> for ParseError {
    fn from(error: CoordinateError) -> Self {
        ParseError::Coordinate(error)
    }
}

/// Return true if the sentence is a known type we choose not to process.
///
/// Lines without any `,` are never classified here; they fall through to
/// [`parse_rmc`], which rejects them.
pub fn is_unsupported(line: &str) -> bool {
    match line.split_once(',') {
        Some((id, _)) => UNSUPPORTED_SENTENCES.contains(&id),
        None => false,
    }
}

/// Parse an RMC sentence whose checksum has already been verified.
///
/// ```text
///  0  $GPRMC / $GNRMC
///  1  UTC time   HHMMSS.sss
///  2  status     A = active, V = void
///  3  latitude   DDMM.MMMM
///  4  N/S
///  5  longitude  DDDMM.MMMM
///  6  E/W
///  7  speed over ground, knots
/// ```
///
/// Fields past index 7 (course, date, magnetic variation, mode) are ignored.
pub fn parse_rmc(line: &str) -> Result<Record, ParseError> {
    // The *HH tail must not end up in the last field
    let body = match line.rfind('*') {
        Some(star) => &line[..star],
        None => line,
    };

    let parts: Vec<&str> = body.split(',').collect();

    if parts.len() < MIN_FIELDS {
        return Err(ParseError::TooFewFields(parts.len()));
    }

    if !SUPPORTED_SENTENCES.contains(&parts[0]) {
        return Err(ParseError::UnknownSentence);
    }

    if !parts[2].starts_with(STATUS_ACTIVE) {
        return Err(ParseError::NoFix);
    }

    if parts[1].is_empty() {
        return Err(ParseError::MissingTimestamp);
    }

    let lat_hem = single_char(parts[4]).ok_or(ParseError::BadHemisphere)?;
    let lon_hem = single_char(parts[6]).ok_or(ParseError::BadHemisphere)?;

    let latitude = nmea_to_decimal(parts[3], lat_hem)?;
    let longitude = nmea_to_decimal(parts[5], lon_hem)?;

    // Missing or garbled speed does not invalidate the position
    let speed_knots = parts[7]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    Ok(Record::new(
        parts[1],
        latitude,
        longitude,
        speed_knots * KNOTS_TO_MPS,
    ))
}

/// Convert NMEA `DD[D]MM.MMMM` to signed decimal degrees.
///
/// The two digits before the decimal point start the minutes; everything
/// ahead of them is degrees. `S` and `W` negate the result. Bounds are not
/// checked.
pub fn nmea_to_decimal(raw: &str, hemisphere: char) -> Result<f64, CoordinateError> {
    let dot = match raw.find('.') {
        Some(idx) if idx >= 2 => idx,
        _ => return Err(CoordinateError::MissingDecimalPoint),
    };

    let degrees = raw
        .get(..dot - 2)
        .and_then(parse_finite)
        .ok_or(CoordinateError::InvalidDegrees)?;
    let minutes = raw
        .get(dot - 2..)
        .and_then(parse_finite)
        .ok_or(CoordinateError::InvalidMinutes)?;

    let value = degrees + minutes / 60.0;
    Ok(match hemisphere {
        'S' | 'W' => -value,
        _ => value,
    })
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
