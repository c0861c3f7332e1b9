// src/gps/mod.rs
//! GPS data handling and parsing

pub mod checksum;
pub mod data;
pub mod nmea;

pub use checksum::{verify, ChecksumOutcome};
pub use data::{GpsFix, Record};
pub use nmea::{is_unsupported, nmea_to_decimal, parse_rmc, ParseError};
