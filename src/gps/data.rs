// src/gps/data.rs
//! GPS data structures and utilities

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One validated position fix extracted from an RMC sentence.
///
/// Only built by a successful parse, so every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub timestamp: String, // HHMMSS.sss, the dedup key
    pub latitude: f64,     // decimal degrees, +N / -S
    pub longitude: f64,    // decimal degrees, +E / -W
    pub speed: f64,        // m/s
}

impl Record {
    pub fn new(timestamp: impl Into<String>, latitude: f64, longitude: f64, speed: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            latitude,
            longitude,
            speed,
        }
    }

    /// Parse the `HHMMSS[.sss]` key into a time of day
    pub fn time_of_day(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.timestamp, "%H%M%S%.f").ok()
    }

    /// Format the timestamp for display, falling back to the raw key
    pub fn format_time(&self) -> String {
        match self.time_of_day() {
            Some(t) => t.format("%H:%M:%S%.3f").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

/// Bitmask of valid fields in a [`GpsFix`]
pub type GpsMask = u64;

pub const TIME_SET: GpsMask = 1 << 0;
pub const MODE_SET: GpsMask = 1 << 1;
pub const LATLON_SET: GpsMask = 1 << 4;
pub const SPEED_SET: GpsMask = 1 << 8;

pub const STATUS_NO_FIX: i32 = 0;
pub const STATUS_VALID: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum FixMode {
    #[default]
    NotSeen,
    NoFix,
    Fix2D,
    Fix3D,
}

/// gpsd-style fix container.
///
/// Consumers go through [`GpsFix::latlon`] and [`GpsFix::speed_mps`] rather
/// than reading the raw fields, so a fix from any source is treated the same
/// way: a value is only trusted when its flag is set and the mode is at
/// least 2D.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub set: GpsMask,
    pub mode: FixMode,
    pub status: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64, // m/s
}

impl GpsFix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_latlon(&self) -> bool {
        self.set & LATLON_SET != 0 && self.mode >= FixMode::Fix2D
    }

    pub fn has_speed(&self) -> bool {
        self.set & SPEED_SET != 0 && self.mode >= FixMode::Fix2D
    }

    pub fn latlon(&self) -> Option<(f64, f64)> {
        self.has_latlon().then_some((self.latitude, self.longitude))
    }

    pub fn speed_mps(&self) -> Option<f64> {
        self.has_speed().then_some(self.speed)
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        self.speed_mps().map(mps_to_kmh)
    }

    pub fn speed_knots(&self) -> Option<f64> {
        self.speed_mps().map(mps_to_knots)
    }
}

impl From<&Record> for GpsFix {
    fn from(record: &Record) -> Self {
        Self {
            set: LATLON_SET | SPEED_SET,
            mode: FixMode::Fix2D,
            status: STATUS_VALID,
            latitude: record.latitude,
            longitude: record.longitude,
            speed: record.speed,
        }
    }
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

pub fn mps_to_knots(mps: f64) -> f64 {
    mps * 1.9438444924406048
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_from_record() {
        let record = Record::new("123519", 48.1173, 11.516667, 11.5);
        let fix = GpsFix::from(&record);

        assert_eq!(fix.set, LATLON_SET | SPEED_SET);
        assert_eq!(fix.mode, FixMode::Fix2D);
        assert_eq!(fix.status, STATUS_VALID);
        assert_eq!(fix.latlon(), Some((48.1173, 11.516667)));
        assert_eq!(fix.speed_mps(), Some(11.5));
    }

    #[test]
    fn test_getters_respect_flags() {
        let mut fix = GpsFix::new();
        fix.latitude = 1.0;
        fix.longitude = 2.0;
        fix.mode = FixMode::Fix3D;
        assert_eq!(fix.latlon(), None);

        fix.set = LATLON_SET;
        assert_eq!(fix.latlon(), Some((1.0, 2.0)));
        assert_eq!(fix.speed_mps(), None);
    }

    #[test]
    fn test_getters_require_2d_mode() {
        let mut fix = GpsFix::from(&Record::new("000000", 1.0, 2.0, 3.0));
        fix.mode = FixMode::NoFix;
        assert!(!fix.has_latlon());
        assert!(!fix.has_speed());
    }

    #[test]
    fn test_speed_conversions() {
        assert!((mps_to_kmh(10.0) - 36.0).abs() < 1e-9);
        assert!((mps_to_knots(0.514444) - 1.0).abs() < 1e-5);

        let fix = GpsFix::from(&Record::new("000000", 0.0, 0.0, 10.0));
        assert_eq!(fix.speed_kmh(), Some(36.0));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(Record::new("123519.250", 0.0, 0.0, 0.0).format_time(), "12:35:19.250");
        assert_eq!(Record::new("123519", 0.0, 0.0, 0.0).format_time(), "12:35:19.000");
        assert_eq!(Record::new("garbage", 0.0, 0.0, 0.0).format_time(), "garbage");
    }
}
