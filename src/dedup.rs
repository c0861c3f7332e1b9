// src/dedup.rs
//! Temporal and spatial deduplication of fixes

use crate::gps::Record;
use std::collections::BTreeMap;

/// Default jitter threshold in decimal degrees (~1.1 m at the equator)
pub const SPATIAL_EPSILON: f64 = 1e-5;

/// Keep one record per timestamp, the last one seen.
///
/// Later records for the same epoch are receiver corrections and win over
/// earlier ones. Timestamps are fixed-width `HHMMSS.sss` strings, so the
/// map's key order is chronological order.
pub fn dedup_temporal(records: &[Record]) -> Vec<Record> {
    let mut by_time: BTreeMap<&str, &Record> = BTreeMap::new();
    for record in records {
        by_time.insert(record.timestamp.as_str(), record);
    }
    by_time.into_values().cloned().collect()
}

/// Drop points that have not moved more than `epsilon` degrees in either
/// axis from the last point that was kept.
///
/// Comparing against the last kept point rather than the previous input
/// means slow drift still produces a new point once it adds up.
pub fn dedup_spatial(records: &[Record], epsilon: f64) -> Vec<Record> {
    let mut kept: Vec<Record> = Vec::with_capacity(records.len());

    for record in records {
        let moved = match kept.last() {
            Some(prev) => {
                (record.latitude - prev.latitude).abs() > epsilon
                    || (record.longitude - prev.longitude).abs() > epsilon
            }
            None => true,
        };
        if moved {
            kept.push(record.clone());
        }
    }

    kept
}
