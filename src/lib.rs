// src/lib.rs
//! NMEA Route Library
//!
//! Turns NMEA 0183 logs into a cleaned route: checksum and field validation,
//! coordinate conversion, then timestamp and jitter deduplication.

pub mod cli;
pub mod config;
pub mod dedup;
pub mod display;
pub mod error;
pub mod gps;
pub mod logging;
pub mod processor;
pub mod route;

// Re-export main types for convenience
pub use dedup::{dedup_spatial, dedup_temporal, SPATIAL_EPSILON};
pub use error::{Result, RouteError};
pub use gps::{ChecksumOutcome, GpsFix, Record};
pub use processor::{classify_line, LineOutcome, ProcessingSummary, RouteProcessor, RouteReport};
pub use route::build_route_url;
