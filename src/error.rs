// src/error.rs
//! Error types for the route processor
//!
//! Per-line failures (bad checksum, rejected fields) are not errors; they are
//! reported as [`crate::processor::LineOutcome`] values. This type covers the
//! shell around the pipeline: files, config, output.

use std::fmt;

pub type Result<T> = std::result::Result<T, RouteError>;

#[derive(Debug)]
pub enum RouteError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Io(e) => write!(f, "IO error: {}", e),
            RouteError::Json(e) => write!(f, "JSON error: {}", e),
            RouteError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Io(e) => Some(e),
            RouteError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RouteError {
    fn from(error: std::io::Error) -> Self {
        RouteError::Io(error)
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(error: serde_json::Error) -> Self {
        RouteError::Json(error)
    }
}
