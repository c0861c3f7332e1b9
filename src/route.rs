// src/route.rs
//! Shareable route URL

use crate::gps::Record;
use std::fmt::Write;

pub const GOOGLE_MAPS_BASE: &str = "https://www.google.com/maps/dir";

/// Build a Google Maps directions URL with one `/lat,lon` stop per point.
///
/// Returns an empty string for an empty route.
pub fn build_route_url(route: &[Record]) -> String {
    if route.is_empty() {
        return String::new();
    }

    let mut url = String::from(GOOGLE_MAPS_BASE);
    for point in route {
        // Writing into a String cannot fail
        let _ = write!(url, "/{:.6},{:.6}", point.latitude, point.longitude);
    }
    url
}
