// src/display/mod.rs
//! Display modules for different output formats

pub mod json;
pub mod terminal;

use crate::{error::Result, processor::RouteReport};
use std::io::Write;

/// Trait for different report renderers
pub trait RouteDisplay {
    /// Write the whole report to `out`
    fn render<W: Write>(&self, out: &mut W, report: &RouteReport) -> Result<()>;
}

/// Render the report in the format the config asks for
pub fn render_report<W: Write>(out: &mut W, report: &RouteReport, json: bool, color: bool) -> Result<()> {
    if json {
        json::JsonDisplay.render(out, report)
    } else {
        terminal::TerminalDisplay::new(color).render(out, report)
    }
}
