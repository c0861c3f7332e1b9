// src/display/json.rs
//! Machine-readable JSON report

use super::RouteDisplay;
use crate::{error::Result, processor::RouteReport};
use std::io::Write;

pub struct JsonDisplay;

impl RouteDisplay for JsonDisplay {
    fn render<W: Write>(&self, out: &mut W, report: &RouteReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
