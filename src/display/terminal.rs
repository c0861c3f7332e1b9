// src/display/terminal.rs
//! Terminal table output

use super::RouteDisplay;
use crate::{
    error::Result,
    gps::GpsFix,
    processor::RouteReport,
};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::Write;

const TABLE_WIDTH: usize = 58;

pub struct TerminalDisplay {
    color: bool,
}

impl TerminalDisplay {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn heading<W: Write>(&self, out: &mut W, title: &str, color: Color) -> Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color), Print(title), ResetColor, Print("\n"))?;
        } else {
            queue!(out, Print(title), Print("\n"))?;
        }
        Ok(())
    }

    fn render_summary<W: Write>(&self, out: &mut W, report: &RouteReport) -> Result<()> {
        let s = &report.summary;
        self.heading(out, "=== Processing Summary ===", Color::Green)?;

        let rows = [
            ("Total lines read", s.lines_read),
            ("Checksum failures", s.checksum_failures),
            ("Not relevant (skipped)", s.unsupported),
            ("Parse/validation fail", s.parse_failures()),
            ("Valid records parsed", s.records_parsed),
            ("After timestamp dedup", report.after_temporal),
            ("After spatial dedup", report.route.len()),
        ];
        for (label, value) in rows {
            queue!(out, Print(format!("  {:<22}: {}\n", label, value)))?;
        }
        if s.files_skipped > 0 {
            queue!(out, Print(format!("  {:<22}: {}\n", "Files skipped", s.files_skipped)))?;
        }
        queue!(out, Print("\n"))?;
        Ok(())
    }

    fn render_route_table<W: Write>(&self, out: &mut W, report: &RouteReport) -> Result<()> {
        self.heading(out, "=== Route Points ===", Color::Yellow)?;
        queue!(
            out,
            Print(format!(
                "{:<6}{:<14}{:<14}{:<14}{}\n",
                "#", "Time", "Latitude", "Longitude", "Speed (m/s)"
            )),
            Print("-".repeat(TABLE_WIDTH)),
            Print("\n")
        )?;

        for (i, record) in report.route.iter().enumerate() {
            let fix = GpsFix::from(record);
            let (lat, lon) = fix.latlon().unwrap_or_default();
            let speed = fix.speed_mps().unwrap_or_default();

            queue!(
                out,
                Print(format!(
                    "{:<6}{:<14}{:<14.6}{:<14.6}{:.6}\n",
                    i + 1,
                    record.format_time(),
                    lat,
                    lon,
                    speed
                ))
            )?;
        }
        queue!(out, Print("\n"))?;
        Ok(())
    }

    fn render_url<W: Write>(&self, out: &mut W, report: &RouteReport) -> Result<()> {
        self.heading(out, "=== Google Maps URL ===", Color::Cyan)?;
        queue!(out, Print(&report.url), Print("\n"))?;
        Ok(())
    }
}

impl RouteDisplay for TerminalDisplay {
    fn render<W: Write>(&self, out: &mut W, report: &RouteReport) -> Result<()> {
        self.render_summary(out, report)?;

        if report.is_empty() {
            queue!(out, Print("No valid GPS points found.\n"))?;
        } else {
            self.render_route_table(out, report)?;
            self.render_url(out, report)?;
        }

        out.flush()?;
        Ok(())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new(true)
    }
}
