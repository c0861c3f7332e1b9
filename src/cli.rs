// src/cli.rs
//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// NMEA log files, processed in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Spatial dedup threshold in decimal degrees
    #[arg(short, long)]
    pub epsilon: Option<f64>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Config file (defaults to ~/.config/nmea-route/config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, default_value_t = log::LevelFilter::Warn)]
    pub logging_level: log::LevelFilter,
}
