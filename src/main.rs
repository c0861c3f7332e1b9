// src/main.rs
//! nmea-route - clean NMEA logs into a deduplicated route

use anyhow::Context;
use clap::Parser;
use nmea_route::{cli::Cli, config::RouteConfig, display, logging, processor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.logging_level);

    let mut config = match &cli.config {
        Some(path) => RouteConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RouteConfig::load().unwrap_or_else(|e| {
            log::warn!("{}, using defaults", e);
            RouteConfig::default()
        }),
    };
    config.apply_cli(&cli).context("invalid options")?;
    log::debug!("using {:?}", config);

    let report = processor::process_files(&cli.files, config.spatial_epsilon).await;

    let mut stdout = std::io::stdout().lock();
    display::render_report(&mut stdout, &report, config.json, config.color)?;

    Ok(())
}
