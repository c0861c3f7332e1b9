// src/config.rs
//! Configuration management with a per-user JSON file

use crate::cli::Cli;
use crate::dedup::SPATIAL_EPSILON;
use crate::error::{Result, RouteError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Jitter threshold in decimal degrees
    pub spatial_epsilon: f64,
    pub color: bool,
    /// Print the report as JSON instead of a table
    pub json: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            spatial_epsilon: SPATIAL_EPSILON,
            color: true,
            json: false,
        }
    }
}

impl RouteConfig {
    /// Load configuration from the default location, or defaults if there is
    /// no config file yet
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RouteError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            RouteError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RouteError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| RouteError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("nmea-route")
            .join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.spatial_epsilon.is_finite() || self.spatial_epsilon < 0.0 {
            return Err(RouteError::Config(format!(
                "spatial_epsilon must be a non-negative number, got {}",
                self.spatial_epsilon
            )));
        }
        Ok(())
    }

    /// Command-line flags take precedence over the file
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(epsilon) = cli.epsilon {
            self.spatial_epsilon = epsilon;
        }
        if cli.json {
            self.json = true;
        }
        if cli.no_color {
            self.color = false;
        }
        self.validate()
    }
}
