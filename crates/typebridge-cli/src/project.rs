//! Locating and loading the project configuration

use anyhow::{Context, Result};
use std::path::PathBuf;
use typebridge::{CONFIG_FILE, Pipeline};

/// Configuration path given on the command line, or `./typebridge.toml`.
pub fn config_path(config: Option<PathBuf>) -> PathBuf {
    config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Load the pipeline for a configuration file.
pub fn load(config: Option<PathBuf>) -> Result<Pipeline> {
    let path = config_path(config);
    Pipeline::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}
