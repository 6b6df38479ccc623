//! Configuration resolution for the command-line driver

use std::path::Path;

use anamark_config::AnamarkConfig;
use anyhow::{Context, Result};
use tracing::info;

/// An explicit `--config` path wins over the environment
pub fn resolve(path: Option<&Path>) -> Result<AnamarkConfig> {
    let config = match path {
        Some(path) => AnamarkConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => AnamarkConfig::from_env().context("Failed to load config from environment")?,
    };

    info!(
        "Config: brush size {}, secondary button {:?}, {} preset classes",
        config.brush.size,
        config.engine.secondary_button,
        config.presets.len()
    );
    Ok(config)
}
