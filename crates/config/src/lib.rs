//! Shared configuration for Anamark
//!
//! This crate provides the single source of truth for the labeling engine's
//! tunables (baseline color, normalization extent, stroke spacing), brush
//! defaults, and the label presets a session starts with. Both the labeling
//! core and the command-line driver read from here.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Neutral gray every vertex starts with (R = G = B).
pub const DEFAULT_BASELINE_GRAY: f32 = 0.7;

/// Largest bounding-box dimension after normalization.
pub const DEFAULT_TARGET_EXTENT: f32 = 2.0;

/// Minimum pointer travel between stroke samples, as a fraction of brush size.
pub const DEFAULT_SAMPLE_SPACING_RATIO: f32 = 0.1;

/// Default brush radius in normalized mesh units.
pub const DEFAULT_BRUSH_SIZE: f32 = 0.1;

/// Default brush strength.
pub const DEFAULT_BRUSH_STRENGTH: f32 = 1.0;

/// Environment variable holding a path to a JSON config file.
pub const CONFIG_PATH_ENV: &str = "ANAMARK_CONFIG";

/// Environment variable overriding the secondary-button behaviour.
pub const SECONDARY_BUTTON_ENV: &str = "ANAMARK_SECONDARY_BUTTON";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// What the secondary pointer button does while a paint or erase tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryButtonAction {
    /// Suspend painting and hand the pointer to camera rotation
    #[default]
    Orbit,
    /// Force erase samples while held, regardless of the selected tool
    Erase,
}

impl SecondaryButtonAction {
    /// Parse from the `ANAMARK_SECONDARY_BUTTON` value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "orbit" => Some(Self::Orbit),
            "erase" => Some(Self::Erase),
            _ => None,
        }
    }
}

/// Engine tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gray level of the original color baseline
    pub baseline_gray: f32,
    /// Largest bounding-box dimension after normalization
    pub target_extent: f32,
    /// Stroke sample spacing as a fraction of brush size
    pub sample_spacing_ratio: f32,
    /// Secondary pointer button behaviour
    pub secondary_button: SecondaryButtonAction,
    /// Display name of the implicit single-class mode class
    pub problem_area_name: String,
    /// `#rrggbb` color of the implicit single-class mode class
    pub problem_area_color: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baseline_gray: DEFAULT_BASELINE_GRAY,
            target_extent: DEFAULT_TARGET_EXTENT,
            sample_spacing_ratio: DEFAULT_SAMPLE_SPACING_RATIO,
            secondary_button: SecondaryButtonAction::default(),
            problem_area_name: "Problem area".to_string(),
            problem_area_color: "#ff3b30".to_string(),
        }
    }
}

/// Brush values a session starts with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushDefaults {
    /// Radius in normalized mesh units
    pub size: f32,
    /// Strength in (0, 1]
    pub strength: f32,
}

impl Default for BrushDefaults {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            strength: DEFAULT_BRUSH_STRENGTH,
        }
    }
}

/// A label class created when a session starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelPreset {
    pub name: String,
    /// `#rrggbb`
    pub color: String,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnamarkConfig {
    pub engine: EngineConfig,
    pub brush: BrushDefaults,
    pub presets: Vec<LabelPreset>,
}

impl AnamarkConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Build from the environment
    ///
    /// `ANAMARK_CONFIG` names a JSON file; `ANAMARK_SECONDARY_BUTTON` overrides
    /// the secondary button behaviour. Missing variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Ok(value) = std::env::var(SECONDARY_BUTTON_ENV) {
            match SecondaryButtonAction::parse(&value) {
                Some(action) => config.engine.secondary_button = action,
                None => warn!(
                    "Ignoring {}={:?}, expected \"orbit\" or \"erase\"",
                    SECONDARY_BUTTON_ENV, value
                ),
            }
        }

        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.brush.size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "brush.size must be positive, got {}",
                self.brush.size
            )));
        }
        if !(self.brush.strength > 0.0 && self.brush.strength <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "brush.strength must be in (0, 1], got {}",
                self.brush.strength
            )));
        }
        if !(self.engine.target_extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "engine.target_extent must be positive, got {}",
                self.engine.target_extent
            )));
        }
        if !(0.0..=1.0).contains(&self.engine.sample_spacing_ratio) {
            return Err(ConfigError::Invalid(format!(
                "engine.sample_spacing_ratio must be in [0, 1], got {}",
                self.engine.sample_spacing_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.engine.baseline_gray) {
            return Err(ConfigError::Invalid(format!(
                "engine.baseline_gray must be in [0, 1], got {}",
                self.engine.baseline_gray
            )));
        }
        Ok(())
    }
}
