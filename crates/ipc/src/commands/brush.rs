//! Brush command types for the labeling brush.

use serde::{Deserialize, Serialize};

/// Falloff curve of the spherical brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FalloffCurve {
    Constant,
    #[default]
    Linear,
    Smooth,
}

/// Commands for controlling the brush.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BrushCommand {
    /// Set brush radius in normalized mesh units
    SetSize { size: f32 },
    /// Set brush strength (0.0-1.0)
    SetStrength { strength: f32 },
    /// Set falloff curve
    SetFalloff { falloff: FalloffCurve },
}
