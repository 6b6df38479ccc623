//! Brush settings for label painting

use anamark_config::BrushDefaults;
use serde::{Deserialize, Serialize};

use crate::falloff::FalloffKind;

/// Spherical brush configuration
///
/// Pure configuration supplied by the UI. The session reads it on every
/// sample and never changes it on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    /// Radius in normalized mesh units
    pub size: f32,
    /// Strength in (0, 1]
    pub strength: f32,
    /// Falloff curve from center to edge
    pub falloff: FalloffKind,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::from_defaults(&BrushDefaults::default())
    }
}

impl BrushSettings {
    /// Create brush settings, clamping strength into (0, 1] and size above zero
    pub fn new(size: f32, strength: f32, falloff: FalloffKind) -> Self {
        Self {
            size: size.max(f32::EPSILON),
            strength: strength.clamp(f32::EPSILON, 1.0),
            falloff,
        }
    }

    /// Build from configured defaults with linear falloff
    pub fn from_defaults(defaults: &BrushDefaults) -> Self {
        Self::new(defaults.size, defaults.strength, FalloffKind::default())
    }

    /// Minimum pointer travel before the next stroke sample is applied
    pub fn sample_spacing(&self, ratio: f32) -> f32 {
        self.size * ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_defaults() {
        let brush = BrushSettings::default();
        assert!((brush.size - 0.1).abs() < 0.001);
        assert!((brush.strength - 1.0).abs() < 0.001);
        assert_eq!(brush.falloff, FalloffKind::Linear);
    }

    #[test]
    fn test_brush_new_clamps() {
        let brush = BrushSettings::new(-1.0, 3.0, FalloffKind::Smooth);
        assert!(brush.size > 0.0);
        assert!((brush.strength - 1.0).abs() < 0.001);

        let brush = BrushSettings::new(0.5, 0.0, FalloffKind::Constant);
        assert!(brush.strength > 0.0);
    }

    #[test]
    fn test_sample_spacing() {
        let brush = BrushSettings::new(0.5, 1.0, FalloffKind::Linear);
        assert!((brush.sample_spacing(0.1) - 0.05).abs() < 1e-6);
    }
}
