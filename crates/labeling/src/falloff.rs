//! Brush falloff curves.

use serde::{Deserialize, Serialize};

/// Falloff curve for brush influence.
///
/// Determines how brush strength decreases from center to edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FalloffKind {
    /// Full strength everywhere inside the radius
    Constant = 0,
    /// strength = 1 - distance/radius
    #[default]
    Linear = 1,
    /// strength = 1 - (distance/radius)²
    Smooth = 2,
}

impl FalloffKind {
    /// Weight at a normalized distance (0.0 = center, 1.0 = edge).
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            FalloffKind::Constant => 1.0,
            FalloffKind::Linear => 1.0 - t,
            FalloffKind::Smooth => 1.0 - t * t,
        }
    }
}

/// Brush strength at `distance` from the brush center.
///
/// Anything beyond `radius` gets zero, whatever the curve. This is the
/// authoritative gate: callers apply it even to vertices a radius query
/// already returned.
pub fn strength(distance: f32, radius: f32, kind: FalloffKind, base_strength: f32) -> f32 {
    if !(distance <= radius) || radius <= 0.0 {
        return 0.0;
    }
    base_strength * kind.evaluate(distance / radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [FalloffKind; 3] = [FalloffKind::Constant, FalloffKind::Linear, FalloffKind::Smooth];

    #[test]
    fn test_outside_radius_is_zero() {
        for kind in KINDS {
            assert_eq!(strength(1.01, 1.0, kind, 1.0), 0.0);
            assert_eq!(strength(5.0, 0.5, kind, 0.8), 0.0);
        }
    }

    #[test]
    fn test_constant_is_flat_inside_radius() {
        for d in [0.0, 0.2, 0.5, 0.99, 1.0] {
            assert!((strength(d, 1.0, FalloffKind::Constant, 0.6) - 0.6).abs() < 1e-6);
        }
    }

    #[test]
    fn test_curves_hit_endpoints() {
        for kind in [FalloffKind::Linear, FalloffKind::Smooth] {
            assert!((strength(0.0, 2.0, kind, 0.75) - 0.75).abs() < 1e-6);
            assert!(strength(2.0, 2.0, kind, 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for kind in [FalloffKind::Linear, FalloffKind::Smooth] {
            let mut previous = f32::INFINITY;
            for step in 0..=100 {
                let d = step as f32 / 100.0;
                let s = strength(d, 1.0, kind, 1.0);
                assert!(s <= previous, "{kind:?} increased at distance {d}");
                previous = s;
            }
        }
    }

    #[test]
    fn test_smooth_is_softer_than_linear() {
        // 1 - t² stays above 1 - t inside the brush
        let linear = strength(0.5, 1.0, FalloffKind::Linear, 1.0);
        let smooth = strength(0.5, 1.0, FalloffKind::Smooth, 1.0);
        assert!((linear - 0.5).abs() < 1e-6);
        assert!((smooth - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_nan_distance_is_zero() {
        assert_eq!(strength(f32::NAN, 1.0, FalloffKind::Constant, 1.0), 0.0);
    }
}
