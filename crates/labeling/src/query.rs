//! Radius queries over vertex positions.
//!
//! The only implementation is a brute-force scan, O(vertex count) per call.
//! Calls are rate limited by the stroke controller, so this stays cheap at
//! anatomical-model scale. A spatial index can replace it behind
//! [`RadiusQuery`] without changing behaviour.

use glam::Vec3;

use crate::geometry::Mesh;

/// Find vertices within a distance of a point
pub trait RadiusQuery {
    /// Indices of every vertex with `distance(vertex, center) <= radius`,
    /// in ascending index order
    fn query_radius(&self, center: Vec3, radius: f32) -> Vec<usize>;
}

/// Brute-force scan over a position slice
pub fn query_radius(positions: &[[f32; 3]], center: Vec3, radius: f32) -> Vec<usize> {
    if !(radius >= 0.0) {
        return Vec::new();
    }
    let radius_sq = radius * radius;
    positions
        .iter()
        .enumerate()
        .filter(|(_, p)| Vec3::from_array(**p).distance_squared(center) <= radius_sq)
        .map(|(index, _)| index)
        .collect()
}

impl RadiusQuery for Mesh {
    fn query_radius(&self, center: Vec3, radius: f32) -> Vec<usize> {
        query_radius(self.positions(), center, radius)
    }
}
