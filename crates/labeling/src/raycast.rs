//! Ray-mesh intersection for turning a pointer ray into a brush center.
//!
//! The camera collaborator supplies a ray through the pointer; this module
//! finds where it first meets the mesh surface using the Moller-Trumbore
//! algorithm.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Mesh;

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f32 = 1e-6;

/// A ray in normalized mesh space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    /// Need not be unit length; `MeshHit::distance` is in units of it
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray crosses one triangle
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    pub t: f32,
    /// Corner weights, summing to 1
    pub weights: Vec3,
}

impl TriangleHit {
    /// The hit point rebuilt from the corner weights
    pub fn interpolate(&self, v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
        v0 * self.weights.x + v1 * self.weights.y + v2 * self.weights.z
    }
}

/// Closest surface point hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    pub point: Vec3,
    /// Triangle index
    pub face: usize,
    /// Corner of `face` closest to `point`
    pub vertex: usize,
    /// Ray parameter of the hit
    pub distance: f32,
}

/// Moller-Trumbore intersection. Only hits in front of the origin count;
/// both windings are accepted.
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray lies in the triangle's plane or misses it
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray_origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit {
        t,
        weights: Vec3::new(1.0 - u - v, u, v),
    })
}

/// Cast a ray against every triangle and return the closest hit.
///
/// Brute force, like the radius query; the stroke controller calls it once
/// per scene tick.
pub fn cast_ray(mesh: &Mesh, ray: &Ray) -> Option<MeshHit> {
    let mut closest: Option<(TriangleHit, usize)> = None;

    for face in 0..mesh.face_count() {
        let (v0, v1, v2) = mesh.triangle(face);
        if let Some(hit) = ray_triangle_intersection(ray.origin, ray.direction, v0, v1, v2) {
            let dominated = matches!(&closest, Some((prev, _)) if hit.t >= prev.t);
            if !dominated {
                closest = Some((hit, face));
            }
        }
    }

    closest.map(|(hit, face)| {
        let (v0, v1, v2) = mesh.triangle(face);
        let point = hit.interpolate(v0, v1, v2);
        let base = face * 3;
        let corner = [v0, v1, v2]
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.distance_squared(point).total_cmp(&b.distance_squared(point)))
            .map_or(0, |(i, _)| i);
        MeshHit {
            point,
            face,
            vertex: mesh.indices()[base + corner] as usize,
            distance: hit.t,
        }
    })
}
