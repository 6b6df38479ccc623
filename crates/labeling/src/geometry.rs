//! Geometry normalization
//!
//! Validates raw position data and maps it into a canonical space: bounding
//! box centered on the origin, largest dimension equal to the target extent
//! (2.0 by default). Vertex count and order are preserved so every other
//! per-vertex buffer stays index-aligned with the input.

use glam::Vec3;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::io::{RawMesh, parse_mesh};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.include_point(point);
        }
        aabb
    }

    pub fn include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn center(&self) -> Vec3 {
        self.min * 0.5 + self.max * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }
}

/// A normalized, immutable triangle mesh.
///
/// Positions and normals are stored as `[f32; 3]` so they can be handed to a
/// renderer as flat float buffers without copying.
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
    /// Factor the source coordinates were multiplied by
    scale: f32,
    /// Source-space bounding-box center that now sits at the origin
    source_center: Vec3,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_array(self.positions[index])
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as one flat xyz buffer
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as one flat xyz buffer
    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Corner positions of a triangle
    pub fn triangle(&self, face: usize) -> (Vec3, Vec3, Vec3) {
        let base = face * 3;
        (
            self.position(self.indices[base] as usize),
            self.position(self.indices[base + 1] as usize),
            self.position(self.indices[base + 2] as usize),
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().map(|p| Vec3::from_array(*p)))
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn source_center(&self) -> Vec3 {
        self.source_center
    }
}

/// Check a flat position buffer: present, whole xyz triples, all finite.
pub fn validate_positions(positions: &[f32]) -> Result<(), LoadError> {
    if positions.is_empty() {
        return Err(LoadError::invalid("position buffer is empty"));
    }
    if positions.len() % 3 != 0 {
        return Err(LoadError::invalid(format!(
            "position buffer length {} is not a multiple of 3",
            positions.len()
        )));
    }
    if let Some(index) = positions.iter().position(|c| !c.is_finite()) {
        return Err(LoadError::invalid(format!(
            "vertex {} has a non-finite coordinate",
            index / 3
        )));
    }
    Ok(())
}

/// Center and uniformly rescale a raw mesh.
///
/// Fails with `DegenerateGeometry` when every vertex shares one point (the
/// largest bounding-box dimension is zero).
pub fn normalize(raw: RawMesh, target_extent: f32) -> Result<Mesh, LoadError> {
    validate_positions(&raw.positions)?;

    if raw.indices.len() % 3 != 0 {
        return Err(LoadError::invalid(format!(
            "index buffer length {} is not a multiple of 3",
            raw.indices.len()
        )));
    }
    let vertex_count = raw.vertex_count();
    if let Some(&bad) = raw.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(LoadError::invalid(format!(
            "face references vertex {} but mesh has {} vertices",
            bad, vertex_count
        )));
    }

    let source: Vec<[f32; 3]> = bytemuck::cast_slice::<f32, [f32; 3]>(&raw.positions).to_vec();
    let bounds = Aabb::from_points(source.iter().map(|p| Vec3::from_array(*p)));

    // Extents of finite f32 input can exceed f32::MAX
    let (min, max) = (bounds.min.as_dvec3(), bounds.max.as_dvec3());
    let max_dimension = (max - min).max_element();
    if max_dimension == 0.0 {
        return Err(LoadError::DegenerateGeometry { max_dimension: 0.0 });
    }

    let center = (min + max) * 0.5;
    let scale = f64::from(target_extent) / max_dimension;
    debug!(
        "Normalizing: center=({:.3}, {:.3}, {:.3}), max dimension={:.3}, scale={:.5}",
        center.x, center.y, center.z, max_dimension, scale
    );

    let positions: Vec<[f32; 3]> = source
        .iter()
        .map(|p| ((Vec3::from_array(*p).as_dvec3() - center) * scale).as_vec3().to_array())
        .collect();
    if positions.iter().flatten().any(|c| !c.is_finite()) {
        return Err(LoadError::invalid("coordinates out of range after normalization"));
    }
    let normals = compute_vertex_normals(&positions, &raw.indices);

    Ok(Mesh {
        positions,
        normals,
        indices: raw.indices,
        scale: scale as f32,
        source_center: center.as_vec3(),
    })
}

/// Area-weighted vertex normals. Vertices with no incident face get +Z.
pub fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let v0 = Vec3::from_array(positions[i0]);
        let v1 = Vec3::from_array(positions[i1]);
        let v2 = Vec3::from_array(positions[i2]);
        // Unnormalized cross product: length is twice the face area
        let face_normal = (v1 - v0).cross(v2 - v0);
        sums[i0] += face_normal;
        sums[i1] += face_normal;
        sums[i2] += face_normal;
    }

    sums.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z).to_array())
        .collect()
}

/// Parse and normalize mesh bytes in one step.
pub fn load_mesh(bytes: &[u8], filename: &str, target_extent: f32) -> Result<Mesh, LoadError> {
    let raw = parse_mesh(bytes, filename)?;
    let mesh = normalize(raw, target_extent)?;
    info!(
        "Loaded mesh {:?}: {} vertices, {} faces",
        filename,
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(positions: &[f32], indices: &[u32]) -> RawMesh {
        RawMesh {
            positions: positions.to_vec(),
            indices: indices.to_vec(),
        }
    }

    #[test]
    fn test_normalize_centers_and_scales() {
        let mesh = normalize(
            raw(
                &[10.0, 20.0, 30.0, 14.0, 20.0, 30.0, 10.0, 22.0, 31.0],
                &[0, 1, 2],
            ),
            2.0,
        )
        .unwrap();

        let bounds = mesh.bounds();
        assert!((bounds.max_dimension() - 2.0).abs() < 1e-5);
        assert!(bounds.center().length() < 1e-5);
        assert!((mesh.scale() - 0.5).abs() < 1e-6);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_normalize_preserves_vertex_order() {
        let mesh = normalize(raw(&[0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 2.0, 0.0], &[0, 1, 2]), 2.0)
            .unwrap();
        assert!((mesh.position(0) - Vec3::new(-1.0, -0.5, 0.0)).length() < 1e-6);
        assert!((mesh.position(1) - Vec3::new(1.0, -0.5, 0.0)).length() < 1e-6);
        assert!((mesh.position(2) - Vec3::new(-1.0, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_normalize_is_stable_on_own_output() {
        let first = normalize(raw(&[1.0, 1.0, 1.0, 3.0, 5.0, 2.0, 0.0, 2.0, 7.0], &[0, 1, 2]), 2.0)
            .unwrap();
        let again = normalize(raw(first.positions_flat(), first.indices()), 2.0).unwrap();
        assert!((again.scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_invalid_positions() {
        assert!(matches!(
            normalize(raw(&[], &[]), 2.0),
            Err(LoadError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            normalize(raw(&[0.0, 1.0], &[]), 2.0),
            Err(LoadError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            normalize(raw(&[0.0, f32::NAN, 0.0, 1.0, 1.0, 1.0], &[]), 2.0),
            Err(LoadError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            normalize(raw(&[0.0, f32::INFINITY, 0.0], &[]), 2.0),
            Err(LoadError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let result = normalize(raw(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 3]), 2.0);
        assert!(matches!(result, Err(LoadError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_rejects_degenerate_bounds() {
        let result = normalize(raw(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], &[0, 1, 2]), 2.0);
        assert!(matches!(result, Err(LoadError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_normalize_huge_finite_coordinates() {
        let mesh = normalize(
            raw(
                &[3.0e38, 0.0, 0.0, 3.2e38, 1.0e36, 0.0, 3.1e38, 0.0, 1.0e36],
                &[0, 1, 2],
            ),
            2.0,
        )
        .unwrap();

        assert!(mesh.positions().iter().flatten().all(|c| c.is_finite()));
        assert!(mesh.source_center().is_finite());
        let bounds = mesh.bounds();
        assert!((bounds.max_dimension() - 2.0).abs() < 1e-5);
        assert!(bounds.center().length() < 1e-5);
    }

    #[test]
    fn test_aabb_center_of_extreme_bounds() {
        let bounds = Aabb::from_points([Vec3::splat(3.0e38), Vec3::splat(3.2e38)]);
        assert!(bounds.center().is_finite());
    }

    #[test]
    fn test_vertex_normals() {
        // Triangle in the XY plane, counter-clockwise seen from +Z
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [5.0, 5.0, 5.0]];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2]);
        for n in &normals[..3] {
            assert!((Vec3::from_array(*n) - Vec3::Z).length() < 1e-6);
        }
        // Unreferenced vertex falls back to +Z
        assert_eq!(normals[3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_flat_buffers_are_aligned() {
        let mesh = normalize(raw(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]), 2.0)
            .unwrap();
        assert_eq!(mesh.positions_flat().len(), 9);
        assert_eq!(mesh.normals_flat().len(), 9);
    }
}
