//! Per-vertex RGB color buffer
//!
//! The buffer is a rendering artifact, never the record of what is labeled.
//! It holds two index-aligned copies:
//!
//! - `original`: the baseline set once at load and never mutated
//! - `current`: what the renderer shows
//!
//! Two ways exist to bring `current` up to date and each has its trigger:
//!
//! - [`VertexColorBuffer::recompute`]: full overwrite from the assignment
//!   maps, used when classes or their visibility change
//! - [`VertexColorBuffer::blend_toward`] / [`VertexColorBuffer::fade_to_original`]:
//!   incremental lerp used by live painting, so soft brush edges accumulate
//!   across overlapping samples

use tracing::debug;

use crate::assignment::AssignmentMap;
use crate::classes::ClassResolver;

/// Original baseline plus current per-vertex colors
#[derive(Debug, Clone)]
pub struct VertexColorBuffer {
    original: Vec<[f32; 3]>,
    current: Vec<[f32; 3]>,
}

impl VertexColorBuffer {
    /// Every vertex set to `gray` in both copies
    pub fn new(vertex_count: usize, gray: f32) -> Self {
        let original = vec![[gray; 3]; vertex_count];
        Self {
            current: original.clone(),
            original,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.original.len()
    }

    pub fn original(&self) -> &[[f32; 3]] {
        &self.original
    }

    pub fn current(&self) -> &[[f32; 3]] {
        &self.current
    }

    #[inline]
    pub fn get(&self, vertex: usize) -> Option<[f32; 3]> {
        self.current.get(vertex).copied()
    }

    /// Current colors as one flat rgb buffer for GPU upload
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.current)
    }

    /// Current color of a vertex quantized to 8 bits per channel
    pub fn to_rgb8(&self, vertex: usize) -> Option<[u8; 3]> {
        self.get(vertex)
            .map(|rgb| rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
    }

    /// Rebuild `current` from the baseline and the assignment layers.
    ///
    /// Layers are applied in order, later ones overwriting earlier ones.
    /// Entries whose class no longer resolves, or is hidden, are skipped so
    /// the vertex keeps whatever a lower layer (or the baseline) gave it.
    pub fn recompute(&mut self, layers: &[(&AssignmentMap, &dyn ClassResolver)]) {
        self.current.copy_from_slice(&self.original);

        let mut skipped = 0usize;
        for (map, resolver) in layers {
            for (vertex, class_id) in map.iter() {
                let Some(slot) = self.current.get_mut(vertex as usize) else {
                    skipped += 1;
                    continue;
                };
                match resolver.resolve(class_id) {
                    Some(class) if class.visible => *slot = class.color.to_unit(),
                    _ => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            debug!("Color recompute skipped {} hidden or orphaned entries", skipped);
        }
    }

    /// `current += (target - current) * amount`
    #[inline]
    pub fn blend_toward(&mut self, vertex: usize, target: [f32; 3], amount: f32) {
        if let Some(slot) = self.current.get_mut(vertex) {
            *slot = lerp(*slot, target, amount);
        }
    }

    /// Blend a vertex back toward its baseline color
    #[inline]
    pub fn fade_to_original(&mut self, vertex: usize, amount: f32) {
        if let Some(&target) = self.original.get(vertex) {
            self.blend_toward(vertex, target, amount);
        }
    }
}

#[inline]
fn lerp(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    // Full strength lands exactly on the target so erase restores the baseline bit for bit
    if t >= 1.0 {
        return to;
    }
    let t = t.max(0.0);
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
    ]
}
