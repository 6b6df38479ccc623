//! Pointer input routed through the stroke controller

use glam::Vec3;

use super::{ApplyReport, LabelingSession};
use crate::raycast::{Ray, cast_ray};
use crate::stroke::PointerButton;

impl LabelingSession {
    pub fn pointer_press(&mut self, button: PointerButton) {
        self.stroke.press(button, self.tool);
    }

    pub fn pointer_release(&mut self, button: PointerButton) {
        self.stroke.release(button);
    }

    /// One scene tick with the current pointer ray (`None` when the pointer
    /// is outside the viewport). Casts the ray and applies a sample if the
    /// stroke controller accepts the hit.
    pub fn tick(&mut self, ray: Option<&Ray>) -> Option<ApplyReport> {
        if !self.stroke.is_down() || self.stroke.camera_has_pointer() {
            return None;
        }
        let hit = match (ray, self.mesh.as_ref()) {
            (Some(ray), Some(mesh)) => cast_ray(mesh, ray).map(|hit| hit.point),
            _ => None,
        };
        self.tick_at(hit)
    }

    /// One scene tick with an already resolved surface point
    pub fn tick_at(&mut self, hit: Option<Vec3>) -> Option<ApplyReport> {
        let sample = self.stroke.tick(hit, &self.brush, self.tool)?;
        Some(self.apply_at(sample.point, sample.erase))
    }
}
