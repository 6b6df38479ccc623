//! Paint and erase sample application

use glam::Vec3;
use tracing::debug;

use super::{LabelingSession, SessionEvent};
use crate::assignment::LabelMode;
use crate::classes::LabelClassId;
use crate::falloff;
use crate::query::RadiusQuery;

/// What one applied sample did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Vertices inside the brush with non-zero strength
    pub affected: usize,
    /// Assignment entries added, overwritten or removed
    pub changed: usize,
}

impl LabelingSession {
    /// Apply one paint or erase sample centered on `point`.
    ///
    /// Painting needs a target class: the active class in class-labeling
    /// mode, the implicit class in problem-area mode. Without one (or without
    /// a mesh) this does nothing.
    pub fn apply_at(&mut self, point: Vec3, erase: bool) -> ApplyReport {
        let Some(mesh) = self.mesh.as_ref() else {
            return ApplyReport::default();
        };

        let mode = self.store.mode();
        let target = if erase {
            None
        } else {
            let Some(id) = self.paint_target(mode) else {
                debug!("Paint sample ignored: no active class");
                return ApplyReport::default();
            };
            Some(id)
        };

        // Hidden classes still label, they just do not tint
        let target_color = target
            .and_then(|id| self.resolver(mode).resolve(id))
            .filter(|class| class.visible)
            .map(|class| class.color.to_unit());

        let brush = self.brush;
        let mut report = ApplyReport::default();

        for vertex in mesh.query_radius(point, brush.size) {
            let distance = mesh.position(vertex).distance(point);
            let strength = falloff::strength(distance, brush.size, brush.falloff, brush.strength);
            if strength <= 0.0 {
                continue;
            }
            report.affected += 1;

            let index = vertex as u32;
            match target {
                None => {
                    if self.store.unassign(index) {
                        report.changed += 1;
                    }
                    self.colors.fade_to_original(vertex, strength);
                }
                Some(class) => {
                    if self.store.assign(index, class) {
                        report.changed += 1;
                    }
                    if let Some(color) = target_color {
                        self.colors.blend_toward(vertex, color, strength);
                    }
                }
            }
        }

        debug!(
            "{} at ({:.3}, {:.3}, {:.3}): {} affected, {} changed",
            if erase { "Erase" } else { "Paint" },
            point.x,
            point.y,
            point.z,
            report.affected,
            report.changed
        );

        self.events.push(SessionEvent::Applied {
            erase,
            affected: report.affected,
        });
        if report.changed > 0 {
            self.push_counts();
        }
        report
    }

    /// Class a paint sample assigns in `mode`
    fn paint_target(&self, mode: LabelMode) -> Option<LabelClassId> {
        match mode {
            LabelMode::Classes => self.active_class.filter(|&id| self.classes.contains(id)),
            LabelMode::ProblemArea => Some(LabelClassId::PROBLEM_AREA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushSettings;
    use crate::classes::ClassColor;
    use crate::falloff::FalloffKind;
    use crate::geometry::normalize;
    use crate::io::RawMesh;
    use crate::session::LabelCounts;
    use anamark_config::EngineConfig;

    /// Five vertices on the x axis, normalized to x = -1, -0.5, 0, 0.5, 1
    fn line_session() -> LabelingSession {
        let mut positions = Vec::new();
        for i in 0..5 {
            positions.extend_from_slice(&[i as f32, 0.0, 0.0]);
        }
        let raw = RawMesh {
            positions,
            indices: vec![0, 1, 2, 2, 3, 4],
        };
        let mut session = LabelingSession::new(EngineConfig::default()).unwrap();
        session.install_mesh(normalize(raw, 2.0).unwrap());
        session.take_events();
        session
    }

    #[test]
    fn test_paint_without_class_is_noop() {
        let mut session = line_session();
        let report = session.apply_at(Vec3::ZERO, false);
        assert_eq!(report, ApplyReport::default());
        assert_eq!(session.counts(), LabelCounts::default());
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_paint_constant_falloff() {
        let mut session = line_session();
        let red = session.add_class("red", ClassColor::new(255, 0, 0));
        session.select_class(Some(red)).unwrap();
        session.set_brush(BrushSettings::new(0.6, 1.0, FalloffKind::Constant));

        let report = session.apply_at(Vec3::ZERO, false);
        assert_eq!(report.affected, 3);
        assert_eq!(report.changed, 3);
        assert_eq!(session.count(LabelMode::Classes), 3);
        for v in [1, 2, 3] {
            assert_eq!(session.colors().get(v).unwrap(), [1.0, 0.0, 0.0]);
        }
        assert_eq!(session.colors().get(0).unwrap(), [0.7, 0.7, 0.7]);
    }

    #[test]
    fn test_linear_falloff_blends_partially() {
        let mut session = line_session();
        let red = session.add_class("red", ClassColor::new(255, 0, 0));
        session.select_class(Some(red)).unwrap();
        session.set_brush(BrushSettings::new(1.0, 1.0, FalloffKind::Linear));

        session.apply_at(Vec3::ZERO, false);
        // Edge vertices at distance 1.0 get zero strength and stay unlabeled
        assert_eq!(session.count(LabelMode::Classes), 3);
        let half = session.colors().get(1).unwrap();
        assert!((half[0] - 0.85).abs() < 1e-5);
        assert!((half[1] - 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_erase_restores_baseline() {
        let mut session = line_session();
        let red = session.add_class("red", ClassColor::new(255, 0, 0));
        session.select_class(Some(red)).unwrap();
        session.set_brush(BrushSettings::new(0.1, 1.0, FalloffKind::Constant));

        let center = session.mesh().unwrap().position(2);
        session.apply_at(center, false);
        assert_eq!(session.count(LabelMode::Classes), 1);

        let report = session.apply_at(center, true);
        assert_eq!(report.changed, 1);
        assert_eq!(session.count(LabelMode::Classes), 0);
        assert_eq!(session.colors().get(2), session.colors().original().get(2).copied());
    }

    #[test]
    fn test_problem_area_mode_paints_implicit_class() {
        let mut session = line_session();
        session.set_mode(LabelMode::ProblemArea);
        session.set_brush(BrushSettings::new(0.1, 1.0, FalloffKind::Constant));

        session.apply_at(Vec3::ZERO, false);
        assert_eq!(session.count(LabelMode::ProblemArea), 1);
        assert_eq!(
            session.assignments().map(LabelMode::ProblemArea).get(2),
            Some(LabelClassId::PROBLEM_AREA)
        );
        assert_eq!(session.colors().to_rgb8(2), Some([0xff, 0x3b, 0x30]));
    }

    #[test]
    fn test_hidden_class_assigns_without_tint() {
        let mut session = line_session();
        let red = session.add_class("red", ClassColor::new(255, 0, 0));
        session.set_class_visible(red, false).unwrap();
        session.select_class(Some(red)).unwrap();
        session.set_brush(BrushSettings::new(0.1, 1.0, FalloffKind::Constant));

        session.apply_at(Vec3::ZERO, false);
        assert_eq!(session.count(LabelMode::Classes), 1);
        assert_eq!(session.colors().get(2).unwrap(), [0.7, 0.7, 0.7]);
    }

    #[test]
    fn test_repaint_same_class_changes_nothing() {
        let mut session = line_session();
        let red = session.add_class("red", ClassColor::new(255, 0, 0));
        session.select_class(Some(red)).unwrap();
        session.set_brush(BrushSettings::new(0.1, 1.0, FalloffKind::Constant));

        session.apply_at(Vec3::ZERO, false);
        session.take_events();
        let report = session.apply_at(Vec3::ZERO, false);
        assert_eq!(report.affected, 1);
        assert_eq!(report.changed, 0);
        // No counts event when nothing changed
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::Applied {
                erase: false,
                affected: 1
            }]
        );
    }
}
