//! End-to-end labeling scenarios through the public session API

use anamark_config::EngineConfig;
use glam::Vec3;
use labeling::{
    BrushSettings, ClassColor, FalloffKind, LabelClassId, LabelMode, LabelingSession, LoadError, Mesh,
    PointerButton, Ray, RawMesh, SessionEvent, Tool, normalize,
};

const BASELINE: [f32; 3] = [0.7, 0.7, 0.7];
const RED: ClassColor = ClassColor::new(255, 0, 0);
const BLUE: ClassColor = ClassColor::new(0, 0, 255);

const QUAD_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

/// 10 x 10 vertex grid in the XY plane; vertex `row * 10 + col`
fn grid_mesh() -> Mesh {
    let mut positions = Vec::with_capacity(300);
    for row in 0..10 {
        for col in 0..10 {
            positions.extend_from_slice(&[col as f32, row as f32, 0.0]);
        }
    }
    let mut indices = Vec::new();
    for row in 0..9u32 {
        for col in 0..9u32 {
            let i = row * 10 + col;
            indices.extend_from_slice(&[i, i + 1, i + 11, i, i + 11, i + 10]);
        }
    }
    normalize(RawMesh { positions, indices }, 2.0).unwrap()
}

fn grid_session() -> LabelingSession {
    let mut session = LabelingSession::new(EngineConfig::default()).unwrap();
    session.install_mesh(grid_mesh());
    session
}

/// A sphere that contains exactly the vertices of one grid row: centered
/// well outside the grid on the row's side, radius halfway between the
/// farthest row vertex and the nearest vertex of any other row.
fn row_brush(mesh: &Mesh, row: usize) -> (Vec3, f32) {
    let row_vertices: Vec<usize> = (row * 10..row * 10 + 10).collect();
    let row_center = row_vertices.iter().map(|&v| mesh.position(v)).sum::<Vec3>() / 10.0;
    let outward = if row == 0 { Vec3::NEG_Y } else { Vec3::Y };
    let center = row_center + outward * 5.0;

    let farthest_in = row_vertices
        .iter()
        .map(|&v| mesh.position(v).distance(center))
        .fold(0.0f32, f32::max);
    let nearest_out = (0..mesh.vertex_count())
        .filter(|v| !row_vertices.contains(v))
        .map(|v| mesh.position(v).distance(center))
        .fold(f32::MAX, f32::min);
    assert!(farthest_in < nearest_out);
    (center, (farthest_in + nearest_out) * 0.5)
}

fn paint_row(session: &mut LabelingSession, row: usize, erase: bool) {
    let (center, radius) = row_brush(session.mesh().unwrap(), row);
    session.set_brush(BrushSettings::new(radius, 1.0, FalloffKind::Constant));
    session.apply_at(center, erase);
}

#[test]
fn test_paint_covers_first_ten_vertices() {
    let mut session = grid_session();
    let a = session.add_class("A", RED);
    session.select_class(Some(a)).unwrap();

    paint_row(&mut session, 0, false);

    let map = session.assignments().map(LabelMode::Classes);
    assert_eq!(map.len(), 10);
    assert!(map.iter().all(|(v, class)| v < 10 && class == a));
    for v in 0..10 {
        assert_eq!(session.colors().get(v).unwrap(), [1.0, 0.0, 0.0]);
    }
    for v in 10..100 {
        assert_eq!(session.colors().get(v).unwrap(), BASELINE);
    }
}

#[test]
fn test_switching_class_keeps_earlier_labels() {
    let mut session = grid_session();
    let a = session.add_class("A", RED);
    let b = session.add_class("B", BLUE);

    session.select_class(Some(a)).unwrap();
    paint_row(&mut session, 0, false);
    session.select_class(Some(b)).unwrap();
    paint_row(&mut session, 9, false);

    let map = session.assignments().map(LabelMode::Classes);
    assert_eq!(map.len(), 20);
    for v in 0..10 {
        assert_eq!(map.get(v), Some(a));
    }
    for v in 90..100 {
        assert_eq!(map.get(v), Some(b));
    }
}

#[test]
fn test_removed_class_falls_back_to_lower_layer() {
    let mut session = grid_session();
    let a = session.add_class("A", RED);
    session.select_class(Some(a)).unwrap();
    paint_row(&mut session, 0, false);

    // Vertex 0 is also a problem area
    session.set_mode(LabelMode::ProblemArea);
    session.set_brush(BrushSettings::new(0.01, 1.0, FalloffKind::Constant));
    let corner = session.mesh().unwrap().position(0);
    session.apply_at(corner, false);
    session.set_mode(LabelMode::Classes);

    session.remove_class(a).unwrap();

    let problem = session.problem_area().class().color.to_unit();
    assert_eq!(session.colors().get(0).unwrap(), problem);
    for v in 1..10 {
        assert_eq!(session.colors().get(v).unwrap(), BASELINE);
    }
    // Orphaned entries stay in the map
    assert_eq!(session.count(LabelMode::Classes), 10);
}

#[test]
fn test_hiding_class_recomputes_colors() {
    let mut session = grid_session();
    let a = session.add_class("A", RED);
    session.select_class(Some(a)).unwrap();
    paint_row(&mut session, 0, false);

    session.set_class_visible(a, false).unwrap();
    assert_eq!(session.colors().get(3).unwrap(), BASELINE);
    session.set_class_visible(a, true).unwrap();
    assert_eq!(session.colors().get(3).unwrap(), [1.0, 0.0, 0.0]);
}

#[test]
fn test_paint_then_erase_round_trip() {
    let mut session = grid_session();
    let a = session.add_class("A", RED);
    session.select_class(Some(a)).unwrap();

    let vertex = session.mesh().unwrap().position(55);
    session.set_brush(BrushSettings::new(0.01, 1.0, FalloffKind::Constant));
    session.apply_at(vertex, false);
    assert!(session.assignments().map(LabelMode::Classes).contains(55));

    session.apply_at(vertex, true);
    assert!(!session.assignments().map(LabelMode::Classes).contains(55));
    assert_eq!(session.colors().get(55).unwrap(), session.colors().original()[55]);
}

#[test]
fn test_modes_are_independent() {
    let mut session = grid_session();
    let a = session.add_class("A", RED);
    session.select_class(Some(a)).unwrap();
    paint_row(&mut session, 0, false);

    session.set_mode(LabelMode::ProblemArea);
    paint_row(&mut session, 9, false);
    assert_eq!(session.count(LabelMode::ProblemArea), 10);

    // Erase in problem-area mode leaves class labels alone
    paint_row(&mut session, 0, true);
    assert_eq!(session.count(LabelMode::Classes), 10);

    session.clear();
    assert_eq!(session.count(LabelMode::ProblemArea), 0);
    assert_eq!(session.count(LabelMode::Classes), 10);
    assert_eq!(session.colors().get(95).unwrap(), BASELINE);
    assert_eq!(session.colors().get(5).unwrap(), [1.0, 0.0, 0.0]);
    assert_eq!(
        session.assignments().map(LabelMode::Classes).get(5),
        Some(a)
    );
    assert_ne!(a, LabelClassId::PROBLEM_AREA);
}

#[test]
fn test_load_obj_then_unsupported_keeps_state() {
    let mut session = LabelingSession::new(EngineConfig::default()).unwrap();
    session.load(QUAD_OBJ.as_bytes(), "quad.obj").unwrap();
    assert_eq!(session.mesh().unwrap().vertex_count(), 4);

    let a = session.add_class("A", RED);
    session.select_class(Some(a)).unwrap();
    session.set_brush(BrushSettings::new(0.1, 1.0, FalloffKind::Constant));
    let corner = session.mesh().unwrap().position(0);
    session.apply_at(corner, false);
    let colors_before = session.colors().current().to_vec();
    session.take_events();

    let result = session.load(b"whatever", "model.fbx");
    assert!(matches!(result, Err(LoadError::UnsupportedFormat { .. })));

    assert_eq!(session.mesh().unwrap().vertex_count(), 4);
    assert_eq!(session.count(LabelMode::Classes), 1);
    assert_eq!(session.colors().current(), colors_before.as_slice());
    assert!(session.take_events().is_empty());
}

#[test]
fn test_reload_replaces_everything() {
    let mut session = LabelingSession::new(EngineConfig::default()).unwrap();
    session.load(QUAD_OBJ.as_bytes(), "quad.obj").unwrap();
    session.set_mode(LabelMode::ProblemArea);
    let corner = session.mesh().unwrap().position(0);
    session.apply_at(corner, false);
    assert_eq!(session.count(LabelMode::ProblemArea), 1);

    session.install_mesh(grid_mesh());
    assert_eq!(session.colors().vertex_count(), 100);
    assert_eq!(session.count(LabelMode::ProblemArea), 0);
    assert!(session.colors().current().iter().all(|c| *c == BASELINE));
}

#[test]
fn test_pointer_stroke_over_grid() {
    let mut session = grid_session();
    let a = session.add_class("A", RED);
    session.select_class(Some(a)).unwrap();
    session.set_tool(Tool::Paint);
    session.set_brush(BrushSettings::new(0.05, 1.0, FalloffKind::Constant));
    session.take_events();

    // Drag along the bottom row, sampling every vertex spacing
    session.pointer_press(PointerButton::Primary);
    for col in 0..10 {
        // Nudge inside the cell so the ray never grazes a triangle edge
        let dx = if col < 9 { 0.02 } else { -0.02 };
        let target = session.mesh().unwrap().position(col) + Vec3::new(dx, 0.01, 0.0);
        let ray = Ray::new(target + Vec3::Z * 3.0, Vec3::NEG_Z);
        session.tick(Some(&ray));
    }
    session.pointer_release(PointerButton::Primary);

    assert_eq!(session.count(LabelMode::Classes), 10);
    let applied = session
        .take_events()
        .into_iter()
        .filter(|event| matches!(event, SessionEvent::Applied { erase: false, .. }))
        .count();
    assert_eq!(applied, 10);
}
