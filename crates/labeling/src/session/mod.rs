//! Labeling session
//!
//! Owns everything one open mesh needs:
//! - the normalized [`Mesh`]
//! - the [`VertexColorBuffer`] shown by the renderer
//! - both mode maps in the [`AssignmentStore`]
//! - the class set and the implicit problem-area class
//! - brush, tool, mode and active class selection
//! - the [`StrokeController`]
//!
//! All state changes happen synchronously on the caller's thread, in call
//! order. Views observe them by draining [`SessionEvent`]s.

mod operator;
mod stroke;

use anamark_config::{AnamarkConfig, EngineConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assignment::{AssignmentStore, LabelMode};
use crate::brush::BrushSettings;
use crate::classes::{ClassColor, ClassResolver, LabelClassId, LabelClassSet, ProblemAreaClass};
use crate::color::VertexColorBuffer;
use crate::error::{ClassError, LoadError};
use crate::geometry::{Mesh, load_mesh};
use crate::stroke::{StrokeController, Tool};

pub use operator::ApplyReport;

/// Labeled vertex counts of both modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub classes: usize,
    pub problem_areas: usize,
}

/// Notifications for views that mirror session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    Loaded { vertex_count: usize, face_count: usize },
    Reset,
    /// One paint or erase sample was applied
    Applied { erase: bool, affected: usize },
    CountsChanged(LabelCounts),
    ClassesChanged,
    ModeChanged(LabelMode),
    Cleared { mode: LabelMode },
}

/// One open mesh and its labeling state
pub struct LabelingSession {
    pub(crate) config: EngineConfig,
    pub(crate) mesh: Option<Mesh>,
    pub(crate) colors: VertexColorBuffer,
    pub(crate) store: AssignmentStore,
    pub(crate) classes: LabelClassSet,
    pub(crate) problem_area: ProblemAreaClass,
    pub(crate) brush: BrushSettings,
    pub(crate) tool: Tool,
    pub(crate) active_class: Option<LabelClassId>,
    pub(crate) stroke: StrokeController,
    pub(crate) events: Vec<SessionEvent>,
}

impl LabelingSession {
    /// Create an empty session with no mesh loaded
    pub fn new(config: EngineConfig) -> Result<Self, ClassError> {
        let problem_color: ClassColor = config.problem_area_color.parse()?;
        Ok(Self {
            mesh: None,
            colors: VertexColorBuffer::new(0, config.baseline_gray),
            store: AssignmentStore::new(),
            classes: LabelClassSet::new(),
            problem_area: ProblemAreaClass::new(config.problem_area_name.clone(), problem_color),
            brush: BrushSettings::default(),
            tool: Tool::default(),
            active_class: None,
            stroke: StrokeController::from_config(&config),
            events: Vec::new(),
            config,
        })
    }

    /// Create a session with brush defaults and preset classes applied.
    /// The first preset becomes the active class.
    pub fn from_config(config: &AnamarkConfig) -> Result<Self, ClassError> {
        let mut session = Self::new(config.engine.clone())?;
        session.brush = BrushSettings::from_defaults(&config.brush);
        for preset in &config.presets {
            let color: ClassColor = preset.color.parse()?;
            let id = session.classes.add(preset.name.clone(), color);
            session.active_class.get_or_insert(id);
        }
        Ok(session)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn colors(&self) -> &VertexColorBuffer {
        &self.colors
    }

    pub fn assignments(&self) -> &AssignmentStore {
        &self.store
    }

    pub fn classes(&self) -> &LabelClassSet {
        &self.classes
    }

    pub fn problem_area(&self) -> &ProblemAreaClass {
        &self.problem_area
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn mode(&self) -> LabelMode {
        self.store.mode()
    }

    pub fn active_class(&self) -> Option<LabelClassId> {
        self.active_class
    }

    pub fn stroke(&self) -> &StrokeController {
        &self.stroke
    }

    /// Class resolver for a mode's assignment map
    pub fn resolver(&self, mode: LabelMode) -> &dyn ClassResolver {
        match mode {
            LabelMode::Classes => &self.classes,
            LabelMode::ProblemArea => &self.problem_area,
        }
    }

    // ===== Mesh lifecycle =====

    /// Parse, normalize and install a mesh from raw file bytes.
    ///
    /// On error nothing changes: the previous mesh, colors and assignments
    /// stay as they were.
    pub fn load(&mut self, bytes: &[u8], filename: &str) -> Result<(), LoadError> {
        let mesh = load_mesh(bytes, filename, self.config.target_extent)?;
        self.install_mesh(mesh);
        Ok(())
    }

    /// Install an already normalized mesh, replacing all per-mesh state
    pub fn install_mesh(&mut self, mesh: Mesh) {
        let vertex_count = mesh.vertex_count();
        let face_count = mesh.face_count();

        self.colors = VertexColorBuffer::new(vertex_count, self.config.baseline_gray);
        self.store.clear_all();
        self.stroke.reset();
        self.mesh = Some(mesh);

        info!("Session mesh installed: {} vertices, {} faces", vertex_count, face_count);
        self.events.push(SessionEvent::Loaded {
            vertex_count,
            face_count,
        });
        self.push_counts();
    }

    /// Drop the mesh and all per-mesh state. Classes and brush survive.
    pub fn reset(&mut self) {
        self.mesh = None;
        self.colors = VertexColorBuffer::new(0, self.config.baseline_gray);
        self.store.clear_all();
        self.stroke.reset();

        info!("Session reset");
        self.events.push(SessionEvent::Reset);
        self.push_counts();
    }

    // ===== Tool state =====

    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.brush = brush;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Switch the active assignment map. Any stroke in progress ends.
    pub fn set_mode(&mut self, mode: LabelMode) {
        if self.store.mode() == mode {
            return;
        }
        self.stroke.reset();
        self.store.set_mode(mode);
        self.events.push(SessionEvent::ModeChanged(mode));
    }

    /// Select the class that paint samples assign, or none
    pub fn select_class(&mut self, id: Option<LabelClassId>) -> Result<(), ClassError> {
        if let Some(id) = id {
            if !self.classes.contains(id) {
                return Err(ClassError::UnknownClass(id));
            }
        }
        self.active_class = id;
        Ok(())
    }

    // ===== Class list =====

    pub fn add_class(&mut self, name: impl Into<String>, color: ClassColor) -> LabelClassId {
        let id = self.classes.add(name, color);
        self.classes_changed();
        id
    }

    pub fn rename_class(&mut self, id: LabelClassId, name: impl Into<String>) -> Result<(), ClassError> {
        self.classes.rename(id, name)?;
        self.classes_changed();
        Ok(())
    }

    pub fn recolor_class(&mut self, id: LabelClassId, color: ClassColor) -> Result<(), ClassError> {
        self.classes.recolor(id, color)?;
        self.classes_changed();
        Ok(())
    }

    pub fn set_class_visible(&mut self, id: LabelClassId, visible: bool) -> Result<(), ClassError> {
        self.classes.set_visible(id, visible)?;
        self.classes_changed();
        Ok(())
    }

    /// Remove a class. Vertices assigned to it keep their entries but fall
    /// back to the next layer's color (or the baseline) on recompute.
    pub fn remove_class(&mut self, id: LabelClassId) -> Result<(), ClassError> {
        let removed = self.classes.remove(id)?;
        if self.active_class == Some(id) {
            self.active_class = None;
        }
        info!("Removed label class {} {:?}", removed.id, removed.name);
        self.classes_changed();
        Ok(())
    }

    pub fn set_problem_area_visible(&mut self, visible: bool) {
        self.problem_area.set_visible(visible);
        self.classes_changed();
    }

    pub fn set_problem_area_color(&mut self, color: ClassColor) {
        self.problem_area.set_color(color);
        self.classes_changed();
    }

    // ===== Assignments =====

    /// Empty the active mode's map and recompute colors
    pub fn clear(&mut self) {
        let mode = self.store.mode();
        self.store.clear();
        self.stroke.reset();
        self.recompute_colors();

        info!("Cleared {:?} labels", mode);
        self.events.push(SessionEvent::Cleared { mode });
        self.push_counts();
    }

    /// Labeled vertex count of one mode
    pub fn count(&self, mode: LabelMode) -> usize {
        self.store.map(mode).len()
    }

    pub fn counts(&self) -> LabelCounts {
        LabelCounts {
            classes: self.count(LabelMode::Classes),
            problem_areas: self.count(LabelMode::ProblemArea),
        }
    }

    /// Drain pending events in the order they happened
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuild the whole color buffer from both mode maps.
    ///
    /// Problem areas are layered over class labels.
    pub fn recompute_colors(&mut self) {
        let layers = LabelMode::LAYER_ORDER.map(|mode| {
            let resolver: &dyn ClassResolver = match mode {
                LabelMode::Classes => &self.classes,
                LabelMode::ProblemArea => &self.problem_area,
            };
            (self.store.map(mode), resolver)
        });
        self.colors.recompute(&layers);
    }

    fn classes_changed(&mut self) {
        self.recompute_colors();
        self.events.push(SessionEvent::ClassesChanged);
    }

    pub(crate) fn push_counts(&mut self) {
        let counts = self.counts();
        self.events.push(SessionEvent::CountsChanged(counts));
    }
}
