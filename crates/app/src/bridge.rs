//! Session bridge: applies UI messages to a labeling session and turns
//! session events back into UI messages.

use std::path::{Path, PathBuf};

use anamark_ipc::{
    BrushCommand, ClassCommand, ClassInfo, CountsInfo, ExportFormat, FalloffCurve, LabelModeKind,
    MouseButton, PointerCommand, RayData, SessionToUi, ToolKind, UiToSession,
};
use glam::Vec3;
use labeling::export::export_to_path;
use labeling::{
    BrushSettings, ClassColor, ClassError, ExportKind, FalloffKind, LabelClassId, LabelMode, LabelingSession,
    PointerButton, Ray, SessionEvent, Tool,
};
use tracing::{debug, info, warn};

pub struct SessionBridge {
    session: LabelingSession,
    /// Relative paths in messages resolve against this directory
    base_dir: PathBuf,
    outbox: Vec<SessionToUi>,
}

impl SessionBridge {
    pub fn new(session: LabelingSession, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            session,
            base_dir: base_dir.into(),
            outbox: Vec::new(),
        }
    }

    pub fn session(&self) -> &LabelingSession {
        &self.session
    }

    /// Open a mesh file; failures are reported as `LoadFailed`
    pub fn load_mesh(&mut self, path: &Path) {
        let path = self.resolve(path);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let result = std::fs::read(&path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| self.session.load(&bytes, &filename).map_err(|e| e.to_string()));

        if let Err(message) = result {
            warn!("Failed to load {:?}: {}", path, message);
            self.outbox.push(SessionToUi::LoadFailed { message });
        }
        self.drain_events();
    }

    /// Apply one UI message
    pub fn handle(&mut self, message: UiToSession) {
        debug!("Handling {:?}", message);
        match message {
            UiToSession::LoadMesh { path } => self.load_mesh(Path::new(&path)),
            UiToSession::Reset => self.session.reset(),
            UiToSession::Pointer(command) => self.handle_pointer(command),
            UiToSession::Brush(command) => self.handle_brush(command),
            UiToSession::Class(command) => {
                if let Err(e) = self.handle_class(command) {
                    self.report_error(e.to_string());
                }
            }
            UiToSession::SetTool { tool } => self.session.set_tool(to_tool(tool)),
            UiToSession::SetMode { mode } => self.session.set_mode(to_mode(mode)),
            UiToSession::SelectClass { id } => {
                if let Err(e) = self.session.select_class(id.map(LabelClassId)) {
                    self.report_error(e.to_string());
                }
            }
            UiToSession::Clear => self.session.clear(),
            UiToSession::Export { format, path, mode } => {
                let mode = mode.map(to_mode).unwrap_or(self.session.mode());
                self.export(format, Path::new(&path), mode);
            }
        }
        self.drain_events();
    }

    /// Messages produced since the last call
    pub fn take_outbox(&mut self) -> Vec<SessionToUi> {
        std::mem::take(&mut self.outbox)
    }

    fn handle_pointer(&mut self, command: PointerCommand) {
        match command {
            PointerCommand::Press { button } => self.session.pointer_press(to_button(button)),
            PointerCommand::Release { button } => self.session.pointer_release(to_button(button)),
            PointerCommand::Tick { ray } => {
                let ray = ray.map(to_ray);
                self.session.tick(ray.as_ref());
            }
        }
    }

    fn handle_brush(&mut self, command: BrushCommand) {
        let brush = *self.session.brush();
        let brush = match command {
            BrushCommand::SetSize { size } => BrushSettings::new(size, brush.strength, brush.falloff),
            BrushCommand::SetStrength { strength } => BrushSettings::new(brush.size, strength, brush.falloff),
            BrushCommand::SetFalloff { falloff } => {
                BrushSettings::new(brush.size, brush.strength, to_falloff(falloff))
            }
        };
        debug!("Brush now {:?}", brush);
        self.session.set_brush(brush);
    }

    fn handle_class(&mut self, command: ClassCommand) -> Result<(), ClassError> {
        match command {
            ClassCommand::Add { name, color } => {
                let color: ClassColor = color.parse()?;
                let id = self.session.add_class(name, color);
                // The first class becomes the brush target
                if self.session.active_class().is_none() {
                    self.session.select_class(Some(id))?;
                }
            }
            ClassCommand::Rename { id, name } => self.session.rename_class(LabelClassId(id), name)?,
            ClassCommand::Recolor { id, color } => {
                let color: ClassColor = color.parse()?;
                self.session.recolor_class(LabelClassId(id), color)?;
            }
            ClassCommand::SetVisible { id, visible } => {
                self.session.set_class_visible(LabelClassId(id), visible)?
            }
            ClassCommand::Remove { id } => self.session.remove_class(LabelClassId(id))?,
            ClassCommand::SetProblemAreaVisible { visible } => {
                self.session.set_problem_area_visible(visible)
            }
            ClassCommand::SetProblemAreaColor { color } => {
                let color: ClassColor = color.parse()?;
                self.session.set_problem_area_color(color);
            }
        }
        Ok(())
    }

    fn export(&mut self, format: ExportFormat, path: &Path, mode: LabelMode) {
        let path = self.resolve(path);
        match export_to_path(&self.session, to_export_kind(format), mode, &path) {
            Ok(()) => {
                info!("Wrote {}", path.display());
                self.outbox.push(SessionToUi::Exported {
                    path: path.display().to_string(),
                });
            }
            Err(e) => self.report_error(format!("Export to {} failed: {}", path.display(), e)),
        }
    }

    fn report_error(&mut self, message: String) {
        warn!("{}", message);
        self.outbox.push(SessionToUi::Error { message });
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn drain_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                SessionEvent::Loaded {
                    vertex_count,
                    face_count,
                } => self.outbox.push(SessionToUi::MeshLoaded {
                    vertex_count,
                    face_count,
                }),
                SessionEvent::CountsChanged(counts) => {
                    let info = CountsInfo {
                        classes: counts.classes,
                        problem_areas: counts.problem_areas,
                    };
                    // Painting emits one per changed sample; only forward changes
                    let duplicate = matches!(
                        self.outbox.last(),
                        Some(SessionToUi::CountsChanged(last)) if *last == info
                    );
                    if !duplicate {
                        self.outbox.push(SessionToUi::CountsChanged(info));
                    }
                }
                SessionEvent::Reset => self.outbox.push(SessionToUi::MeshClosed),
                SessionEvent::ModeChanged(mode) => self.outbox.push(SessionToUi::ModeChanged {
                    mode: from_mode(mode),
                }),
                SessionEvent::Cleared { mode } => self.outbox.push(SessionToUi::Cleared {
                    mode: from_mode(mode),
                }),
                SessionEvent::ClassesChanged => {
                    let classes = self.class_list();
                    self.outbox.push(SessionToUi::ClassesChanged { classes });
                }
                other => debug!("Session event {:?}", other),
            }
        }
    }

    fn class_list(&self) -> Vec<ClassInfo> {
        self.session
            .classes()
            .iter()
            .map(|class| ClassInfo {
                id: class.id.0,
                name: class.name.clone(),
                color: class.color.to_string(),
                visible: class.visible,
            })
            .collect()
    }
}

fn to_tool(kind: ToolKind) -> Tool {
    match kind {
        ToolKind::Paint => Tool::Paint,
        ToolKind::Erase => Tool::Erase,
        ToolKind::Navigate => Tool::Navigate,
    }
}

fn to_mode(kind: LabelModeKind) -> LabelMode {
    match kind {
        LabelModeKind::Classes => LabelMode::Classes,
        LabelModeKind::ProblemArea => LabelMode::ProblemArea,
    }
}

fn from_mode(mode: LabelMode) -> LabelModeKind {
    match mode {
        LabelMode::Classes => LabelModeKind::Classes,
        LabelMode::ProblemArea => LabelModeKind::ProblemArea,
    }
}

fn to_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
    }
}

fn to_falloff(curve: FalloffCurve) -> FalloffKind {
    match curve {
        FalloffCurve::Constant => FalloffKind::Constant,
        FalloffCurve::Linear => FalloffKind::Linear,
        FalloffCurve::Smooth => FalloffKind::Smooth,
    }
}

fn to_export_kind(format: ExportFormat) -> ExportKind {
    match format {
        ExportFormat::Json => ExportKind::Json,
        ExportFormat::Csv => ExportKind::Csv,
        ExportFormat::Ply => ExportKind::Ply,
    }
}

fn to_ray(ray: RayData) -> Ray {
    Ray::new(Vec3::from_array(ray.origin), Vec3::from_array(ray.direction))
}
