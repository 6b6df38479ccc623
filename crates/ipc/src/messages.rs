//! Main IPC message enums for communication between the UI and the session.

use serde::{Deserialize, Serialize};

use crate::commands::{
    BrushCommand, ClassCommand, ExportFormat, LabelModeKind, PointerCommand, ToolKind,
};
use crate::types::{ClassInfo, CountsInfo};

/// Messages from the session to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionToUi {
    /// A mesh finished loading
    MeshLoaded {
        vertex_count: usize,
        face_count: usize,
    },

    /// Loading failed; the previous mesh is still open
    LoadFailed { message: String },

    /// The mesh was dropped and the viewport is empty
    MeshClosed,

    /// Paint now edits this mode's labels
    ModeChanged { mode: LabelModeKind },

    /// One mode's labels were removed
    Cleared { mode: LabelModeKind },

    /// Labeled vertex counts changed
    CountsChanged(CountsInfo),

    /// Class list changed
    ClassesChanged { classes: Vec<ClassInfo> },

    /// Export written
    Exported { path: String },

    /// Error notification
    Error { message: String },
}

/// Messages from the UI to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToSession {
    /// Open a mesh file
    LoadMesh { path: String },

    /// Close the mesh
    Reset,

    /// Pointer input
    Pointer(PointerCommand),

    /// Brush settings
    Brush(BrushCommand),

    /// Class list edits
    Class(ClassCommand),

    SetTool { tool: ToolKind },

    SetMode { mode: LabelModeKind },

    /// Select the class paint assigns; `None` deselects
    SelectClass { id: Option<u32> },

    /// Clear the active mode's labels
    Clear,

    /// Write labels to a file
    Export {
        format: ExportFormat,
        path: String,
        /// Defaults to the active mode
        #[serde(default)]
        mode: Option<LabelModeKind>,
    },
}
