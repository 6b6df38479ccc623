//! Command types for IPC messages.

mod brush;
mod class;

pub use brush::*;
pub use class::*;

use serde::{Deserialize, Serialize};

use crate::input::MouseButton;

/// Pointer ray in normalized mesh space, computed by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayData {
    pub origin: [f32; 3],
    pub direction: [f32; 3],
}

/// Pointer input for the stroke controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerCommand {
    Press { button: MouseButton },
    Release { button: MouseButton },
    /// One scene update; `ray` is `None` while the pointer is off the viewport
    Tick { ray: Option<RayData> },
}

/// Active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Paint,
    Erase,
    Navigate,
}

/// Labeling mode, selecting which assignment map the brush edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelModeKind {
    #[default]
    Classes,
    ProblemArea,
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Csv,
    /// Colored point cloud
    Ply,
}
