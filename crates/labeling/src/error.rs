//! Error types for mesh loading, class management, and export.

use thiserror::Error;

use crate::classes::LabelClassId;

/// Errors raised while loading a mesh. A failed load leaves the previous
/// session state untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unsupported mesh format: {}", extension.as_deref().unwrap_or("<none>"))]
    UnsupportedFormat { extension: Option<String> },

    #[error("Invalid geometry: {details}")]
    InvalidGeometry { details: String },

    #[error("Degenerate geometry: largest bounding-box dimension is {max_dimension}")]
    DegenerateGeometry { max_dimension: f32 },
}

impl LoadError {
    pub(crate) fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            details: details.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassError {
    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("Unknown label class {0}")]
    UnknownClass(LabelClassId),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Nothing to export: no mesh loaded")]
    NoMesh,
}
