//! Mesh parsing for STL and OBJ data.
//!
//! Parsers only turn bytes into a [`RawMesh`]; normalization and the
//! remaining validation live in [`crate::geometry`].

use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::geometry::validate_positions;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Detect format from a file name's extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "stl" => Some(MeshFormat::Stl),
                "obj" => Some(MeshFormat::Obj),
                _ => None,
            })
    }
}

/// Parsed but not yet normalized triangle mesh
#[derive(Debug, Clone, Default)]
pub struct RawMesh {
    /// Flat xyz positions, 3 floats per vertex
    pub positions: Vec<f32>,
    /// Triangle corner indices, 3 per face
    pub indices: Vec<u32>,
}

impl RawMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Parse mesh bytes, choosing the parser from the file name.
pub fn parse_mesh(bytes: &[u8], filename: &str) -> Result<RawMesh, LoadError> {
    let format = MeshFormat::from_filename(filename).ok_or_else(|| LoadError::UnsupportedFormat {
        extension: Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(String::from),
    })?;

    debug!("Parsing {:?} ({} bytes) as {:?}", filename, bytes.len(), format);

    match format {
        MeshFormat::Stl => parse_stl(bytes),
        MeshFormat::Obj => parse_obj(bytes),
    }
}

/// STL, binary or ASCII. Shared corners are welded into single vertices.
fn parse_stl(bytes: &[u8]) -> Result<RawMesh, LoadError> {
    let mut reader = Cursor::new(bytes);
    let stl = stl_io::read_stl(&mut reader).map_err(|e| LoadError::invalid(format!("STL: {e}")))?;

    debug!(
        "STL contains {} vertices, {} triangles",
        stl.vertices.len(),
        stl.faces.len()
    );

    let positions: Vec<f32> = stl.vertices.iter().flat_map(|v| v.0).collect();
    validate_positions(&positions)?;

    let indices = stl
        .faces
        .iter()
        .flat_map(|face| face.vertices.map(|i| i as u32))
        .collect();

    Ok(RawMesh { positions, indices })
}

/// OBJ. Every object/group is a sub-mesh; the first one with valid
/// positions wins. Material libraries are never opened.
fn parse_obj(bytes: &[u8]) -> Result<RawMesh, LoadError> {
    let mut reader = Cursor::new(bytes);
    let (models, _materials) = tobj::load_obj_buf(
        &mut reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Err(tobj::LoadError::OpenFileFailed),
    )
    .map_err(|e| LoadError::invalid(format!("OBJ: {e}")))?;

    debug!("OBJ contains {} models", models.len());

    for model in models {
        match validate_positions(&model.mesh.positions) {
            Ok(()) => {
                debug!(
                    "OBJ model '{}': {} vertices, {} triangles",
                    model.name,
                    model.mesh.positions.len() / 3,
                    model.mesh.indices.len() / 3
                );
                return Ok(RawMesh {
                    positions: model.mesh.positions,
                    indices: model.mesh.indices,
                });
            }
            Err(e) => warn!("Skipping OBJ model '{}': {}", model.name, e),
        }
    }

    Err(LoadError::invalid("OBJ data contains no mesh with valid position data"))
}
