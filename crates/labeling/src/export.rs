//! Label export
//!
//! Three formats:
//! - JSON label list (`{ mode, vertex_count, labels }`)
//! - CSV with one row per labeled vertex
//! - ASCII PLY point cloud colored from the current color buffer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assignment::LabelMode;
use crate::classes::{ClassColor, LabelClassId};
use crate::error::ExportError;
use crate::session::LabelingSession;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Json,
    Csv,
    /// Colored point cloud (`.ply`)
    Ply,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Json => "json",
            ExportKind::Csv => "csv",
            ExportKind::Ply => "ply",
        }
    }
}

/// One labeled vertex with its resolved class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub vertex_index: u32,
    pub class_id: LabelClassId,
    pub class_name: String,
    pub color: ClassColor,
    /// Normalized mesh-space position
    pub position: [f32; 3],
}

#[derive(Debug, Serialize)]
struct LabelExport<'a> {
    mode: LabelMode,
    vertex_count: usize,
    labels: &'a [LabelRecord],
}

/// Records for every assigned vertex of `mode` whose class still exists,
/// in ascending vertex order
pub fn label_records(session: &LabelingSession, mode: LabelMode) -> Result<Vec<LabelRecord>, ExportError> {
    let mesh = session.mesh().ok_or(ExportError::NoMesh)?;
    let resolver = session.resolver(mode);

    let mut orphaned = 0usize;
    let records: Vec<LabelRecord> = session
        .assignments()
        .map(mode)
        .iter()
        .filter_map(|(vertex, class_id)| {
            let class = resolver.resolve(class_id);
            let position = mesh.positions().get(vertex as usize);
            match (class, position) {
                (Some(class), Some(position)) => Some(LabelRecord {
                    vertex_index: vertex,
                    class_id,
                    class_name: class.name.clone(),
                    color: class.color,
                    position: *position,
                }),
                _ => {
                    orphaned += 1;
                    None
                }
            }
        })
        .collect();

    if orphaned > 0 {
        warn!("Export skipped {} labels of removed classes", orphaned);
    }
    Ok(records)
}

pub fn write_json<W: Write>(session: &LabelingSession, mode: LabelMode, mut writer: W) -> Result<(), ExportError> {
    let labels = label_records(session, mode)?;
    let vertex_count = session.mesh().map_or(0, |mesh| mesh.vertex_count());
    let export = LabelExport {
        mode,
        vertex_count,
        labels: &labels,
    };
    serde_json::to_writer_pretty(&mut writer, &export)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_csv<W: Write>(session: &LabelingSession, mode: LabelMode, mut writer: W) -> Result<(), ExportError> {
    let labels = label_records(session, mode)?;
    writeln!(writer, "vertex_index,class_id,class_name,color,x,y,z")?;
    for record in &labels {
        let [x, y, z] = record.position;
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            record.vertex_index,
            record.class_id,
            csv_field(&record.class_name),
            record.color,
            x,
            y,
            z
        )?;
    }
    Ok(())
}

/// Every vertex with its current display color
pub fn write_point_cloud<W: Write>(session: &LabelingSession, mut writer: W) -> Result<(), ExportError> {
    let mesh = session.mesh().ok_or(ExportError::NoMesh)?;
    let colors = session.colors();

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", mesh.vertex_count())?;
    for property in ["float x", "float y", "float z", "uchar red", "uchar green", "uchar blue"] {
        writeln!(writer, "property {}", property)?;
    }
    writeln!(writer, "end_header")?;

    for (vertex, [x, y, z]) in mesh.positions().iter().enumerate() {
        let [r, g, b] = colors.to_rgb8(vertex).unwrap_or([0, 0, 0]);
        writeln!(writer, "{} {} {} {} {} {}", x, y, z, r, g, b)?;
    }
    Ok(())
}

/// Write one export to a file
pub fn export_to_path(
    session: &LabelingSession,
    kind: ExportKind,
    mode: LabelMode,
    path: &Path,
) -> Result<(), ExportError> {
    if !session.is_loaded() {
        return Err(ExportError::NoMesh);
    }
    let mut writer = BufWriter::new(File::create(path)?);
    match kind {
        ExportKind::Json => write_json(session, mode, &mut writer)?,
        ExportKind::Csv => write_csv(session, mode, &mut writer)?,
        ExportKind::Ply => write_point_cloud(session, &mut writer)?,
    }
    writer.flush()?;
    info!("Exported {:?} ({:?}) to {}", kind, mode, path.display());
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
