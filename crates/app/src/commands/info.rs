//! anamark info command - load a mesh and display its statistics.

use std::path::Path;

use anamark_config::AnamarkConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use labeling::load_mesh;
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct MeshInfo {
    path: String,
    vertices: usize,
    faces: usize,
    /// Factor source coordinates were scaled by
    scale: f32,
    /// Source-space point now at the origin
    source_center: [f32; 3],
    /// Normalized bounding-box size
    dimensions: [f32; 3],
}

pub fn run(input: &Path, config: &AnamarkConfig, cli: &Cli) -> Result<()> {
    let bytes = std::fs::read(input).with_context(|| format!("Failed to read {:?}", input))?;
    let filename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mesh = load_mesh(&bytes, &filename, config.engine.target_extent)
        .with_context(|| format!("Failed to load mesh from {:?}", input))?;

    let info = MeshInfo {
        path: input.display().to_string(),
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        scale: mesh.scale(),
        source_center: mesh.source_center().to_array(),
        dimensions: mesh.bounds().size().to_array(),
    };

    match cli.format {
        OutputFormat::Json => output::print_json(&info, cli.quiet),
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Mesh Information".bold().underline());
                println!("  {}: {}", "File".cyan(), info.path);
                println!("  {}: {}", "Vertices".cyan(), info.vertices);
                println!("  {}: {}", "Faces".cyan(), info.faces);
                println!("  {}: {:.6}", "Scale".cyan(), info.scale);
                println!(
                    "  {}: ({:.3}, {:.3}, {:.3})",
                    "Source center".cyan(),
                    info.source_center[0],
                    info.source_center[1],
                    info.source_center[2]
                );
                println!(
                    "  {}: {:.3} x {:.3} x {:.3}",
                    "Normalized size".cyan(),
                    info.dimensions[0],
                    info.dimensions[1],
                    info.dimensions[2]
                );
            }
        }
    }

    Ok(())
}
