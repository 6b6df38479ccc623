//! Anamark labeling engine - per-vertex label painting on surface meshes
//!
//! This crate provides the core of the labeling tool:
//! - [`io`] / [`geometry`] - STL/OBJ parsing and normalization into [`Mesh`]
//! - [`classes`] - label classes and the implicit problem-area class
//! - [`assignment`] - vertex → class maps, one per [`LabelMode`]
//! - [`color`] - the per-vertex display color buffer
//! - [`query`] / [`raycast`] - radius queries and pointer picking
//! - [`falloff`] / [`brush`] - spherical brush strength
//! - [`stroke`] - the pointer stroke state machine
//! - [`session`] - everything tied together for one open mesh
//! - [`export`] - JSON, CSV and PLY output
//!
//! Nothing here renders or touches a window; a view layer feeds pointer
//! input in and reads buffers and events out.

pub mod assignment;
pub mod brush;
pub mod classes;
pub mod color;
pub mod error;
pub mod export;
pub mod falloff;
pub mod geometry;
pub mod io;
pub mod query;
pub mod raycast;
pub mod session;
pub mod stroke;

pub use assignment::{AssignmentMap, AssignmentStore, LabelMode};
pub use brush::BrushSettings;
pub use classes::{ClassColor, ClassResolver, LabelClass, LabelClassId, LabelClassSet, ProblemAreaClass};
pub use color::VertexColorBuffer;
pub use error::{ClassError, ExportError, LoadError};
pub use export::{ExportKind, LabelRecord};
pub use falloff::FalloffKind;
pub use geometry::{Aabb, Mesh, load_mesh, normalize};
pub use io::{MeshFormat, RawMesh, parse_mesh};
pub use query::RadiusQuery;
pub use raycast::{MeshHit, Ray, cast_ray};
pub use session::{ApplyReport, LabelCounts, LabelingSession, SessionEvent};
pub use stroke::{PointerButton, StrokeController, StrokePhase, StrokeSample, Tool};
