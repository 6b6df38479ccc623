//! Type definitions for IPC messages.

use serde::{Deserialize, Serialize};

/// A label class as shown in the class list panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: u32,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
    pub visible: bool,
}

/// Labeled vertex counts ("vertices painted" / "areas marked").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountsInfo {
    pub classes: usize,
    pub problem_areas: usize,
}
