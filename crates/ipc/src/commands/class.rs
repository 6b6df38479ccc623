//! Label class list commands.

use serde::{Deserialize, Serialize};

/// Edits to the label class list. Colors are `#rrggbb` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClassCommand {
    Add { name: String, color: String },
    Rename { id: u32, name: String },
    Recolor { id: u32, color: String },
    SetVisible { id: u32, visible: bool },
    Remove { id: u32 },
    /// Toggle the implicit problem-area class
    SetProblemAreaVisible { visible: bool },
    SetProblemAreaColor { color: String },
}
