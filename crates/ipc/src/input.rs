//! Pointer input types.

use serde::{Deserialize, Serialize};

/// Mouse button identifier. Left paints, right is the secondary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}
