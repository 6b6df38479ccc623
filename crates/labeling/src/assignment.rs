//! Vertex → label class assignment, partitioned by labeling mode
//!
//! Each mode owns an independent [`AssignmentMap`]. Paint and erase only
//! touch the map of the active mode, so switching modes never loses work done
//! in the other one. A vertex may sit in both maps at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classes::LabelClassId;

/// Which assignment map paint and erase operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Arbitrary user-defined label classes
    #[default]
    Classes,
    /// Binary problem-area marking with one implicit class
    ProblemArea,
}

impl LabelMode {
    /// Recompute order: earlier layers are painted over by later ones
    pub const LAYER_ORDER: [LabelMode; 2] = [LabelMode::Classes, LabelMode::ProblemArea];
}

/// Mapping from vertex index to the class it is labeled with
///
/// Ordered by vertex index so iteration (and therefore export) is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentMap {
    entries: BTreeMap<u32, LabelClassId>,
}

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns true if the map changed
    pub fn assign(&mut self, vertex: u32, class: LabelClassId) -> bool {
        self.entries.insert(vertex, class) != Some(class)
    }

    /// Remove if present; returns true if the map changed
    pub fn unassign(&mut self, vertex: u32) -> bool {
        self.entries.remove(&vertex).is_some()
    }

    pub fn get(&self, vertex: u32) -> Option<LabelClassId> {
        self.entries.get(&vertex).copied()
    }

    pub fn contains(&self, vertex: u32) -> bool {
        self.entries.contains_key(&vertex)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending vertex order
    pub fn iter(&self) -> impl Iterator<Item = (u32, LabelClassId)> + '_ {
        self.entries.iter().map(|(&vertex, &class)| (vertex, class))
    }
}

/// Both mode maps plus the mode that selects the active one
#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    classes: AssignmentMap,
    problem_areas: AssignmentMap,
    mode: LabelMode,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> LabelMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LabelMode) {
        self.mode = mode;
    }

    pub fn map(&self, mode: LabelMode) -> &AssignmentMap {
        match mode {
            LabelMode::Classes => &self.classes,
            LabelMode::ProblemArea => &self.problem_areas,
        }
    }

    fn map_mut(&mut self, mode: LabelMode) -> &mut AssignmentMap {
        match mode {
            LabelMode::Classes => &mut self.classes,
            LabelMode::ProblemArea => &mut self.problem_areas,
        }
    }

    pub fn active(&self) -> &AssignmentMap {
        self.map(self.mode)
    }

    /// Last writer wins: a vertex holds one class per mode
    pub fn assign(&mut self, vertex: u32, class: LabelClassId) -> bool {
        self.map_mut(self.mode).assign(vertex, class)
    }

    pub fn unassign(&mut self, vertex: u32) -> bool {
        self.map_mut(self.mode).unassign(vertex)
    }

    /// Empty the active mode's map only
    pub fn clear(&mut self) {
        self.map_mut(self.mode).clear();
    }

    /// Number of labeled vertices in the active mode
    pub fn count(&self) -> usize {
        self.active().len()
    }

    /// Empty both maps (mesh reload)
    pub fn clear_all(&mut self) {
        self.classes.clear();
        self.problem_areas.clear();
    }
}
