//! Label classes and class resolution
//!
//! A label class is a named, colored, visibility-toggleable category. Two
//! sources of classes exist:
//!
//! - [`LabelClassSet`]: the user-managed classes of class-labeling mode
//! - [`ProblemAreaClass`]: the one implicit class of single-class mode
//!
//! Both implement [`ClassResolver`], which is all the color recompute and
//! export paths need to turn a stored class id back into a color and name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassError;

/// Stable identifier of a label class. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelClassId(pub u32);

impl LabelClassId {
    /// Fixed id of the implicit single-class mode class
    pub const PROBLEM_AREA: LabelClassId = LabelClassId(0);
}

impl fmt::Display for LabelClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 8-bit RGB class color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassColor(pub [u8; 3]);

impl ClassColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Normalized [0, 1] floats for the color buffer
    pub fn to_unit(self) -> [f32; 3] {
        let [r, g, b] = self.0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

impl FromStr for ClassColor {
    type Err = ClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClassError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ])),
            // #rgb shorthand: each digit doubled
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self([r * 17, g * 17, b * 17]))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for ClassColor {
    type Error = ClassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClassColor> for String {
    fn from(color: ClassColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for ClassColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// A named, colored category a vertex can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelClass {
    pub id: LabelClassId,
    pub name: String,
    pub color: ClassColor,
    pub visible: bool,
}

/// Resolves stored class ids to live class metadata
pub trait ClassResolver {
    /// The class for `id`, or `None` when it no longer exists
    fn resolve(&self, id: LabelClassId) -> Option<&LabelClass>;
}

/// User-managed label classes, kept in creation order
#[derive(Debug, Clone)]
pub struct LabelClassSet {
    classes: Vec<LabelClass>,
    next_id: u32,
}

impl Default for LabelClassSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelClassSet {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            // 0 belongs to the problem-area class
            next_id: 1,
        }
    }

    /// Add a visible class and return its id
    pub fn add(&mut self, name: impl Into<String>, color: ClassColor) -> LabelClassId {
        let id = LabelClassId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        debug!("Added label class {} {:?} ({})", id, name, color);
        self.classes.push(LabelClass {
            id,
            name,
            color,
            visible: true,
        });
        id
    }

    pub fn rename(&mut self, id: LabelClassId, name: impl Into<String>) -> Result<(), ClassError> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn recolor(&mut self, id: LabelClassId, color: ClassColor) -> Result<(), ClassError> {
        self.get_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_visible(&mut self, id: LabelClassId, visible: bool) -> Result<(), ClassError> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    /// Remove a class. Vertex assignments pointing at it are left in place
    /// and skipped by recompute and export from then on.
    pub fn remove(&mut self, id: LabelClassId) -> Result<LabelClass, ClassError> {
        let index = self
            .classes
            .iter()
            .position(|class| class.id == id)
            .ok_or(ClassError::UnknownClass(id))?;
        Ok(self.classes.remove(index))
    }

    pub fn get(&self, id: LabelClassId) -> Option<&LabelClass> {
        self.classes.iter().find(|class| class.id == id)
    }

    fn get_mut(&mut self, id: LabelClassId) -> Result<&mut LabelClass, ClassError> {
        self.classes
            .iter_mut()
            .find(|class| class.id == id)
            .ok_or(ClassError::UnknownClass(id))
    }

    pub fn contains(&self, id: LabelClassId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelClass> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassResolver for LabelClassSet {
    fn resolve(&self, id: LabelClassId) -> Option<&LabelClass> {
        self.get(id)
    }
}

/// The single implicit class of problem-area marking mode
#[derive(Debug, Clone)]
pub struct ProblemAreaClass {
    class: LabelClass,
}

impl ProblemAreaClass {
    pub fn new(name: impl Into<String>, color: ClassColor) -> Self {
        Self {
            class: LabelClass {
                id: LabelClassId::PROBLEM_AREA,
                name: name.into(),
                color,
                visible: true,
            },
        }
    }

    pub fn class(&self) -> &LabelClass {
        &self.class
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.class.visible = visible;
    }

    pub fn set_color(&mut self, color: ClassColor) {
        self.class.color = color;
    }
}

impl ClassResolver for ProblemAreaClass {
    fn resolve(&self, id: LabelClassId) -> Option<&LabelClass> {
        (id == LabelClassId::PROBLEM_AREA).then_some(&self.class)
    }
}
