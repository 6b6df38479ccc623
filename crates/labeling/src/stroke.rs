//! Stroke controller: decides when a pointer sample becomes a paint or erase
//!
//! States are `Idle` and `Down`. While `Down`, every scene tick supplies the
//! current surface hit (if any). A hit is applied only if it is the first of
//! the stroke or has moved more than `brush size * spacing ratio` from the
//! last applied sample, which bounds the work to roughly one radius query per
//! tenth of the brush traveled.

use anamark_config::{EngineConfig, SecondaryButtonAction};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::brush::BrushSettings;

/// Pointer buttons the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Active tool selected in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Paint,
    Erase,
    /// Camera only; the pointer never paints
    Navigate,
}

impl Tool {
    pub fn is_brush(self) -> bool {
        matches!(self, Tool::Paint | Tool::Erase)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokePhase {
    #[default]
    Idle,
    Down,
}

/// A sample the controller has accepted for application
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    pub point: Vec3,
    pub erase: bool,
}

/// Stroke state machine
#[derive(Debug, Clone)]
pub struct StrokeController {
    phase: StrokePhase,
    primary_down: bool,
    secondary_down: bool,
    last_sample: Option<Vec3>,
    spacing_ratio: f32,
    secondary_action: SecondaryButtonAction,
}

impl Default for StrokeController {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl StrokeController {
    pub fn new(spacing_ratio: f32, secondary_action: SecondaryButtonAction) -> Self {
        Self {
            phase: StrokePhase::Idle,
            primary_down: false,
            secondary_down: false,
            last_sample: None,
            spacing_ratio,
            secondary_action,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.sample_spacing_ratio, config.secondary_button)
    }

    pub fn phase(&self) -> StrokePhase {
        self.phase
    }

    pub fn is_down(&self) -> bool {
        self.phase == StrokePhase::Down
    }

    pub fn last_sample(&self) -> Option<Vec3> {
        self.last_sample
    }

    pub fn secondary_action(&self) -> SecondaryButtonAction {
        self.secondary_action
    }

    /// True while the secondary button hands the pointer to the camera
    pub fn camera_has_pointer(&self) -> bool {
        self.secondary_down && self.secondary_action == SecondaryButtonAction::Orbit
    }

    /// Whether the held secondary button forces erase samples
    fn erase_forced(&self) -> bool {
        self.secondary_down && self.secondary_action == SecondaryButtonAction::Erase
    }

    pub fn press(&mut self, button: PointerButton, tool: Tool) {
        match button {
            PointerButton::Primary => self.primary_down = true,
            PointerButton::Secondary => self.secondary_down = true,
        }

        let starts_stroke = match button {
            PointerButton::Primary => tool.is_brush(),
            PointerButton::Secondary => {
                tool.is_brush() && self.secondary_action == SecondaryButtonAction::Erase
            }
        };
        if starts_stroke && self.phase == StrokePhase::Idle {
            debug!("Stroke started ({:?} button, {:?})", button, tool);
            self.phase = StrokePhase::Down;
            self.last_sample = None;
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.primary_down = false,
            PointerButton::Secondary => self.secondary_down = false,
        }

        if self.phase == StrokePhase::Down && !self.primary_down && !self.erase_forced() {
            debug!("Stroke ended");
            self.end_stroke();
        }
    }

    /// Feed one scene tick. `hit` is where the pointer ray meets the mesh,
    /// or `None` when it misses. Returns the sample to apply, if any.
    pub fn tick(&mut self, hit: Option<Vec3>, brush: &BrushSettings, tool: Tool) -> Option<StrokeSample> {
        if self.phase != StrokePhase::Down || self.camera_has_pointer() {
            return None;
        }

        let erase = match (self.erase_forced(), tool) {
            (true, _) => true,
            (false, Tool::Erase) => true,
            (false, Tool::Paint) => false,
            (false, Tool::Navigate) => return None,
        };

        let point = hit?;
        if let Some(last) = self.last_sample {
            if last.distance(point) <= brush.sample_spacing(self.spacing_ratio) {
                return None;
            }
        }

        self.last_sample = Some(point);
        Some(StrokeSample { point, erase })
    }

    /// Back to `Idle` with no last sample (mesh reload or explicit reset)
    pub fn reset(&mut self) {
        self.primary_down = false;
        self.secondary_down = false;
        self.end_stroke();
    }

    fn end_stroke(&mut self) {
        self.phase = StrokePhase::Idle;
        self.last_sample = None;
    }
}
