//! Engine state management.
//!
//! All mutable interaction state lives in one owned [`EngineState`], shared
//! by the camera controller and the interaction dispatcher through `&mut`
//! borrows rather than ambient globals.

mod scheduler;
mod stats;

pub use scheduler::{RedrawQuality, RedrawScheduler};
pub use stats::RenderStats;

use crate::camera::Transform;
use crate::geo::FeatureId;

/// Mutually exclusive camera phases.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    #[default]
    Idle,
    /// A pointer drag or wheel gesture is in progress.
    Manipulating,
    /// A programmatic transition is in flight.
    Animating,
}

impl CameraPhase {
    /// Quality for redraws requested while in this phase.
    pub fn redraw_quality(&self) -> RedrawQuality {
        match self {
            CameraPhase::Idle => RedrawQuality::High,
            CameraPhase::Manipulating | CameraPhase::Animating => RedrawQuality::Low,
        }
    }
}

/// Root interaction state.
#[derive(Debug, Default)]
pub struct EngineState {
    /// Current pan/zoom on top of the base projection
    pub transform: Transform,

    /// Camera phase
    pub phase: CameraPhase,

    /// Country under the pointer
    pub hovered: Option<FeatureId>,

    /// Selected country
    pub selected: Option<FeatureId>,

    /// Pending redraw flag
    pub scheduler: RedrawScheduler,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a redraw at the quality implied by the current phase.
    pub fn request_redraw(&mut self) {
        let quality = self.phase.redraw_quality();
        self.scheduler.request(quality);
    }

    /// Drops hover and selection, e.g. when the feature set is replaced.
    pub fn clear_feature_refs(&mut self) {
        self.hovered = None;
        self.selected = None;
    }
}
