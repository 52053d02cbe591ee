//! Camera: pan/zoom transform, its bounds and animated transitions.

mod animation;
mod controller;
mod transform;

pub use animation::{ease_cubic_in_out, Animation, AnimationKind};
pub use controller::CameraController;
pub use transform::{Transform, ZoomBounds};
