//! Camera state machine: manipulation, focus and reset transitions.

use super::animation::{Animation, AnimationKind};
use super::transform::{Transform, ZoomBounds};
use crate::config::EngineConfig;
use crate::geo::{hit_test, CountryFeature, FeatureId, MercatorProjection};
use crate::state::{CameraPhase, EngineState, RedrawQuality};
use eframe::egui::{Pos2, Rect, Vec2};
use std::time::Duration;
use web_time::Instant;

/// Owns zoom/pan bounds and the in-flight transition.
///
/// The transform itself lives in [`EngineState`] so the interaction
/// dispatcher can read it; every method here takes that state explicitly.
#[derive(Debug)]
pub struct CameraController {
    bounds: ZoomBounds,
    transition: Duration,
    fit_fraction: f32,
    overlay_inset: f32,
    wheel_sensitivity: f32,
    animation: Option<Animation>,
}

impl CameraController {
    pub fn new(config: &EngineConfig, viewport: Vec2, world: Rect) -> Self {
        Self {
            bounds: ZoomBounds::new(config.min_zoom, config.max_zoom, viewport, world),
            transition: config.transition(),
            fit_fraction: config.fit_fraction,
            overlay_inset: config.overlay_inset,
            wheel_sensitivity: config.wheel_sensitivity,
            animation: None,
        }
    }

    pub fn bounds(&self) -> &ZoomBounds {
        &self.bounds
    }

    /// The transition in flight, if any.
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Records a new surface size and translate extent, then re-clamps the
    /// current transform.
    pub fn set_viewport(&mut self, state: &mut EngineState, viewport: Vec2, world: Rect) {
        self.bounds.viewport = viewport;
        self.bounds.world = world;
        state.transform = self.bounds.constrain(state.transform);
    }

    /// Starts a pointer gesture. An in-flight transition is abandoned.
    pub fn begin_gesture(&mut self, state: &mut EngineState) {
        if let Some(animation) = self.animation.take() {
            log::debug!("Gesture interrupted {:?} transition", animation.kind());
        }
        state.phase = CameraPhase::Manipulating;
    }

    /// Drag update: shifts the view by a screen-space delta.
    pub fn pan_by(&mut self, state: &mut EngineState, delta: Vec2) {
        let next = state.transform.translated(delta);
        self.apply_gesture(state, next);
    }

    /// Zoom update keeping `anchor` (screen space) fixed.
    pub fn zoom_at(&mut self, state: &mut EngineState, anchor: Pos2, factor: f32) {
        let next = state.transform.scaled_about(anchor, factor);
        self.apply_gesture(state, next);
    }

    /// Wheel update. `delta_y` is in pixels, positive when scrolling down
    /// (zooming out).
    ///
    /// Outside a drag the wheel step is a gesture of its own and ends
    /// immediately.
    pub fn wheel(&mut self, state: &mut EngineState, anchor: Pos2, delta_y: f32) {
        let standalone = state.phase != CameraPhase::Manipulating;
        let factor = 2f32.powf(-delta_y * self.wheel_sensitivity);
        self.zoom_at(state, anchor, factor);
        if standalone {
            self.end_gesture(state);
        }
    }

    /// Ends the gesture and asks for one crisp redraw.
    pub fn end_gesture(&mut self, state: &mut EngineState) {
        if state.phase != CameraPhase::Manipulating {
            return;
        }
        state.phase = CameraPhase::Idle;
        state.scheduler.request(RedrawQuality::High);
    }

    fn apply_gesture(&mut self, state: &mut EngineState, next: Transform) {
        if state.phase != CameraPhase::Manipulating {
            self.begin_gesture(state);
        }
        state.transform = self.bounds.constrain(next);
        state.scheduler.request(RedrawQuality::Low);
    }

    /// Transform that frames the feature's largest member polygon.
    ///
    /// The box is scaled to `fit_fraction` of the region right of the
    /// overlay inset and centred in it. Not yet clamped to bounds.
    pub fn focus_target(
        &self,
        feature: &CountryFeature,
        projection: &MercatorProjection,
    ) -> Option<Transform> {
        let polygon = hit_test::largest_polygon(feature.geometry())?;
        let points: Vec<Pos2> = polygon
            .exterior
            .iter()
            .map(|c| projection.project(*c))
            .collect();
        if points.is_empty() {
            return None;
        }
        let rect = Rect::from_points(&points);

        let viewport = self.bounds.viewport;
        let (inset, view_w) = if viewport.x - self.overlay_inset > 0.0 {
            (self.overlay_inset, viewport.x - self.overlay_inset)
        } else {
            (0.0, viewport.x)
        };
        let view_h = viewport.y;

        let fill = (rect.width() / view_w).max(rect.height() / view_h);
        let k = if fill > 0.0 {
            self.fit_fraction / fill
        } else {
            self.bounds.max_k
        }
        .clamp(self.bounds.min_k, self.bounds.max_k);

        let center = rect.center();
        Some(Transform::new(
            inset + view_w / 2.0 - k * center.x,
            view_h / 2.0 - k * center.y,
            k,
        ))
    }

    /// Starts a transition framing `feature`. Returns `false` if the
    /// feature has no geometry to frame.
    pub fn focus(
        &mut self,
        state: &mut EngineState,
        id: FeatureId,
        feature: &CountryFeature,
        projection: &MercatorProjection,
        now: Instant,
    ) -> bool {
        match self.focus_target(feature, projection) {
            Some(target) => {
                self.animate_to(state, AnimationKind::Focus(id), target, now);
                true
            }
            None => {
                log::warn!("Cannot focus {}: no geometry", feature.display_name());
                false
            }
        }
    }

    /// Animated return to the identity transform.
    pub fn reset(&mut self, state: &mut EngineState, now: Instant) {
        self.animate_to(state, AnimationKind::Reset, Transform::IDENTITY, now);
    }

    fn animate_to(
        &mut self,
        state: &mut EngineState,
        kind: AnimationKind,
        target: Transform,
        now: Instant,
    ) {
        let target = self.bounds.constrain(target);
        if let Some(previous) = &self.animation {
            log::debug!("{:?} transition superseded by {:?}", previous.kind(), kind);
        }
        log::debug!(
            "Starting {:?} transition: {:?} -> {:?}",
            kind,
            state.transform,
            target
        );

        self.animation = Some(Animation::new(
            kind,
            state.transform,
            target,
            self.bounds.viewport,
            now,
            self.transition,
        ));
        state.phase = CameraPhase::Animating;
        state.scheduler.request(RedrawQuality::Low);
    }

    /// Advances the transition. Returns `true` if the transform changed.
    pub fn tick(&mut self, state: &mut EngineState, now: Instant) -> bool {
        let Some(animation) = &self.animation else {
            return false;
        };

        let (transform, finished) = animation.sample(now);
        state.transform = self.bounds.constrain(transform);

        if finished {
            log::debug!("{:?} transition finished", animation.kind());
            self.animation = None;
            state.phase = CameraPhase::Idle;
            state.scheduler.request(RedrawQuality::High);
        } else {
            state.scheduler.request(RedrawQuality::Low);
        }
        true
    }
}
