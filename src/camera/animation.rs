//! Animated camera transitions.
//!
//! Transitions follow van Wijk and Nuij's smooth zoom path: the view zooms
//! out while it travels and back in as it arrives, at a perceptually
//! constant speed. Time is eased with a cubic in-out curve.

use super::Transform;
use crate::geo::FeatureId;
use eframe::egui::{Pos2, Vec2};
use std::time::Duration;
use web_time::Instant;

const RHO: f64 = std::f64::consts::SQRT_2;
const RHO2: f64 = 2.0;
const RHO4: f64 = 4.0;
const EPSILON2: f64 = 1e-12;

/// Why a transition was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Zooming to a selected country.
    Focus(FeatureId),
    /// Returning to the identity transform.
    Reset,
}

/// A view as (centre x, centre y, visible width) in base coordinates.
type View = [f64; 3];

/// Interpolates between two views along the smooth zoom path.
#[derive(Debug, Clone, Copy)]
struct ZoomPath {
    start: View,
    dx: f64,
    dy: f64,
    shape: PathShape,
}

#[derive(Debug, Clone, Copy)]
enum PathShape {
    /// Start and end share a centre: pure exponential zoom.
    Zoom { s: f64 },
    /// General case.
    Arc { s: f64, r0: f64, d1: f64 },
}

impl ZoomPath {
    fn new(p0: View, p1: View) -> Self {
        let [ux0, uy0, w0] = p0;
        let [ux1, uy1, w1] = p1;
        let dx = ux1 - ux0;
        let dy = uy1 - uy0;
        let d2 = dx * dx + dy * dy;

        let shape = if d2 < EPSILON2 {
            PathShape::Zoom {
                s: (w1 / w0).ln() / RHO,
            }
        } else {
            let d1 = d2.sqrt();
            let b0 = (w1 * w1 - w0 * w0 + RHO4 * d2) / (2.0 * w0 * RHO2 * d1);
            let b1 = (w1 * w1 - w0 * w0 - RHO4 * d2) / (2.0 * w1 * RHO2 * d1);
            let r0 = ((b0 * b0 + 1.0).sqrt() - b0).ln();
            let r1 = ((b1 * b1 + 1.0).sqrt() - b1).ln();
            PathShape::Arc {
                s: (r1 - r0) / RHO,
                r0,
                d1,
            }
        };

        Self {
            start: p0,
            dx,
            dy,
            shape,
        }
    }

    fn at(&self, t: f64) -> View {
        let [ux0, uy0, w0] = self.start;
        match self.shape {
            PathShape::Zoom { s } => [
                ux0 + t * self.dx,
                uy0 + t * self.dy,
                w0 * (RHO * t * s).exp(),
            ],
            PathShape::Arc { s, r0, d1 } => {
                let s = t * s;
                let cosh_r0 = r0.cosh();
                let u = w0 / (RHO2 * d1) * (cosh_r0 * (RHO * s + r0).tanh() - r0.sinh());
                [
                    ux0 + u * self.dx,
                    uy0 + u * self.dy,
                    w0 * cosh_r0 / (RHO * s + r0).cosh(),
                ]
            }
        }
    }
}

/// Cubic in-out easing on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// One in-flight transition between two transforms.
#[derive(Debug, Clone)]
pub struct Animation {
    kind: AnimationKind,
    to: Transform,
    start: Instant,
    duration: Duration,
    /// Fixed screen point the path is expressed around (viewport centre).
    pivot: Pos2,
    /// Larger viewport dimension; view width at zoom 1.
    span: f64,
    path: ZoomPath,
}

impl Animation {
    pub fn new(
        kind: AnimationKind,
        from: Transform,
        to: Transform,
        viewport: Vec2,
        start: Instant,
        duration: Duration,
    ) -> Self {
        let pivot = Pos2::new(viewport.x / 2.0, viewport.y / 2.0);
        let span = viewport.x.max(viewport.y).max(1.0) as f64;

        let a = from.invert(pivot);
        let b = to.invert(pivot);
        let path = ZoomPath::new(
            [a.x as f64, a.y as f64, span / from.k as f64],
            [b.x as f64, b.y as f64, span / to.k as f64],
        );

        Self {
            kind,
            to,
            start,
            duration,
            pivot,
            span,
            path,
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn target(&self) -> Transform {
        self.to
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Transform at `now` and whether the transition has finished.
    ///
    /// The final sample is exactly the target.
    pub fn sample(&self, now: Instant) -> (Transform, bool) {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.to, true);
        }

        let [ux, uy, w] = self.path.at(ease_cubic_in_out(progress));
        let k = (self.span / w) as f32;
        let transform = Transform::new(
            self.pivot.x - ux as f32 * k,
            self.pivot.y - uy as f32 * k,
            k,
        );
        (transform, false)
    }
}
