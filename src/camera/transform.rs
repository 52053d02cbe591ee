//! Pan/zoom transform and its bounds.

use eframe::egui::{Pos2, Rect, Vec2};

/// Pan (`x`, `y`) and zoom (`k`) applied on top of the base projection.
///
/// A base position `p` is drawn at `p * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub k: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn new(x: f32, y: f32, k: f32) -> Self {
        Self { x, y, k }
    }

    /// Base position -> screen position.
    pub fn apply(&self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x * self.k + self.x, pos.y * self.k + self.y)
    }

    /// Screen position -> base position.
    pub fn invert(&self, pos: Pos2) -> Pos2 {
        Pos2::new((pos.x - self.x) / self.k, (pos.y - self.y) / self.k)
    }

    /// Shifts the transform by a screen-space delta.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.k)
    }

    /// Scales by `factor` keeping the screen point `anchor` fixed.
    pub fn scaled_about(&self, anchor: Pos2, factor: f32) -> Self {
        let base = self.invert(anchor);
        let k = self.k * factor;
        Self::new(anchor.x - base.x * k, anchor.y - base.y * k, k)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The equivalent `tiny_skia` transform.
    pub fn to_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(self.k, 0.0, 0.0, self.k, self.x, self.y)
    }
}

/// Zoom range plus the translate extent derived from the projected world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min_k: f32,
    pub max_k: f32,
    /// Visible surface size.
    pub viewport: Vec2,
    /// Projected world rectangle in base coordinates.
    pub world: Rect,
}

impl ZoomBounds {
    pub fn new(min_k: f32, max_k: f32, viewport: Vec2, world: Rect) -> Self {
        Self {
            min_k,
            max_k,
            viewport,
            world,
        }
    }

    /// Clamps zoom to `[min_k, max_k]` and pan so the world stays reachable.
    ///
    /// Along each axis, a world wider than the viewport must cover it
    /// edge to edge; a narrower world is centred.
    pub fn constrain(&self, transform: Transform) -> Transform {
        let k = if transform.k.is_finite() {
            transform.k.clamp(self.min_k, self.max_k)
        } else {
            self.min_k
        };

        let x = constrain_axis(transform.x, k, self.world.min.x, self.world.max.x, self.viewport.x);
        let y = constrain_axis(transform.y, k, self.world.min.y, self.world.max.y, self.viewport.y);

        Transform::new(x, y, k)
    }
}

fn constrain_axis(offset: f32, k: f32, world_min: f32, world_max: f32, view: f32) -> f32 {
    if (world_max - world_min) * k <= view || !offset.is_finite() {
        return (view - (world_min + world_max) * k) / 2.0;
    }

    let lowest = view - world_max * k;
    let highest = -world_min * k;
    offset.max(lowest).min(highest)
}
