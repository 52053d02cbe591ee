//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lon/lat) and
//! base surface coordinates (before any pan/zoom transform) using a
//! spherical Mercator projection.

use eframe::egui::{Pos2, Rect};
use geo_types::Coord;
use std::f64::consts::{FRAC_PI_4, PI};

/// Latitude at which the Mercator world becomes square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Mercator projection fitted to a drawing surface.
///
/// The state is derived solely from the surface dimensions; `configure`
/// replaces all three parameters at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    /// Pixels per radian.
    scale: f64,
    /// Surface x of longitude 0.
    translate_x: f64,
    /// Surface y of the equator.
    translate_y: f64,
}

impl Default for MercatorProjection {
    fn default() -> Self {
        Self::for_surface(800, 600)
    }
}

impl MercatorProjection {
    /// Creates a projection fitted to a surface of the given size.
    pub fn for_surface(width: u32, height: u32) -> Self {
        let mut projection = Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        };
        projection.configure(width, height);
        projection
    }

    /// Refits the projection to a new surface size.
    ///
    /// The scale is chosen so the whole longitude range and the latitude
    /// band up to ±85° fit inside the surface at zoom 1. Zero dimensions
    /// are treated as 1.
    pub fn configure(&mut self, width: u32, height: u32) {
        let width = width.max(1) as f64;
        let height = height.max(1) as f64;

        *self = Self {
            scale: (width / (2.0 * PI)).min(height / PI),
            translate_x: width / 2.0,
            translate_y: height / 2.0,
        };
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> (f64, f64) {
        (self.translate_x, self.translate_y)
    }

    /// Converts geographic coordinates (lon, lat) to a surface position.
    pub fn project(&self, coord: Coord<f64>) -> Pos2 {
        let lambda = coord.x.to_radians();
        let phi = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = self.translate_x + self.scale * lambda;
        let y = self.translate_y - self.scale * (FRAC_PI_4 + phi / 2.0).tan().ln();

        Pos2::new(x as f32, y as f32)
    }

    /// Converts a surface position back to geographic coordinates.
    ///
    /// Returns `None` for positions outside the projected world
    /// (longitude beyond ±180°) or non-finite input.
    pub fn unproject(&self, pos: Pos2) -> Option<Coord<f64>> {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return None;
        }

        let lambda = (pos.x as f64 - self.translate_x) / self.scale;
        let phi = 2.0 * ((self.translate_y - pos.y as f64) / self.scale).exp().atan() - PI / 2.0;

        let lon = lambda.to_degrees();
        let lat = phi.to_degrees();

        if !lon.is_finite() || !lat.is_finite() || lon.abs() > 180.0 {
            return None;
        }

        Some(Coord { x: lon, y: lat })
    }

    /// Projected rectangle spanning longitude ±180 and latitude ±`lat_limit`.
    ///
    /// This is the translate extent the camera keeps reachable.
    pub fn world_bounds(&self, lat_limit: f64) -> Rect {
        let top_left = self.project(Coord {
            x: -180.0,
            y: lat_limit,
        });
        let bottom_right = self.project(Coord {
            x: 180.0,
            y: -lat_limit,
        });
        Rect::from_min_max(top_left, bottom_right)
    }
}
