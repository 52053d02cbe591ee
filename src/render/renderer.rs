//! Dual-quality map renderer.

use super::cache::RenderCache;
use super::colors::to_skia;
use super::style::{solid, MapStyle};
use super::surface::Surface;
use crate::camera::Transform;
use crate::error::MapError;
use crate::geo::{FeatureId, FeatureSet, MercatorProjection};
use crate::state::{RedrawQuality, RenderStats};
use eframe::egui::Color32;
use tiny_skia::{FillRule, FilterQuality, PixmapPaint, Stroke};
use web_time::Instant;

/// Draws the map into a [`Surface`].
///
/// `Low` quality stretches the cached raster (cheap, blurry when zoomed);
/// `High` quality re-fills every country path under the transform.
/// Hover and selection are always drawn as vectors on top.
#[derive(Debug, Default)]
pub struct MapRenderer {
    style: MapStyle,
    stats: RenderStats,
}

impl MapRenderer {
    pub fn new(style: MapStyle) -> Self {
        Self {
            style,
            stats: RenderStats::new(),
        }
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Rebuilds `cache` for the given features and projection, recording
    /// the time it took.
    pub fn rebuild_cache(
        &mut self,
        cache: &mut RenderCache,
        features: &FeatureSet,
        projection: &MercatorProjection,
        dimensions: (u32, u32),
    ) -> Result<(), MapError> {
        let started = Instant::now();
        cache.rebuild(features, projection, &self.style, dimensions)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        self.stats.cache_builds += 1;
        self.stats.last_cache_build_ms = Some(elapsed_ms);
        log::debug!(
            "Rebuilt render cache: {} features at {}x{} in {:.1}ms",
            features.len(),
            dimensions.0,
            dimensions.1,
            elapsed_ms
        );
        Ok(())
    }

    /// Draws one frame. Identical arguments produce identical pixels.
    pub fn draw(
        &mut self,
        surface: &mut Surface,
        cache: &RenderCache,
        transform: Transform,
        hovered: Option<FeatureId>,
        selected: Option<FeatureId>,
        quality: RedrawQuality,
    ) {
        let started = Instant::now();
        let pixmap = surface.pixmap_mut();
        let ts = transform.to_skia();

        pixmap.fill(to_skia(self.style.ocean));

        match (quality, cache.raster()) {
            (RedrawQuality::Low, Some(raster)) => {
                let paint = PixmapPaint {
                    quality: FilterQuality::Bilinear,
                    ..Default::default()
                };
                pixmap.draw_pixmap(0, 0, raster.as_ref(), &paint, ts, None);
                self.stats.raster_draws += 1;
            }
            _ => {
                let land = solid(self.style.land);
                let border = solid(self.style.border);
                let stroke = Stroke {
                    width: self.style.border_width / transform.k,
                    ..Default::default()
                };
                for path in cache.paths() {
                    pixmap.fill_path(path, &land, FillRule::EvenOdd, ts, None);
                    pixmap.stroke_path(path, &border, &stroke, ts, None);
                }
                self.stats.vector_draws += 1;
            }
        }

        let highlight = Stroke {
            width: self.style.highlight_width / transform.k,
            ..Default::default()
        };
        let overlays: [(Option<FeatureId>, Color32); 2] = [
            (hovered, self.style.hover_fill),
            (selected, self.style.selected_fill),
        ];
        let outline = solid(self.style.highlight_stroke);
        for (id, fill) in overlays {
            let Some(path) = id.and_then(|id| cache.path(id)) else {
                continue;
            };
            pixmap.fill_path(path, &solid(fill), FillRule::EvenOdd, ts, None);
            pixmap.stroke_path(path, &outline, &highlight, ts, None);
        }

        self.stats.draws += 1;
        self.stats.last_draw_ms = Some(started.elapsed().as_secs_f64() * 1000.0);
    }
}
