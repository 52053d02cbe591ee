//! Pre-rendered map raster and projected country paths.
//!
//! The raster holds every country filled and outlined at the base projection
//! (zoom 1). While the camera moves, the renderer stretches it instead of
//! re-filling thousands of polygons per frame.

use super::style::{solid, MapStyle};
use super::surface::allocate;
use crate::error::MapError;
use crate::geo::{CountryFeature, FeatureId, FeatureSet, MercatorProjection};
use tiny_skia::{FillRule, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Identifies what a cache was built for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CacheKey {
    /// Surface dimensions the raster was built at.
    pub dimensions: (u32, u32),
    /// Generation of the feature set that was drawn.
    pub generation: u64,
}

/// Raster and per-feature paths for one (surface size, feature set) pair.
#[derive(Debug, Default)]
pub struct RenderCache {
    raster: Option<Pixmap>,
    /// Indexed by `FeatureId`; `None` for features without drawable rings.
    paths: Vec<Option<Path>>,
    key: Option<CacheKey>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the cache was built for the given key.
    pub fn is_valid(&self, key: &CacheKey) -> bool {
        self.key.as_ref() == Some(key) && self.raster.is_some()
    }

    /// Re-projects every feature and redraws the raster.
    ///
    /// The raster is exactly `dimensions` in size (clamped to 1).
    pub fn rebuild(
        &mut self,
        features: &FeatureSet,
        projection: &MercatorProjection,
        style: &MapStyle,
        dimensions: (u32, u32),
    ) -> Result<(), MapError> {
        let mut raster = allocate(dimensions.0, dimensions.1)?;
        raster.fill(super::colors::to_skia(style.ocean));

        let land = solid(style.land);
        let border = solid(style.border);
        let stroke = Stroke {
            width: style.border_width,
            ..Default::default()
        };

        let paths: Vec<Option<Path>> = features
            .iter()
            .map(|(_, feature)| feature_path(feature, projection))
            .collect();

        for path in paths.iter().flatten() {
            raster.fill_path(path, &land, FillRule::EvenOdd, Transform::identity(), None);
            raster.stroke_path(path, &border, &stroke, Transform::identity(), None);
        }

        self.raster = Some(raster);
        self.paths = paths;
        self.key = Some(CacheKey {
            dimensions,
            generation: features.generation(),
        });
        Ok(())
    }

    /// The pre-rendered raster, if built.
    pub fn raster(&self) -> Option<&Pixmap> {
        self.raster.as_ref()
    }

    /// Projected outline of one feature.
    pub fn path(&self, id: FeatureId) -> Option<&Path> {
        self.paths.get(id.index()).and_then(Option::as_ref)
    }

    /// Every drawable path in feature order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().flatten()
    }

    /// Invalidate the cache, forcing a rebuild before the next raster draw.
    pub fn invalidate(&mut self) {
        log::debug!("Invalidating render cache");
        self.raster = None;
        self.paths.clear();
        self.key = None;
    }
}

/// Builds the projected outline of a feature: one closed contour per ring.
///
/// Rings with fewer than three vertices are skipped. Returns `None` when no
/// ring is drawable.
pub fn feature_path(feature: &CountryFeature, projection: &MercatorProjection) -> Option<Path> {
    let mut builder = PathBuilder::new();

    for ring in feature.geometry().polygons().flat_map(|p| p.rings()) {
        if ring.len() < 3 {
            continue;
        }
        let mut points = ring.iter().map(|c| projection.project(*c));
        if let Some(first) = points.next() {
            builder.move_to(first.x, first.y);
            for p in points {
                builder.line_to(p.x, p.y);
            }
            builder.close();
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{FeatureProperties, Geometry, Polygon};
    use geo_types::Coord;

    fn square(min: f64, max: f64) -> CountryFeature {
        let ring = vec![
            Coord { x: min, y: min },
            Coord { x: max, y: min },
            Coord { x: max, y: max },
            Coord { x: min, y: max },
            Coord { x: min, y: min },
        ];
        CountryFeature::new(
            Geometry::Polygon(Polygon::new(ring, vec![])),
            FeatureProperties::named("Square"),
        )
    }

    #[test]
    fn test_rebuild_sets_key() {
        let features = FeatureSet::new(vec![square(0.0, 20.0)], 3);
        let projection = MercatorProjection::for_surface(400, 300);
        let mut cache = RenderCache::new();

        cache
            .rebuild(&features, &projection, &MapStyle::default(), (400, 300))
            .unwrap();

        let key = CacheKey {
            dimensions: (400, 300),
            generation: 3,
        };
        assert!(cache.is_valid(&key));
        assert!(!cache.is_valid(&CacheKey {
            generation: 4,
            ..key
        }));
        assert_eq!(cache.raster().map(|r| (r.width(), r.height())), Some((400, 300)));
        assert!(cache.path(FeatureId::new(0)).is_some());

        cache.invalidate();
        assert!(!cache.is_valid(&key));
    }

    #[test]
    fn test_path_bounds_match_projection() {
        let projection = MercatorProjection::for_surface(800, 600);
        let path = feature_path(&square(0.0, 20.0), &projection).unwrap();
        let bounds = path.bounds();

        let top_left = projection.project(Coord { x: 0.0, y: 20.0 });
        let bottom_right = projection.project(Coord { x: 20.0, y: 0.0 });
        assert!((bounds.left() - top_left.x).abs() < 1e-3);
        assert!((bounds.top() - top_left.y).abs() < 1e-3);
        assert!((bounds.right() - bottom_right.x).abs() < 1e-3);
        assert!((bounds.bottom() - bottom_right.y).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_rings_have_no_path() {
        let feature = CountryFeature::new(
            Geometry::Polygon(Polygon::new(
                vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }],
                vec![],
            )),
            FeatureProperties::default(),
        );
        let projection = MercatorProjection::default();
        assert!(feature_path(&feature, &projection).is_none());
    }
}
