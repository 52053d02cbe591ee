//! Point-in-country hit testing.
//!
//! Uses the even-odd (ray casting) rule in planar lon/lat space. A polygon's
//! rings are tested together, so a point inside a hole counts as outside.

use super::feature::{CountryFeature, FeatureId, FeatureSet, Geometry, Polygon, Ring};
use geo_types::Coord;

/// Finds the first feature (in load order) containing the point.
pub fn locate(coord: Coord<f64>, features: &FeatureSet) -> Option<FeatureId> {
    features
        .iter()
        .find(|(_, feature)| feature_contains(feature, coord))
        .map(|(id, _)| id)
}

/// Tests a single feature, using its bounding box as a pre-filter.
pub fn feature_contains(feature: &CountryFeature, coord: Coord<f64>) -> bool {
    match feature.bbox() {
        Some(bbox) if bbox.contains(coord.x, coord.y) => {}
        _ => return false,
    }

    match feature.geometry() {
        Geometry::Polygon(polygon) => polygon_contains(polygon, coord),
        Geometry::MultiPolygon(polygons) => polygons.iter().any(|p| polygon_contains(p, coord)),
    }
}

/// Even-odd test across every ring of the polygon.
pub fn polygon_contains(polygon: &Polygon, coord: Coord<f64>) -> bool {
    polygon
        .rings()
        .fold(false, |inside, ring| inside ^ ring_contains(ring, coord))
}

/// Ray-casting point-in-ring test. Rings with fewer than three vertices
/// contain nothing.
pub fn ring_contains(ring: &Ring, coord: Coord<f64>) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let (lon, lat) = (coord.x, coord.y);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].x, ring[i].y);
        let (xj, yj) = (ring[j].x, ring[j].y);
        if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Planar area of a ring in square degrees (always non-negative).
pub fn ring_area(ring: &Ring) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    let mut j = n - 1;
    for i in 0..n {
        twice_area += (ring[j].x - ring[i].x) * (ring[j].y + ring[i].y);
        j = i;
    }
    (twice_area / 2.0).abs()
}

/// Exterior area minus hole areas.
pub fn polygon_area(polygon: &Polygon) -> f64 {
    let holes: f64 = polygon.holes.iter().map(ring_area).sum();
    (ring_area(&polygon.exterior) - holes).max(0.0)
}

/// The member polygon with the largest area. For ties the earliest wins.
pub fn largest_polygon(geometry: &Geometry) -> Option<&Polygon> {
    match geometry {
        Geometry::Polygon(polygon) => Some(polygon),
        Geometry::MultiPolygon(polygons) => {
            polygons
                .iter()
                .fold(None, |best: Option<(&Polygon, f64)>, polygon| {
                    let area = polygon_area(polygon);
                    match best {
                        Some((_, best_area)) if best_area >= area => best,
                        _ => Some((polygon, area)),
                    }
                })
                .map(|(polygon, _)| polygon)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::feature::FeatureProperties;

    fn square(min_lon: f64, min_lat: f64, size: f64) -> Ring {
        vec![
            Coord { x: min_lon, y: min_lat },
            Coord { x: min_lon + size, y: min_lat },
            Coord { x: min_lon + size, y: min_lat + size },
            Coord { x: min_lon, y: min_lat + size },
            Coord { x: min_lon, y: min_lat },
        ]
    }

    fn country(name: &str, geometry: Geometry) -> CountryFeature {
        CountryFeature::new(geometry, FeatureProperties::named(name))
    }

    #[test]
    fn test_point_inside_simple_polygon() {
        let set = FeatureSet::new(
            vec![country("A", Geometry::Polygon(Polygon::new(square(0.0, 0.0, 10.0), vec![])))],
            1,
        );

        assert_eq!(locate(Coord { x: 5.0, y: 5.0 }, &set), Some(FeatureId::new(0)));
        assert_eq!(locate(Coord { x: 15.0, y: 5.0 }, &set), None);
        assert_eq!(locate(Coord { x: -0.5, y: 9.5 }, &set), None);
    }

    #[test]
    fn test_hole_excluded() {
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0)]);
        let set = FeatureSet::new(vec![country("Ring", Geometry::Polygon(polygon))], 1);

        assert_eq!(locate(Coord { x: 5.0, y: 5.0 }, &set), None);
        assert_eq!(locate(Coord { x: 2.0, y: 2.0 }, &set), Some(FeatureId::new(0)));
    }

    #[test]
    fn test_multipolygon_any_member() {
        let geometry = Geometry::MultiPolygon(vec![
            Polygon::new(square(0.0, 0.0, 2.0), vec![]),
            Polygon::new(square(50.0, 50.0, 2.0), vec![]),
        ]);
        let set = FeatureSet::new(vec![country("Islands", geometry)], 1);

        assert_eq!(locate(Coord { x: 1.0, y: 1.0 }, &set), Some(FeatureId::new(0)));
        assert_eq!(locate(Coord { x: 51.0, y: 51.0 }, &set), Some(FeatureId::new(0)));
        // Inside the combined bbox but in neither member.
        assert_eq!(locate(Coord { x: 25.0, y: 25.0 }, &set), None);
    }

    #[test]
    fn test_first_match_wins() {
        let set = FeatureSet::new(
            vec![
                country("First", Geometry::Polygon(Polygon::new(square(0.0, 0.0, 10.0), vec![]))),
                country("Second", Geometry::Polygon(Polygon::new(square(5.0, 5.0, 10.0), vec![]))),
            ],
            1,
        );

        assert_eq!(locate(Coord { x: 7.0, y: 7.0 }, &set), Some(FeatureId::new(0)));
        assert_eq!(locate(Coord { x: 12.0, y: 12.0 }, &set), Some(FeatureId::new(1)));
    }

    #[test]
    fn test_empty_set_and_degenerate_rings() {
        let empty = FeatureSet::default();
        assert_eq!(locate(Coord { x: 0.0, y: 0.0 }, &empty), None);

        let line = vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 5.0 }];
        assert!(!ring_contains(&line, Coord { x: 1.0, y: 1.0 }));
    }

    #[test]
    fn test_self_intersecting_ring_does_not_panic() {
        let bowtie = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 10.0, y: 0.0 },
            Coord { x: 0.0, y: 10.0 },
        ];
        let polygon = Polygon::new(bowtie, vec![]);
        let _ = polygon_contains(&polygon, Coord { x: 5.0, y: 5.0 });
        assert!(polygon_contains(&polygon, Coord { x: 8.0, y: 5.0 }));
    }

    #[test]
    fn test_largest_polygon_by_area() {
        let small = Polygon::new(square(0.0, 0.0, 1.0), vec![]);
        let large = Polygon::new(square(40.0, 10.0, 6.0), vec![]);
        let geometry = Geometry::MultiPolygon(vec![small, large.clone()]);

        assert_eq!(largest_polygon(&geometry), Some(&large));
        assert!((polygon_area(&large) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_reduces_area() {
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![square(1.0, 1.0, 5.0)]);
        assert!((polygon_area(&polygon) - 75.0).abs() < 1e-9);
    }
}
