//! Country feature data structures.

use crate::error::MapError;
use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry as GeoJsonGeometry, JsonObject, Value};
use std::sync::Arc;

/// A closed ring of (lon, lat) vertices. The closing vertex may or may not
/// repeat the first one.
pub type Ring = Vec<Coord<f64>>;

/// A polygon with one exterior ring and zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Iterates the exterior ring followed by every hole.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// Country geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Iterates the member polygons (one for `Polygon`).
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        match self {
            Geometry::Polygon(polygon) => std::slice::from_ref(polygon).iter(),
            Geometry::MultiPolygon(polygons) => polygons.iter(),
        }
    }
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    /// Bounding box of a vertex sequence, or `None` if it is empty.
    pub fn of_coords<'a>(coords: impl IntoIterator<Item = &'a Coord<f64>>) -> Option<Self> {
        coords.into_iter().fold(None, |acc, c| {
            Some(match acc {
                None => GeoBounds {
                    min_lon: c.x,
                    min_lat: c.y,
                    max_lon: c.x,
                    max_lat: c.y,
                },
                Some(b) => GeoBounds {
                    min_lon: b.min_lon.min(c.x),
                    min_lat: b.min_lat.min(c.y),
                    max_lon: b.max_lon.max(c.x),
                    max_lat: b.max_lat.max(c.y),
                },
            })
        })
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

/// Descriptive properties carried alongside the geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureProperties {
    pub name: Option<String>,
    /// Administrative (sovereign) name, used when `name` is missing.
    pub admin: Option<String>,
    pub iso_a2: Option<String>,
}

impl FeatureProperties {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A country: geometry, properties and a precomputed bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    geometry: Geometry,
    properties: FeatureProperties,
    bbox: Option<GeoBounds>,
}

impl CountryFeature {
    pub fn new(geometry: Geometry, properties: FeatureProperties) -> Self {
        let bbox = GeoBounds::of_coords(geometry.polygons().flat_map(|p| p.exterior.iter()));
        Self {
            geometry,
            properties,
            bbox,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn properties(&self) -> &FeatureProperties {
        &self.properties
    }

    /// Bounding box of all exterior rings; `None` when the geometry has no vertices.
    pub fn bbox(&self) -> Option<GeoBounds> {
        self.bbox
    }

    /// Name to show to the user.
    pub fn display_name(&self) -> &str {
        self.properties
            .name
            .as_deref()
            .or(self.properties.admin.as_deref())
            .unwrap_or("Unknown Country")
    }
}

/// Handle to a feature in the current [`FeatureSet`].
///
/// Handles are plain indices with no ownership; they are only meaningful for
/// the set they were resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(usize);

impl FeatureId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Immutable, shared collection of country features.
///
/// A new load publishes a new set; existing sets are never modified.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    features: Arc<[CountryFeature]>,
    generation: u64,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}

impl FeatureSet {
    pub fn new(features: Vec<CountryFeature>, generation: u64) -> Self {
        Self {
            features: Arc::from(features),
            generation,
        }
    }

    /// Publication counter, used to key derived caches.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<&CountryFeature> {
        self.features.get(id.0)
    }

    /// Iterates features in load order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &CountryFeature)> {
        self.features
            .iter()
            .enumerate()
            .map(|(idx, feature)| (FeatureId(idx), feature))
    }
}

/// Reads country features from GeoJSON text.
///
/// Only Polygon and MultiPolygon geometries are kept; everything else is
/// skipped with a warning.
pub fn load_features_from_geojson(geojson_str: &str) -> Result<Vec<CountryFeature>, MapError> {
    let geojson: GeoJson = geojson_str
        .parse()
        .map_err(|e| MapError::GeoJson(format!("Failed to parse GeoJSON: {}", e)))?;

    let mut features = Vec::new();
    let mut skipped = 0usize;

    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                match convert_feature(feature) {
                    Some(f) => features.push(f),
                    None => skipped += 1,
                }
            }
        }
        GeoJson::Feature(f) => match convert_feature(&f) {
            Some(f) => features.push(f),
            None => skipped += 1,
        },
        GeoJson::Geometry(g) => match convert_geometry(&g) {
            Some(geometry) => {
                features.push(CountryFeature::new(geometry, FeatureProperties::default()))
            }
            None => skipped += 1,
        },
    }

    if skipped > 0 {
        log::warn!("Skipped {} features without polygon geometry", skipped);
    }
    log::info!("Loaded {} country features", features.len());

    Ok(features)
}

fn convert_feature(feature: &Feature) -> Option<CountryFeature> {
    let geometry = feature.geometry.as_ref().and_then(convert_geometry)?;
    let properties = feature
        .properties
        .as_ref()
        .map(convert_properties)
        .unwrap_or_default();
    Some(CountryFeature::new(geometry, properties))
}

fn convert_properties(props: &JsonObject) -> FeatureProperties {
    let lookup = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| props.get(*key).and_then(|v| v.as_str()))
            .map(|s| s.trim().to_string())
    };

    FeatureProperties {
        name: lookup(&["name", "NAME"]),
        admin: lookup(&["ADMIN", "admin"]),
        iso_a2: lookup(&["ISO_A2", "iso_a2", "ISO_A2_EH"]),
    }
}

fn convert_geometry(geometry: &GeoJsonGeometry) -> Option<Geometry> {
    match &geometry.value {
        Value::Polygon(rings) => convert_polygon(rings).map(Geometry::Polygon),
        Value::MultiPolygon(polygons) => {
            let polygons: Vec<Polygon> = polygons
                .iter()
                .filter_map(|rings| convert_polygon(rings))
                .collect();
            if polygons.is_empty() {
                None
            } else {
                Some(Geometry::MultiPolygon(polygons))
            }
        }
        Value::GeometryCollection(geometries) => geometries.iter().find_map(convert_geometry),
        _ => None,
    }
}

fn convert_polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon> {
    let (exterior, holes) = rings.split_first()?;
    Some(Polygon {
        exterior: convert_ring(exterior),
        holes: holes.iter().map(|ring| convert_ring(ring)).collect(),
    })
}

fn convert_ring(ring: &[Vec<f64>]) -> Ring {
    ring.iter()
        .filter_map(|c| match c.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect()
}
