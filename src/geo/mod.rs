//! Country geometry, projection and hit testing.
//!
//! This module provides the geographic side of the map: the feature model
//! shared by every component, the Mercator projection between lon/lat and
//! surface pixels, and the point-in-country lookup.

mod feature;
pub mod hit_test;
mod projection;

pub use feature::{
    load_features_from_geojson, CountryFeature, FeatureId, FeatureProperties, FeatureSet,
    GeoBounds, Geometry, Polygon, Ring,
};
pub use hit_test::locate;
pub use projection::{MercatorProjection, MAX_LATITUDE};
