#![warn(clippy::all)]

//! World Map - an interactive map of country polygons.
//!
//! The engine projects country geometry with a Mercator projection, resolves
//! pointer positions to countries, and animates the camera toward a selected
//! country. Rendering uses two qualities: a cached raster stretched while the
//! view moves, and crisp vector redraws once it settles.
//!
//! A host drives everything through [`MapEngine`]: it forwards pointer,
//! gesture and resize events, calls [`MapEngine::frame`] once per display
//! refresh, and uploads [`MapEngine::surface`] when a frame drew.

pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod interaction;
pub mod render;
pub mod state;

pub use camera::Transform;
pub use config::EngineConfig;
pub use engine::MapEngine;
pub use error::MapError;
pub use geo::{load_features_from_geojson, CountryFeature, FeatureId, FeatureProperties, Geometry};
pub use interaction::CursorHint;
pub use state::{CameraPhase, RedrawQuality};
