//! Engine configuration.
//!
//! Every field has a default, so a config file only needs to name the
//! values it overrides.

use crate::error::MapError;
use crate::geo::MAX_LATITUDE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables for the camera and interaction layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smallest zoom factor (whole world visible).
    pub min_zoom: f32,
    /// Largest zoom factor.
    pub max_zoom: f32,
    /// Duration of focus and reset transitions in milliseconds.
    pub transition_ms: u64,
    /// Fraction of the available view a focused country should occupy.
    pub fit_fraction: f32,
    /// Pixels on the left edge covered by a host overlay (detail panel).
    /// Focus transitions centre the country in the remaining width.
    pub overlay_inset: f32,
    /// Wheel zoom per pixel of scroll delta (base-2 exponent).
    pub wheel_sensitivity: f32,
    /// Latitude limit (degrees) of the pannable world extent.
    ///
    /// Geometry is projected up to [`MAX_LATITUDE`], so with the default of
    /// 85 the outermost sliver (0.05°) of polar coastlines lies past the pan
    /// extent. Set this to `MAX_LATITUDE` to make every drawn vertex reachable.
    /// Values above `MAX_LATITUDE` are rejected.
    pub world_lat_limit: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 8.0,
            transition_ms: 750,
            fit_fraction: 0.9,
            overlay_inset: 0.0,
            wheel_sensitivity: 0.002,
            world_lat_limit: 85.0,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| MapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Rejects values the camera cannot work with.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.min_zoom.is_nan() || self.min_zoom <= 0.0 || !self.max_zoom.is_finite() {
            return Err(MapError::Config(format!(
                "zoom range must be positive and finite, got [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.fit_fraction.is_nan() || self.fit_fraction <= 0.0 || self.fit_fraction > 1.0 {
            return Err(MapError::Config(format!(
                "fit_fraction must be in (0, 1], got {}",
                self.fit_fraction
            )));
        }
        if self.overlay_inset.is_nan() || self.overlay_inset < 0.0 {
            return Err(MapError::Config(format!(
                "overlay_inset must be non-negative, got {}",
                self.overlay_inset
            )));
        }
        if self.world_lat_limit.is_nan()
            || self.world_lat_limit <= 0.0
            || self.world_lat_limit > MAX_LATITUDE
        {
            return Err(MapError::Config(format!(
                "world_lat_limit must be in (0, {}], got {}",
                MAX_LATITUDE, self.world_lat_limit
            )));
        }
        Ok(())
    }

    /// Transition length as a `Duration`.
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}
