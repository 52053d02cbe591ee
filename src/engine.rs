//! The map engine: the one type a host talks to.

use crate::camera::{CameraController, Transform};
use crate::config::EngineConfig;
use crate::error::MapError;
use crate::geo::{CountryFeature, FeatureId, FeatureSet, MercatorProjection};
use crate::interaction::{CursorHint, InteractionDispatcher, MapView};
use crate::render::{CacheKey, MapRenderer, MapStyle, RenderCache, Surface};
use crate::state::{CameraPhase, EngineState, RedrawQuality, RenderStats};
use eframe::egui::{Pos2, Vec2};
use web_time::Instant;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

/// Owns the projection, features, camera, dispatcher and renderer.
///
/// Event handlers only mutate state and request redraws; pixels are
/// produced in [`frame`](Self::frame), at most once per call.
#[derive(Debug)]
pub struct MapEngine {
    config: EngineConfig,
    projection: MercatorProjection,
    features: FeatureSet,
    state: EngineState,
    camera: CameraController,
    dispatcher: InteractionDispatcher,
    renderer: MapRenderer,
    cache: RenderCache,
    surface: Surface,
}

impl MapEngine {
    /// Creates an engine with an empty feature set on an 800x600 surface.
    pub fn new(config: EngineConfig) -> Result<Self, MapError> {
        Self::with_style(config, MapStyle::default())
    }

    pub fn with_style(config: EngineConfig, style: MapStyle) -> Result<Self, MapError> {
        config.validate()?;

        let projection = MercatorProjection::for_surface(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let surface = Surface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
        let camera = CameraController::new(
            &config,
            surface.size(),
            projection.world_bounds(config.world_lat_limit),
        );

        let mut engine = Self {
            config,
            projection,
            features: FeatureSet::default(),
            state: EngineState::new(),
            camera,
            dispatcher: InteractionDispatcher::new(),
            renderer: MapRenderer::new(style),
            cache: RenderCache::new(),
            surface,
        };
        engine.rebuild_cache()?;
        engine.state.scheduler.request(RedrawQuality::High);
        Ok(engine)
    }

    /// Publishes a new feature set, replacing the previous one wholesale.
    ///
    /// Hover and selection refer to the old set and are cleared.
    pub fn set_features(&mut self, features: Vec<CountryFeature>) -> Result<(), MapError> {
        let generation = self.features.generation() + 1;
        self.features = FeatureSet::new(features, generation);
        self.state.clear_feature_refs();
        log::info!(
            "Published {} features (generation {})",
            self.features.len(),
            generation
        );

        self.rebuild_cache()?;
        self.state.scheduler.request(RedrawQuality::High);
        Ok(())
    }

    /// Resizes the surface. Zero dimensions are treated as 1.
    ///
    /// The projection, pan extent, surface and cache are all updated before
    /// this returns.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), MapError> {
        let (width, height) = (width.max(1), height.max(1));
        if self.surface.dimensions() == (width, height) {
            return Ok(());
        }
        log::debug!(
            "Resizing map surface {:?} -> {}x{}",
            self.surface.dimensions(),
            width,
            height
        );

        self.projection.configure(width, height);
        self.camera.set_viewport(
            &mut self.state,
            Vec2::new(width as f32, height as f32),
            self.projection.world_bounds(self.config.world_lat_limit),
        );
        self.surface = Surface::new(width, height)?;
        self.rebuild_cache()?;
        self.state.scheduler.request(RedrawQuality::High);
        Ok(())
    }

    fn rebuild_cache(&mut self) -> Result<(), MapError> {
        self.renderer.rebuild_cache(
            &mut self.cache,
            &self.features,
            &self.projection,
            self.surface.dimensions(),
        )
    }

    fn cache_key(&self) -> CacheKey {
        CacheKey {
            dimensions: self.surface.dimensions(),
            generation: self.features.generation(),
        }
    }

    // --- Pointer input ---

    /// Returns `true` if the hovered country changed.
    pub fn pointer_moved(&mut self, pos: Pos2) -> bool {
        let view = MapView {
            transform: self.state.transform,
            projection: &self.projection,
            features: &self.features,
        };
        self.dispatcher.pointer_moved(&mut self.state, view, pos)
    }

    pub fn pointer_left(&mut self) {
        self.dispatcher.pointer_left(&mut self.state);
    }

    /// Handles a click; returns the newly selected country, if any.
    pub fn clicked(&mut self, pos: Pos2, now: Instant) -> Option<FeatureId> {
        let view = MapView {
            transform: self.state.transform,
            projection: &self.projection,
            features: &self.features,
        };
        self.dispatcher
            .clicked(&mut self.state, &mut self.camera, view, pos, now)
    }

    /// Deselects without moving the camera (e.g. the host closed its detail panel).
    pub fn clear_selection(&mut self) -> bool {
        self.dispatcher.clear_selection(&mut self.state)
    }

    /// Registers the listener notified when a click selects a new country.
    pub fn on_country_selected(
        &mut self,
        listener: impl FnMut(FeatureId, &CountryFeature) + 'static,
    ) {
        self.dispatcher.set_listener(Box::new(listener));
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.dispatcher.cursor_hint(&self.state)
    }

    // --- Gestures ---

    pub fn begin_gesture(&mut self) {
        self.camera.begin_gesture(&mut self.state);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.camera.pan_by(&mut self.state, delta);
    }

    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        self.camera.zoom_at(&mut self.state, anchor, factor);
    }

    /// Wheel zoom around `anchor`; positive `delta_y` zooms out.
    pub fn wheel(&mut self, anchor: Pos2, delta_y: f32) {
        self.camera.wheel(&mut self.state, anchor, delta_y);
    }

    pub fn end_gesture(&mut self) {
        self.camera.end_gesture(&mut self.state);
    }

    // --- Programmatic camera ---

    /// Animates back to the whole-world view.
    pub fn reset_view(&mut self, now: Instant) {
        self.camera.reset(&mut self.state, now);
    }

    /// Animates to a country without changing the selection.
    pub fn focus_on(&mut self, id: FeatureId, now: Instant) -> bool {
        let Some(feature) = self.features.get(id) else {
            log::warn!("Cannot focus {:?}: not in the current feature set", id);
            return false;
        };
        self.camera
            .focus(&mut self.state, id, feature, &self.projection, now)
    }

    // --- Display refresh ---

    /// One display refresh: advances any transition, then draws if a redraw
    /// is pending. Returns `true` if the surface was redrawn.
    pub fn frame(&mut self, now: Instant) -> bool {
        self.camera.tick(&mut self.state, now);

        let Some(quality) = self.state.scheduler.take() else {
            return false;
        };

        if !self.cache.is_valid(&self.cache_key()) {
            if let Err(e) = self.rebuild_cache() {
                log::error!("Render cache rebuild failed: {}", e);
            }
        }

        self.renderer.draw(
            &mut self.surface,
            &self.cache,
            self.state.transform,
            self.state.hovered,
            self.state.selected,
            quality,
        );
        true
    }

    /// Whether the host should schedule another [`frame`](Self::frame).
    pub fn needs_frame(&self) -> bool {
        self.state.scheduler.is_pending() || self.camera.animation().is_some()
    }

    // --- Accessors ---

    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    pub fn phase(&self) -> CameraPhase {
        self.state.phase
    }

    pub fn hovered(&self) -> Option<FeatureId> {
        self.state.hovered
    }

    pub fn selected(&self) -> Option<FeatureId> {
        self.state.selected
    }

    pub fn feature(&self, id: FeatureId) -> Option<&CountryFeature> {
        self.features.get(id)
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn stats(&self) -> &RenderStats {
        self.renderer.stats()
    }

    pub fn projection(&self) -> &MercatorProjection {
        &self.projection
    }
}
