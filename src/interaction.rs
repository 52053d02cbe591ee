//! Pointer events to hover and selection semantics.

use crate::camera::{CameraController, Transform};
use crate::geo::{locate, CountryFeature, FeatureId, FeatureSet, MercatorProjection};
use crate::state::EngineState;
use eframe::egui::Pos2;
use web_time::Instant;

/// Callback invoked once per newly selected country.
pub type SelectionListener = Box<dyn FnMut(FeatureId, &CountryFeature)>;

/// Cursor the host should show over the map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    /// A country is under the pointer and can be clicked.
    Pointer,
}

/// Read-only view of what a screen position resolves against.
#[derive(Debug, Clone, Copy)]
pub struct MapView<'a> {
    pub transform: Transform,
    pub projection: &'a MercatorProjection,
    pub features: &'a FeatureSet,
}

impl MapView<'_> {
    /// Country under a screen position: screen -> base -> lon/lat -> hit test.
    pub fn resolve(&self, pos: Pos2) -> Option<FeatureId> {
        let base = self.transform.invert(pos);
        let coord = self.projection.unproject(base)?;
        locate(coord, self.features)
    }
}

/// Turns raw pointer input into hover/selection changes.
#[derive(Default)]
pub struct InteractionDispatcher {
    listener: Option<SelectionListener>,
}

impl std::fmt::Debug for InteractionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionDispatcher")
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl InteractionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the selection listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: SelectionListener) {
        self.listener = Some(listener);
    }

    /// Updates hover. Returns `true` if the hovered country changed.
    pub fn pointer_moved(&mut self, state: &mut EngineState, view: MapView<'_>, pos: Pos2) -> bool {
        let hit = view.resolve(pos);
        if hit == state.hovered {
            return false;
        }
        state.hovered = hit;
        state.request_redraw();
        true
    }

    /// The pointer left the surface.
    pub fn pointer_left(&mut self, state: &mut EngineState) {
        if state.hovered.take().is_some() {
            state.request_redraw();
        }
    }

    /// Handles a click. Returns the newly selected country, if any.
    ///
    /// Clicking the current selection again does nothing; clicking the
    /// ocean clears the selection.
    pub fn clicked(
        &mut self,
        state: &mut EngineState,
        camera: &mut CameraController,
        view: MapView<'_>,
        pos: Pos2,
        now: Instant,
    ) -> Option<FeatureId> {
        let hit = state.hovered.or_else(|| view.resolve(pos));

        let Some(id) = hit else {
            if state.selected.take().is_some() {
                log::info!("Selection cleared");
            }
            state.request_redraw();
            return None;
        };
        if state.selected == Some(id) {
            return None;
        }
        let feature = view.features.get(id)?;

        state.selected = Some(id);
        log::info!("Selected {} ({:?})", feature.display_name(), id);
        if let Some(listener) = self.listener.as_mut() {
            listener(id, feature);
        }

        camera.focus(state, id, feature, view.projection, now);
        state.request_redraw();
        Some(id)
    }

    /// Programmatic deselect. Returns `true` if something was selected.
    pub fn clear_selection(&mut self, state: &mut EngineState) -> bool {
        if state.selected.take().is_none() {
            return false;
        }
        state.request_redraw();
        true
    }

    pub fn cursor_hint(&self, state: &EngineState) -> CursorHint {
        if state.hovered.is_some() {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::geo::{FeatureProperties, Geometry, Polygon};
    use crate::state::{CameraPhase, RedrawQuality};
    use eframe::egui::Vec2;
    use geo_types::Coord;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fixture {
        dispatcher: InteractionDispatcher,
        camera: CameraController,
        state: EngineState,
        projection: MercatorProjection,
        features: FeatureSet,
    }

    impl Fixture {
        fn new() -> Self {
            let projection = MercatorProjection::for_surface(800, 600);
            let square = CountryFeature::new(
                Geometry::Polygon(Polygon::new(
                    vec![
                        Coord { x: 0.0, y: 0.0 },
                        Coord { x: 20.0, y: 0.0 },
                        Coord { x: 20.0, y: 20.0 },
                        Coord { x: 0.0, y: 20.0 },
                    ],
                    vec![],
                )),
                FeatureProperties::named("Square"),
            );
            Self {
                dispatcher: InteractionDispatcher::new(),
                camera: CameraController::new(
                    &EngineConfig::default(),
                    Vec2::new(800.0, 600.0),
                    projection.world_bounds(85.0),
                ),
                state: EngineState::new(),
                projection,
                features: FeatureSet::new(vec![square], 1),
            }
        }

        fn view(&self) -> MapView<'_> {
            MapView {
                transform: self.state.transform,
                projection: &self.projection,
                features: &self.features,
            }
        }

        fn inside(&self) -> Pos2 {
            self.projection.project(Coord { x: 10.0, y: 10.0 })
        }

        fn outside(&self) -> Pos2 {
            self.projection.project(Coord { x: -100.0, y: -40.0 })
        }

        fn move_to(&mut self, pos: Pos2) -> bool {
            let view = MapView {
                transform: self.state.transform,
                projection: &self.projection,
                features: &self.features,
            };
            self.dispatcher.pointer_moved(&mut self.state, view, pos)
        }

        fn click(&mut self, pos: Pos2) -> Option<FeatureId> {
            let view = MapView {
                transform: self.state.transform,
                projection: &self.projection,
                features: &self.features,
            };
            self.dispatcher
                .clicked(&mut self.state, &mut self.camera, view, pos, Instant::now())
        }
    }

    #[test]
    fn test_hover_changes_request_redraw() {
        let mut fx = Fixture::new();

        assert!(fx.move_to(fx.inside()));
        assert_eq!(fx.state.hovered, Some(FeatureId::new(0)));
        assert_eq!(fx.dispatcher.cursor_hint(&fx.state), CursorHint::Pointer);
        assert_eq!(fx.state.scheduler.take(), Some(RedrawQuality::High));

        // Same country again: nothing to redraw.
        assert!(!fx.move_to(fx.inside() + Vec2::new(2.0, 2.0)));
        assert!(!fx.state.scheduler.is_pending());

        assert!(fx.move_to(fx.outside()));
        assert_eq!(fx.state.hovered, None);
        assert_eq!(fx.dispatcher.cursor_hint(&fx.state), CursorHint::Default);
    }

    #[test]
    fn test_pointer_outside_projection_clears_hover() {
        let mut fx = Fixture::new();
        fx.move_to(fx.inside());

        // Left of lon -180 at zoom 1.
        assert!(fx.move_to(Pos2::new(-50.0, 300.0)));
        assert_eq!(fx.state.hovered, None);

        fx.move_to(fx.inside());
        fx.dispatcher.pointer_left(&mut fx.state);
        assert_eq!(fx.state.hovered, None);
    }

    #[test]
    fn test_click_notifies_once_and_focuses() {
        let mut fx = Fixture::new();
        let notified = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notified);
        fx.dispatcher
            .set_listener(Box::new(move |id, feature: &CountryFeature| {
                sink.borrow_mut().push((id, feature.display_name().to_string()));
            }));

        let pos = fx.inside();
        assert_eq!(fx.click(pos), Some(FeatureId::new(0)));
        assert_eq!(fx.state.selected, Some(FeatureId::new(0)));
        assert_eq!(fx.state.phase, CameraPhase::Animating);
        assert_eq!(
            *notified.borrow(),
            vec![(FeatureId::new(0), "Square".to_string())]
        );

        // Re-click: no notification, no new transition, no redraw.
        fx.state.scheduler.take();
        let started = fx.camera.animation().map(|a| a.target());
        assert_eq!(fx.click(pos), None);
        assert_eq!(notified.borrow().len(), 1);
        assert_eq!(fx.camera.animation().map(|a| a.target()), started);
        assert!(!fx.state.scheduler.is_pending());
    }

    #[test]
    fn test_click_prefers_hover() {
        let mut fx = Fixture::new();
        fx.move_to(fx.inside());

        // The click position itself is ocean, but the hovered country wins.
        let pos = fx.outside();
        assert_eq!(fx.click(pos), Some(FeatureId::new(0)));
    }

    #[test]
    fn test_click_ocean_clears_selection() {
        let mut fx = Fixture::new();
        let pos = fx.inside();
        fx.click(pos);
        fx.state.scheduler.take();

        let ocean = fx.outside();
        assert_eq!(fx.click(ocean), None);
        assert_eq!(fx.state.selected, None);
        assert!(fx.state.scheduler.is_pending());
    }

    #[test]
    fn test_clear_selection() {
        let mut fx = Fixture::new();
        assert!(!fx.dispatcher.clear_selection(&mut fx.state));

        let pos = fx.inside();
        fx.click(pos);
        assert!(fx.dispatcher.clear_selection(&mut fx.state));
        assert_eq!(fx.state.selected, None);
    }

    #[test]
    fn test_resolve_under_zoom() {
        let mut fx = Fixture::new();
        fx.camera
            .zoom_at(&mut fx.state, Pos2::new(400.0, 300.0), 4.0);

        let screen = fx.state.transform.apply(fx.inside());
        assert_eq!(fx.view().resolve(screen), Some(FeatureId::new(0)));
    }
}
