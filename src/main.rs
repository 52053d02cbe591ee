#![warn(clippy::all)]

//! World Map - an interactive country map viewer.
//!
//! Usage: `world-map [countries.geojson] [config.json]`
//!
//! Hover highlights a country, a click selects it and zooms to it, drag pans
//! and the wheel zooms around the pointer.

mod ui;

use eframe::egui;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use world_map::{load_features_from_geojson, CountryFeature, EngineConfig, MapEngine, MapError};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let geojson_path = args.next();
    let config_path = args.next();

    let config = match config_path {
        Some(path) => EngineConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring config {}: {}", path, e);
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };

    let features = match geojson_path {
        Some(path) => read_countries(&path).unwrap_or_else(|e| {
            log::error!("Failed to load {}: {}", path, e);
            Vec::new()
        }),
        None => {
            log::warn!("No GeoJSON file given; starting with an empty map");
            Vec::new()
        }
    };

    eframe::run_native(
        "World Map",
        eframe::NativeOptions::default(),
        Box::new(move |cc| Ok(Box::new(MapApp::new(cc, config, features)?))),
    )
}

fn read_countries(path: impl AsRef<Path>) -> Result<Vec<CountryFeature>, MapError> {
    let text = std::fs::read_to_string(path)?;
    load_features_from_geojson(&text)
}

/// Last selection reported by the engine's listener.
#[derive(Debug, Clone, Default)]
pub struct SelectionInfo {
    pub name: String,
    pub iso_a2: Option<String>,
}

pub struct MapApp {
    engine: MapEngine,
    texture: ui::MapTexture,
    selection: Rc<RefCell<Option<SelectionInfo>>>,
}

impl MapApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: EngineConfig,
        features: Vec<CountryFeature>,
    ) -> Result<Self, MapError> {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut engine = MapEngine::new(config)?;
        engine.set_features(features)?;

        let selection = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selection);
        engine.on_country_selected(move |_, feature| {
            *sink.borrow_mut() = Some(SelectionInfo {
                name: feature.display_name().to_string(),
                iso_a2: feature.properties().iso_a2.clone(),
            });
        });

        Ok(Self {
            engine,
            texture: ui::MapTexture::new(),
            selection,
        })
    }
}

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The engine drops its selection when the host clears it, so mirror that.
        if self.engine.selected().is_none() {
            self.selection.borrow_mut().take();
        }

        // Side and top/bottom panels must be rendered before CentralPanel
        ui::render_top_bar(ctx, &mut self.engine, self.selection.borrow().as_ref());
        ui::render_bottom_panel(ctx, &self.engine);
        ui::render_canvas(ctx, &mut self.engine, &mut self.texture);
    }
}
