//! Top bar UI: app title, selected country, and view controls.

use crate::SelectionInfo;
use eframe::egui::{self, Color32, RichText};
use web_time::Instant;
use world_map::render::colors::ui as colors;
use world_map::MapEngine;

pub fn render_top_bar(ctx: &egui::Context, engine: &mut MapEngine, selection: Option<&SelectionInfo>) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("World Map")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                if ui.button("Reset view").clicked() {
                    engine.reset_view(Instant::now());
                }

                ui.separator();

                match selection {
                    Some(info) => {
                        ui.label(RichText::new("Selected:").size(12.0).color(colors::LABEL));
                        ui.label(
                            RichText::new(&info.name)
                                .strong()
                                .size(13.0)
                                .color(colors::ACTIVE),
                        );
                        if let Some(code) = &info.iso_a2 {
                            ui.label(RichText::new(code).size(12.0).color(colors::VALUE));
                        }
                        if ui.small_button("Clear").clicked() {
                            engine.clear_selection();
                        }
                    }
                    None => {
                        ui.label(
                            RichText::new("Click a country to zoom in")
                                .size(13.0)
                                .color(Color32::GRAY),
                        );
                    }
                }
            });
        });
}
