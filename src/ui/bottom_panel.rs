//! Bottom panel UI: camera state and render statistics.

use eframe::egui::{self, RichText};
use world_map::render::colors::ui as colors;
use world_map::MapEngine;

pub fn render_bottom_panel(ctx: &egui::Context, engine: &MapEngine) {
    egui::TopBottomPanel::bottom("bottom_panel")
        .exact_height(24.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let transform = engine.transform();
                stat(ui, "zoom", format!("{:.2}x", transform.k));
                stat(ui, "phase", format!("{:?}", engine.phase()));
                stat(ui, "countries", engine.features().len().to_string());

                ui.separator();

                ui.label(
                    RichText::new(engine.stats().format_summary())
                        .size(11.0)
                        .color(colors::VALUE),
                );
            });
        });
}

fn stat(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(RichText::new(format!("{}:", label)).size(11.0).color(colors::LABEL));
    ui.label(RichText::new(value).size(11.0).color(colors::VALUE));
}
