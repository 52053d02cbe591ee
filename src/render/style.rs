//! Map paint style.

use super::colors::{self, map};
use eframe::egui::Color32;
use tiny_skia::{Paint, Shader};

/// Colors and stroke widths used by the renderer.
///
/// Widths are in screen pixels; the renderer divides them by the zoom
/// factor so borders stay thin when zoomed in.
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    pub ocean: Color32,
    pub land: Color32,
    pub border: Color32,
    pub border_width: f32,
    pub hover_fill: Color32,
    pub selected_fill: Color32,
    pub highlight_stroke: Color32,
    pub highlight_width: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            ocean: map::OCEAN,
            land: map::LAND,
            border: map::BORDER,
            border_width: 0.5,
            hover_fill: map::HOVER_FILL,
            selected_fill: map::SELECTED_FILL,
            highlight_stroke: map::HIGHLIGHT_STROKE,
            highlight_width: 1.0,
        }
    }
}

/// Anti-aliased solid paint.
pub(crate) fn solid(color: Color32) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(colors::to_skia(color)),
        anti_alias: true,
        ..Default::default()
    }
}
