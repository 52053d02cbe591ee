//! Centralized color constants for the map and the host overlay.

use eframe::egui::Color32;

/// Colors for the map surface.
pub mod map {
    use super::Color32;

    /// Ocean background (#1e293b).
    pub const OCEAN: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
    /// Country fill (#334155).
    pub const LAND: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);
    /// Country border (#475569).
    pub const BORDER: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);
    /// Hovered country fill, same tone as the border.
    pub const HOVER_FILL: Color32 = Color32::from_rgb(0x47, 0x55, 0x69);
    /// Selected country fill (#38bdf8).
    pub const SELECTED_FILL: Color32 = Color32::from_rgb(0x38, 0xbd, 0xf8);
    /// Outline of the hovered or selected country (#94a3b8).
    pub const HIGHLIGHT_STROKE: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);
}

/// Colors for the host's labels.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
    /// Emphasized color for the selected country name.
    pub const ACTIVE: Color32 = Color32::from_rgb(0x38, 0xbd, 0xf8);
}

/// Converts an egui color to its `tiny_skia` equivalent.
pub fn to_skia(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}
