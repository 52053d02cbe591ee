//! UI modules for the World Map viewer.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, selected country, and view controls
//! - Central canvas: The map surface
//! - Bottom panel: Camera and render statistics

mod bottom_panel;
mod canvas;
mod top_bar;

pub use bottom_panel::render_bottom_panel;
pub use canvas::{render_canvas, MapTexture};
pub use top_bar::render_top_bar;
