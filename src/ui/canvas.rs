//! Central canvas UI: the map surface and its pointer input.

use eframe::egui::{
    self, pos2, Color32, ColorImage, CursorIcon, Pos2, Rect, Sense, TextureHandle, TextureOptions,
};
use web_time::Instant;
use world_map::{CursorHint, MapEngine};

/// The engine surface uploaded as an egui texture.
///
/// Re-uploaded only on frames where the engine actually drew.
#[derive(Default)]
pub struct MapTexture {
    texture: Option<TextureHandle>,
}

impl MapTexture {
    pub fn new() -> Self {
        Self { texture: None }
    }

    /// Update the texture with a freshly drawn surface.
    pub fn update(&mut self, ctx: &egui::Context, image: ColorImage) {
        let options = TextureOptions {
            magnification: egui::TextureFilter::Linear,
            minification: egui::TextureFilter::Linear,
            ..Default::default()
        };

        match &mut self.texture {
            Some(texture) => texture.set(image, options),
            None => self.texture = Some(ctx.load_texture("map_surface", image, options)),
        }
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }
}

pub fn render_canvas(ctx: &egui::Context, engine: &mut MapEngine, texture: &mut MapTexture) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;
            let ppp = ctx.pixels_per_point();

            // The surface is sized in physical pixels; the texture is painted
            // back into the rect in points.
            let (width, height) = surface_size(rect, ppp);
            if let Err(e) = engine.resize(width, height) {
                log::error!("Failed to resize map: {}", e);
            }

            let now = Instant::now();
            handle_canvas_interaction(ctx, &response, rect, ppp, engine, now);

            if engine.frame(now) {
                texture.update(ctx, engine.surface().to_color_image());
            }

            if let Some(tex) = texture.texture() {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(tex.id(), rect, uv, Color32::WHITE);
            }

            if response.dragged() {
                ctx.set_cursor_icon(CursorIcon::Grabbing);
            } else if engine.cursor_hint() == CursorHint::Pointer {
                ctx.set_cursor_icon(CursorIcon::PointingHand);
            }

            if engine.needs_frame() {
                ctx.request_repaint();
            }
        });
}

/// Physical pixel size of a canvas rect given in points.
fn surface_size(rect: Rect, pixels_per_point: f32) -> (u32, u32) {
    let size = rect.size() * pixels_per_point;
    (size.x.round() as u32, size.y.round() as u32)
}

/// Converts a screen position in points to surface pixels.
fn to_surface(pos: Pos2, rect: Rect, pixels_per_point: f32) -> Pos2 {
    pos2(
        (pos.x - rect.min.x) * pixels_per_point,
        (pos.y - rect.min.y) * pixels_per_point,
    )
}

fn handle_canvas_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    rect: Rect,
    ppp: f32,
    engine: &mut MapEngine,
    now: Instant,
) {
    // Engine positions are surface pixels from the top-left corner
    let local = |pos: Pos2| to_surface(pos, rect, ppp);

    match response.hover_pos() {
        Some(pos) => {
            engine.pointer_moved(local(pos));
        }
        None => engine.pointer_left(),
    }

    // Dragging pans
    if response.drag_started() {
        engine.begin_gesture();
    }
    if response.dragged() {
        engine.pan_by(response.drag_delta() * ppp);
    }
    if response.drag_stopped() {
        engine.end_gesture();
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            engine.clicked(local(pos), now);
        }
    }

    // Scrolling zooms around the cursor; egui reports scroll-up as positive
    if response.hovered() {
        let scroll_delta = ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            if let Some(pos) = response.hover_pos() {
                engine.wheel(local(pos), -scroll_delta.y);
            }
        }
    }
}
