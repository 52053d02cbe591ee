//! The engine's drawing target.

use crate::error::MapError;
use eframe::egui::{Color32, ColorImage, Vec2};
use tiny_skia::Pixmap;

/// An RGBA raster the size of the host surface.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocates a surface. Zero dimensions are treated as 1.
    pub fn new(width: u32, height: u32) -> Result<Self, MapError> {
        let pixmap = allocate(width, height)?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Color at a pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixmap
            .pixel(x, y)
            .map(|c| Color32::from_rgba_premultiplied(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Copies the pixels into an image ready for texture upload.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }
}

/// Allocates a pixmap, clamping each dimension to at least 1.
pub(crate) fn allocate(width: u32, height: u32) -> Result<Pixmap, MapError> {
    let (w, h) = (width.max(1), height.max(1));
    Pixmap::new(w, h).ok_or(MapError::SurfaceAllocation {
        width: w,
        height: h,
    })
}
