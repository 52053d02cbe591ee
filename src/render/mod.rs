//! Map rendering.
//!
//! Drawing happens on the CPU into a `tiny_skia` pixmap ([`Surface`]); the
//! host uploads it as a texture. A [`RenderCache`] keeps a pre-rendered
//! raster and projected paths so motion frames stay cheap.

mod cache;
pub mod colors;
mod renderer;
mod style;
mod surface;

pub use cache::{feature_path, CacheKey, RenderCache};
pub use renderer::MapRenderer;
pub use style::MapStyle;
pub use surface::Surface;
