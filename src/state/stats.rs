//! Render statistics for the host status line.

/// Counters updated by the renderer and the render cache.
#[derive(Debug, Default, Clone)]
pub struct RenderStats {
    /// Total draws performed.
    pub draws: u64,
    /// Draws that re-filled every country as vectors.
    pub vector_draws: u64,
    /// Draws that stretched the cached raster.
    pub raster_draws: u64,
    /// Render cache rebuilds.
    pub cache_builds: u64,
    /// Duration of the most recent draw in milliseconds.
    pub last_draw_ms: Option<f64>,
    /// Duration of the most recent cache rebuild in milliseconds.
    pub last_cache_build_ms: Option<f64>,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format for display (e.g., "draws: 12 (9 vector, 3 raster) | last: 4ms").
    pub fn format_summary(&self) -> String {
        let mut parts = vec![format!(
            "draws: {} ({} vector, {} raster)",
            self.draws, self.vector_draws, self.raster_draws
        )];

        if let Some(ms) = self.last_draw_ms {
            parts.push(format!("last: {:.0}ms", ms));
        }
        if let Some(ms) = self.last_cache_build_ms {
            parts.push(format!("cache: {:.0}ms", ms));
        }

        parts.join(" | ")
    }
}
