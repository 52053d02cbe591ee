//! Error type shared by the map engine.

/// Errors that can occur while setting up or feeding the map engine.
///
/// Pointer inversion outside the projection, empty feature sets and
/// malformed rings are not errors; they resolve to "no country".
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// A raster of the given size could not be allocated.
    SurfaceAllocation { width: u32, height: u32 },
    /// Country geometry could not be parsed.
    GeoJson(String),
    /// The engine configuration was unreadable or inconsistent.
    Config(String),
    /// A file could not be read.
    Io(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::SurfaceAllocation { width, height } => {
                write!(f, "Failed to allocate {}x{} surface", width, height)
            }
            MapError::GeoJson(msg) => write!(f, "GeoJSON error: {}", msg),
            MapError::Config(msg) => write!(f, "Configuration error: {}", msg),
            MapError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e.to_string())
    }
}
