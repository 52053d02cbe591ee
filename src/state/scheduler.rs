//! Redraw request coalescing.

/// Quality of the next draw.
///
/// `Low` stretches the cached raster; `High` redraws vectors. When several
/// requests coalesce, `High` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RedrawQuality {
    Low,
    High,
}

/// Single pending-redraw flag.
///
/// Handlers call [`request`](Self::request); the display refresh calls
/// [`take`](Self::take) once. Any number of requests between two refreshes
/// result in one draw.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: Option<RedrawQuality>,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a redraw as pending. Returns `true` if none was pending before.
    pub fn request(&mut self, quality: RedrawQuality) -> bool {
        match self.pending {
            Some(current) => {
                self.pending = Some(current.max(quality));
                false
            }
            None => {
                self.pending = Some(quality);
                true
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the pending request, if any.
    pub fn take(&mut self) -> Option<RedrawQuality> {
        self.pending.take()
    }
}
