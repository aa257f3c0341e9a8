//! Input seam.
//!
//! The engine only needs to know whether the user asked to quit.

/// Event source polled once at the start of every frame.
pub trait InputSource {
    /// Drains pending events and returns true if quit was requested.
    ///
    /// Must return within one frame's budget.
    fn poll(&mut self) -> bool;
}

/// Requests quit on a fixed frame, or never.
///
/// Quit is reported when the last allowed frame is polled; that frame still
/// completes, so exactly `frames` frames run.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameLimit {
    limit: Option<u64>,
    polled: u64,
}

impl FrameLimit {
    /// Quits after `frames` frames. Zero behaves like one.
    #[must_use]
    pub const fn new(frames: u64) -> Self {
        Self {
            limit: Some(frames),
            polled: 0,
        }
    }

    /// Never quits.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            limit: None,
            polled: 0,
        }
    }

    /// Frames polled so far.
    #[inline]
    #[must_use]
    pub const fn polled(&self) -> u64 {
        self.polled
    }
}

impl InputSource for FrameLimit {
    fn poll(&mut self) -> bool {
        self.polled += 1;
        self.limit.is_some_and(|limit| self.polled >= limit)
    }
}
