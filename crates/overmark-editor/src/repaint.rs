//! Repaint request coalescing.

use std::time::{Duration, Instant};

/// How long a pending request may wait before the timer fallback is
/// due, for hosts without an animation-frame callback.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(32);

/// Collapses repaint requests between frames.
///
/// Any number of mutations inside one frame produce at most one armed
/// frame callback: the first [`RepaintScheduler::request`] returns true
/// (arm the callback), the rest return false until the frame runs.
#[derive(Debug, Clone, Default)]
pub struct RepaintScheduler {
    scheduled: bool,
    fallback_at: Option<Instant>,
}

impl RepaintScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a repaint. Returns true when the caller should arm a
    /// frame callback; false when one is already pending.
    pub fn request(&mut self) -> bool {
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        self.fallback_at = Some(Instant::now() + FALLBACK_DELAY);
        true
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// A frame is running: clear the pending flag and report whether a
    /// paint is owed.
    pub fn begin_frame(&mut self) -> bool {
        let owed = self.scheduled;
        self.scheduled = false;
        self.fallback_at = None;
        owed
    }

    /// Timer fallback: true once a pending request has waited past
    /// [`FALLBACK_DELAY`] without a frame callback firing.
    pub fn fallback_due(&self, now: Instant) -> bool {
        self.scheduled && self.fallback_at.is_some_and(|at| now >= at)
    }
}
