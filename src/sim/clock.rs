//! Frame clock
//!
//! Turns wall-clock elapsed milliseconds into a monotonic timestamp and a
//! frame delta normalised to one nominal 60 Hz frame.

use crate::consts::{MAX_FRAME_DELTA, NOMINAL_FRAME_MS};

/// Monotonic simulation clock (milliseconds since reset)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    now_ms: f64,
}

impl FrameClock {
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advance by `elapsed_ms` and return the frame delta for this step
    ///
    /// Negative or non-finite inputs count as zero elapsed time.
    pub fn advance(&mut self, elapsed_ms: f64) -> f32 {
        let elapsed = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            elapsed_ms
        } else {
            0.0
        };
        self.now_ms += elapsed;
        frame_delta(elapsed)
    }
}

/// Nominal-frame delta for `elapsed_ms`, clamped after stalls
#[inline]
pub fn frame_delta(elapsed_ms: f64) -> f32 {
    ((elapsed_ms / NOMINAL_FRAME_MS) as f32).min(MAX_FRAME_DELTA)
}
