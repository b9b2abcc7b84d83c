//! Frame timing resource.

use std::time::Duration;

/// Per-frame timing, installed as a world resource by the tick loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Duration of the last frame in seconds, unscaled.
    pub delta: f32,
    /// Seconds since the loop started, unscaled.
    pub elapsed: f64,
    /// Multiplier applied by [`FrameTime::scaled_delta`].
    pub scale: f32,
    /// Number of frames completed.
    pub frames: u64,
}

impl FrameTime {
    /// Record the end of a frame that took `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta.as_secs_f32();
        self.elapsed += delta.as_secs_f64();
        self.frames += 1;
    }

    /// Last frame duration multiplied by the time scale.
    #[must_use]
    pub fn scaled_delta(&self) -> f32 {
        self.delta * self.scale
    }

    /// Frames per second implied by the last frame duration.
    #[must_use]
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 { 1.0 / self.delta } else { 0.0 }
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            scale: 1.0,
            frames: 0,
        }
    }
}
