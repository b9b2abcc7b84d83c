//! Camera and viewport state.
//!
//! Both are installed as world resources. The frame loop keeps
//! [`Camera::ratio`] in sync with the [`Viewport`] whenever the window is
//! resized.

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// The active camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Viewport width divided by height.
    pub ratio: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Camera {
    /// Create a camera for a viewport of the given pixel size.
    #[must_use]
    pub fn new(viewport: Viewport, fov: f32) -> Self {
        Self {
            ratio: viewport.ratio(),
            fov,
        }
    }

    /// Perspective projection for this camera.
    #[must_use]
    pub fn projection(&self, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.ratio, near, far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            fov: 90.0,
        }
    }
}

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height. A zero height yields 1.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}
