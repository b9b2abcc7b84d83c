//! UI rectangle math.
//!
//! A [`Rect`] lives in UI space: clip space with the shorter window axis
//! spanning `[-1, 1]`. `width` and `height` are half-extents, so the hit area
//! is `(x - width, x + width) × (y - height, y + height)`.
//!
//! [`aspect_scale`] maps between UI space and the renderer's clip space for a
//! given camera aspect ratio.

use engine_math::{Vec2, Viewport};
use serde::{Deserialize, Serialize};

/// Which coordinate space a rectangle is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    /// Aspect-ratio corrected: a square rect stays square on any window.
    #[default]
    Camera,
    /// Raw clip space, stretched with the window.
    Clip,
}

/// Position, half-size and origin of a UI element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    /// Anchor as a fraction of the size; `(0, 0)` anchors at the centre.
    pub origin: Vec2,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            x,
            y,
            origin: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Origin offset in UI units: `(width * ox, height * oy)`.
    #[must_use]
    pub fn origin_offset(&self) -> Vec2 {
        Vec2::new(self.width * self.origin.x, self.height * self.origin.y)
    }

    /// Scale to write to the element's visual.
    #[must_use]
    pub fn visual_scale(&self, scale: Vec2) -> Vec2 {
        Vec2::new(self.width, self.height) / scale.y
    }

    /// Position to write to the element's visual.
    #[must_use]
    pub fn visual_position(&self, scale: Vec2) -> Vec2 {
        (Vec2::new(self.x, self.y) - self.origin_offset()) / scale.y
    }

    /// Map a pointer position in window pixels into this rect's UI space.
    #[must_use]
    pub fn pointer_to_ui(&self, pixels: Vec2, viewport: Viewport, scale: Vec2) -> Vec2 {
        let w = viewport.width.max(1) as f32;
        let h = viewport.height.max(1) as f32;
        let offset = self.origin_offset();
        Vec2::new(
            ((pixels.x / w) * 2.0 - 1.0) * scale.x + offset.x,
            -((pixels.y / h) * 2.0 - 1.0) * scale.y + offset.y,
        )
    }

    /// Inverse of [`Rect::pointer_to_ui`]: the window pixel that maps to
    /// `point`.
    #[must_use]
    pub fn ui_to_pointer(&self, point: Vec2, viewport: Viewport, scale: Vec2) -> Vec2 {
        let w = viewport.width.max(1) as f32;
        let h = viewport.height.max(1) as f32;
        let clip = (point - self.origin_offset()) / scale;
        Vec2::new((clip.x + 1.0) * 0.5 * w, (1.0 - clip.y) * 0.5 * h)
    }

    /// Returns `true` if `point` lies strictly inside the rect.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x - self.width
            && point.x < self.x + self.width
            && point.y > self.y - self.height
            && point.y < self.y + self.height
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Per-axis scale between UI space and clip space.
///
/// Wide windows (`ratio >= 1`) stretch x by the ratio; tall windows stretch y
/// by its inverse. [`Space::Clip`] is never corrected.
#[must_use]
pub fn aspect_scale(ratio: f32, space: Space) -> Vec2 {
    match space {
        Space::Clip => Vec2::ONE,
        Space::Camera if ratio < 1.0 => Vec2::new(1.0, 1.0 / ratio),
        Space::Camera => Vec2::new(ratio, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_aspect_scale() {
        assert_eq!(aspect_scale(2.0, Space::Camera), Vec2::new(2.0, 1.0));
        assert_eq!(aspect_scale(0.5, Space::Camera), Vec2::new(1.0, 2.0));
        assert_eq!(aspect_scale(1.0, Space::Camera), Vec2::ONE);
        assert_eq!(aspect_scale(0.5, Space::Clip), Vec2::ONE);
    }

    #[test]
    fn test_visual_transform_on_tall_window() {
        let rect = Rect::new(0.5, 0.25, 0.2, 0.1).with_origin(Vec2::new(0.5, 0.5));
        let scale = aspect_scale(0.5, Space::Camera);
        assert!(close(rect.visual_scale(scale), Vec2::new(0.1, 0.05)));
        assert!(close(rect.visual_position(scale), Vec2::new(0.2, 0.1)));
    }

    #[test]
    fn test_window_centre_maps_to_origin() {
        let rect = Rect::new(0.0, 0.0, 0.1, 0.1);
        let point = rect.pointer_to_ui(Vec2::new(400.0, 300.0), Viewport::new(800, 600), Vec2::ONE);
        assert!(close(point, Vec2::ZERO));
    }

    #[test]
    fn test_pointer_y_axis_points_up() {
        let rect = Rect::new(0.0, 0.0, 0.1, 0.1);
        let top_left = rect.pointer_to_ui(Vec2::ZERO, Viewport::new(100, 100), Vec2::ONE);
        assert!(close(top_left, Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn test_ui_to_pointer_inverts_mapping() {
        let rect = Rect::new(0.3, -0.2, 0.1, 0.1).with_origin(Vec2::new(0.5, -0.5));
        let viewport = Viewport::new(1280, 720);
        let scale = aspect_scale(viewport.ratio(), Space::Camera);
        let pixels = rect.ui_to_pointer(Vec2::new(0.3, -0.2), viewport, scale);
        assert!(close(rect.pointer_to_ui(pixels, viewport, scale), Vec2::new(0.3, -0.2)));
    }

    #[test]
    fn test_contains_is_strict() {
        let rect = Rect::new(0.0, 0.0, 0.1, 0.1);
        assert!(rect.contains(Vec2::ZERO));
        assert!(rect.contains(Vec2::new(0.099, -0.099)));
        assert!(!rect.contains(Vec2::new(0.1, 0.0)));
        assert!(!rect.contains(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_rect_deserializes_with_defaults() {
        let rect: Rect = serde_json::from_str(r#"{ "x": 0.25 }"#).unwrap();
        assert_eq!(rect.x, 0.25);
        assert_eq!(rect.width, 1.0);
        assert_eq!(rect.origin, Vec2::ZERO);
    }
}
