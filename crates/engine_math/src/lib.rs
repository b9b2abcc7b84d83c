//! # engine_math
//!
//! Math types for the engine. Re-exports [`glam`] for linear algebra and
//! defines the spatial types shared by the renderer and the UI layer:
//! [`Transform`], [`Camera`] and [`Viewport`].

pub mod camera;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use camera::{Camera, Viewport};
pub use transform::Transform;
