//! Visual node transform.
//!
//! [`Transform`] is the position, rotation and scale of a renderer node. UI
//! elements only ever touch the x/y components, through
//! [`Transform::set_position_2d`] and [`Transform::set_scale_2d`].

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and per-axis scale of a visual node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// Position relative to the parent node.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform at `position` with default rotation and scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Overwrite x and y of the position, keeping z.
    pub fn set_position_2d(&mut self, position: Vec2) {
        self.position.x = position.x;
        self.position.y = position.y;
    }

    /// Overwrite x and y of the scale, keeping z.
    pub fn set_scale_2d(&mut self, scale: Vec2) {
        self.scale.x = scale.x;
        self.scale.y = scale.y;
    }

    /// Translate the transform by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.position += offset;
        self
    }

    /// Apply a uniform scale factor.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
