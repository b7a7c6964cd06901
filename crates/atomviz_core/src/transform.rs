//! 3D Transform (position, rotation, scale)
//!
//! Rotation is stored as Euler angles so animations can accumulate onto a
//! single axis (`rotation.y += 0.002`) without drifting the other two.

use atomviz_math::{EulerRot, Mat4, Quat, Vec3};

/// A 3D transform with position, XYZ Euler rotation, and uniform scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    /// Position relative to the parent node
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Rotation as a quaternion
    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local matrix: scale, then rotate, then translate
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.position)
    }

    /// Transform a point from local space to parent space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.quat() * (p * self.scale) + self.position
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Add Euler angle deltas (radians) to the rotation
    ///
    /// Angles are accumulated as-is and never wrapped.
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }
}
