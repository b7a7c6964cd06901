//! Perspective camera
//!
//! A position/target/up camera with a cached projection matrix. The
//! projection only changes when [`PerspectiveCamera::update_projection_matrix`]
//! is called, so changing `fov` or `aspect` has no effect until then.

use atomviz_input::CameraControl;
use atomviz_math::{Mat4, Vec3};

/// Perspective camera looking at a target point
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    projection: Mat4,

    // Pose restored by reset()
    home_position: Vec3,
    home_target: Vec3,
}

impl PerspectiveCamera {
    /// Create a camera at the origin looking down -Z
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
            home_position: Vec3::ZERO,
            home_target: Vec3::NEG_Z,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Builder: place the camera and make that its home pose
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.home_position = position;
        self
    }

    /// Builder: aim the camera and make that its home target
    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self.home_target = target;
        self
    }

    /// Recompute the projection from fov, aspect, near and far
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    /// Set the aspect ratio and refresh the projection
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Return to the pose the camera was built with
    pub fn reset(&mut self) {
        self.position = self.home_position;
        self.target = self.home_target;
    }
}

impl CameraControl for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
