//! Orbit camera controls
//!
//! Controls:
//! - Left mouse drag: orbit around the target
//! - Mouse wheel: dolly towards / away from the target
//!
//! Input is accumulated as events arrive and applied once per frame by
//! [`OrbitControls::update`].

use std::f32::consts::PI;

use atomviz_math::Vec3;
use winit::event::{ElementState, MouseButton};

/// Keeps the camera from flipping over the poles
const POLAR_EPSILON: f32 = 1e-4;

/// Orbit controller for handling input
pub struct OrbitControls {
    // Mouse state
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,

    // Configuration
    pub enabled: bool,
    /// Radians of orbit per pixel of drag
    pub rotate_speed: f32,
    /// Distance multiplier per wheel line (< 1 zooms in on scroll up)
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            dragging: false,
            last_cursor: None,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 0.0,

            enabled: true,
            rotate_speed: 0.005,
            zoom_speed: 0.95,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Process an absolute cursor position
    ///
    /// Deltas between consecutive positions orbit the camera while dragging.
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_cursor {
            if self.dragging {
                self.process_drag((x - last_x) as f32, (y - last_y) as f32);
            }
        }
        self.last_cursor = Some((x, y));
    }

    /// Process a drag delta in pixels
    pub fn process_drag(&mut self, delta_x: f32, delta_y: f32) {
        // Dragging right swings the camera left around the target
        self.pending_azimuth -= delta_x * self.rotate_speed;
        self.pending_polar -= delta_y * self.rotate_speed;
    }

    /// Process wheel input in lines (positive = scroll up = zoom in)
    pub fn process_scroll(&mut self, lines: f32) {
        self.pending_zoom += lines;
    }

    /// Check if the left button is held
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns true if the camera moved.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C) -> bool {
        let azimuth = std::mem::take(&mut self.pending_azimuth);
        let polar = std::mem::take(&mut self.pending_polar);
        let zoom = std::mem::take(&mut self.pending_zoom);

        if !self.enabled || (azimuth == 0.0 && polar == 0.0 && zoom == 0.0) {
            return false;
        }

        let target = camera.target();
        let offset = camera.position() - target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }

        // Spherical coordinates around the target, Y up
        let theta = offset.x.atan2(offset.z) + azimuth;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + polar)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        // max/min instead of clamp: never panics on inverted or NaN limits
        let radius = (radius * self.zoom_speed.powf(zoom))
            .max(self.min_distance)
            .min(self.max_distance);

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.set_position(target + new_offset);
        true
    }

    /// Drop any accumulated input
    pub fn reset(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_zoom = 0.0;
    }

    /// Builder: set orbit speed in radians per pixel
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set zoom factor per wheel line
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: clamp the camera distance from the target
    ///
    /// The pair is ordered, so `(max, min)` sets the same limits.
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.min(max);
        self.max_distance = max.max(min);
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    fn position(&self) -> Vec3;
    fn target(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    struct TestCamera {
        position: Vec3,
        target: Vec3,
    }

    impl CameraControl for TestCamera {
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

    fn camera() -> TestCamera {
        TestCamera {
            position: Vec3::new(16.0, 10.0, 12.0),
            target: Vec3::ZERO,
        }
    }

    #[test]
    fn test_update_without_input_is_noop() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        assert!(!controls.update(&mut cam));
        assert_eq!(cam.position, Vec3::new(16.0, 10.0, 12.0));
    }

    #[test]
    fn test_drag_preserves_distance() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        let distance = cam.position.length();

        controls.process_drag(120.0, -40.0);
        assert!(controls.update(&mut cam));

        assert!((cam.position.length() - distance).abs() < EPSILON);
        assert_ne!(cam.position, Vec3::new(16.0, 10.0, 12.0));
    }

    #[test]
    fn test_horizontal_drag_keeps_height() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        controls.process_drag(200.0, 0.0);
        controls.update(&mut cam);
        assert!((cam.position.y - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_cursor_moves_only_orbit_while_dragging() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();

        controls.process_cursor_moved(10.0, 10.0);
        controls.process_cursor_moved(50.0, 10.0);
        assert!(!controls.update(&mut cam));

        controls.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controls.is_dragging());
        controls.process_cursor_moved(90.0, 10.0);
        assert!(controls.update(&mut cam));

        controls.process_mouse_button(MouseButton::Left, ElementState::Released);
        controls.process_cursor_moved(150.0, 10.0);
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn test_scroll_zooms_and_clamps() {
        let mut controls = OrbitControls::new().with_distance_limits(5.0, 30.0);
        let mut cam = camera();
        let start = cam.position.length();

        controls.process_scroll(1.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - start * 0.95).abs() < EPSILON);

        controls.process_scroll(200.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 5.0).abs() < EPSILON);

        controls.process_scroll(-500.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_distance_limits_builder_orders_pair() {
        let controls = OrbitControls::new().with_distance_limits(30.0, 5.0);
        assert_eq!(controls.min_distance, 5.0);
        assert_eq!(controls.max_distance, 30.0);
    }

    #[test]
    fn test_bad_distance_limits_do_not_panic() {
        let mut controls = OrbitControls::new();
        controls.min_distance = 100.0;
        controls.max_distance = 1.0;
        let mut cam = camera();
        controls.process_scroll(1.0);
        assert!(controls.update(&mut cam));
        assert!(cam.position.length().is_finite());

        controls.min_distance = f32::NAN;
        controls.max_distance = f32::NAN;
        controls.process_scroll(-1.0);
        assert!(controls.update(&mut cam));
        assert!(cam.position.length().is_finite());
    }

    #[test]
    fn test_polar_angle_clamped() {
        let mut controls = OrbitControls::new();
        let mut cam = camera();
        // Drag far upwards: camera must stop short of the pole, not flip over
        controls.process_drag(0.0, 100_000.0);
        controls.update(&mut cam);
        let dir = cam.position.normalize();
        assert!(dir.y > 0.99);
        // Still on the starting side of the pole
        assert!(cam.position.x > 0.0 && cam.position.z > 0.0);
    }

    #[test]
    fn test_disabled_controls_discard_input() {
        let mut controls = OrbitControls::new();
        controls.enabled = false;
        let mut cam = camera();
        controls.process_drag(100.0, 0.0);
        assert!(!controls.update(&mut cam));
        controls.enabled = true;
        assert!(!controls.update(&mut cam));
    }
}
