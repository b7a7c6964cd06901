//! Camera input handling
//!
//! This crate provides orbit-style camera controls: drag to orbit around a
//! target, scroll to dolly in and out.

mod orbit_controls;

pub use orbit_controls::{OrbitControls, CameraControl};
