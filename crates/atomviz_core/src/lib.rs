//! Core types for atomviz scenes
//!
//! This crate provides the retained scene graph the animations mutate and the
//! renderer draws:
//!
//! - [`Transform3D`] - Position, Euler rotation, and scale
//! - [`Color`] - RGB color parsed from CSS-style strings or hex integers
//! - [`Material`] - Lambert surface color of a node
//! - [`Node`] - A scene-graph node (group or mesh)
//! - [`Light`] / [`Fog`] - Scene lighting and linear fog
//! - [`Scene`] - Container for shapes, nodes, and lights
//! - [`NodeKey`] / [`ShapeKey`] - Generational keys into the scene

mod transform;
mod color;
mod entity;
mod light;
mod scene;

pub use transform::Transform3D;
pub use color::{Color, ColorParseError};
pub use entity::{Material, Node, DirtyFlags};
pub use light::{Light, Fog};
pub use scene::{Scene, NodeKey, ShapeKey};

// Re-export commonly used types from atomviz_math for convenience
pub use atomviz_math::{Vec3, Mat4, Shape3D, Sphere3D, Cuboid3D};
