//! Math and geometry primitives for atomviz
//!
//! Vector and matrix types come from `glam` and are re-exported here so the
//! rest of the workspace has a single import point.
//!
//! ## Shape Types
//!
//! - [`Shape3D`] - Trait for indexed triangle meshes
//! - [`Triangle`] - Three vertex indices
//! - [`Sphere3D`] - A UV sphere
//! - [`Cuboid3D`] - An axis-aligned box

pub mod shape;
pub mod sphere;
pub mod cuboid;

pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec3, Vec4};
pub use shape::{Shape3D, Triangle};
pub use sphere::Sphere3D;
pub use cuboid::Cuboid3D;
