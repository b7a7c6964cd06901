//! Mesh Rendering Library
//!
//! This crate provides the wgpu-based rendering pipeline for drawing the
//! scene graph from `atomviz_core`.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::PerspectiveCamera`] - perspective camera with a cached projection
//! - [`pipeline::MeshPipeline`] - instanced Lambert shading with fog
//! - [`renderable::RenderableScene`] - Converts the scene graph to instance batches

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use atomviz_core::{Scene, Node, NodeKey, ShapeKey, Material, Color, Light, Fog};

pub use camera::PerspectiveCamera;
pub use context::{RenderContext, ContextError};
pub use renderable::{RenderableScene, InstanceBatch};
