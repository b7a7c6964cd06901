//! Rendering pipeline components
//!
//! One lit mesh pipeline plus the GPU-side types it consumes.

pub mod types;
pub mod mesh_pipeline;

// Re-export types
pub use types::{
    MeshVertex, InstanceRaw, GpuLight, SceneUniforms, MAX_LIGHTS,
    LIGHT_NONE, LIGHT_DIRECTIONAL, LIGHT_POINT, LIGHT_SPOT,
};

// Re-export pipelines
pub use mesh_pipeline::{MeshPipeline, GpuMesh, DEPTH_FORMAT};
