//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Mesh uploads (once per shape)
//! - Instance collection when the scene changes
//! - Frame rendering

use std::collections::HashMap;
use std::sync::Arc;

use atomviz_core::{Scene, ShapeKey};
use atomviz_render::{
    context::{ContextError, RenderContext},
    pipeline::{GpuMesh, MeshPipeline, SceneUniforms},
    PerspectiveCamera, RenderableScene,
};
use winit::window::Window;

use crate::systems::FrameRenderer;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost and could not be recovered
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
    /// GPU initialization failed
    Context(ContextError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
            RenderError::Context(e) => write!(f, "GPU initialization failed: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Context(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: MeshPipeline,
    meshes: HashMap<ShapeKey, GpuMesh>,
    renderable: RenderableScene,
}

impl RenderSystem {
    /// Create render system for a window
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut pipeline = MeshPipeline::new(&context.device, context.format());

        // Ensure depth texture exists
        pipeline.ensure_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
        );

        Ok(Self {
            context,
            pipeline,
            meshes: HashMap::new(),
            renderable: RenderableScene::new(),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Re-collect instances and upload any new shapes
    fn sync_scene(&mut self, scene: &Scene) {
        self.renderable.rebuild(scene);

        // Drop meshes whose shape left the scene
        self.meshes.retain(|key, _| scene.shape(*key).is_some());

        for batch in self.renderable.batches() {
            if self.meshes.contains_key(&batch.shape) {
                continue;
            }
            if let Some(shape) = scene.shape(batch.shape) {
                let mesh = GpuMesh::from_shape(&self.context.device, &**shape);
                log::debug!("Uploaded mesh with {} indices", mesh.index_count());
                self.meshes.insert(batch.shape, mesh);
            }
        }

        self.pipeline.upload_instances(
            &self.context.device,
            &self.context.queue,
            self.renderable.instances(),
        );
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError> {
        if scene.is_dirty() {
            self.sync_scene(scene);
        }

        let uniforms = SceneUniforms::from_scene(scene, camera);
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Create command encoder
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Surface is sRGB, so clear with the linear color
        let [r, g, b] = scene.background.to_linear();
        let meshes = &self.meshes;
        self.pipeline.render(
            &mut encoder,
            &view,
            &self.renderable,
            |key| meshes.get(&key),
            wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        );

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

impl FrameRenderer for RenderSystem {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.render_frame(scene, camera)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.resize(width, height);
    }
}
