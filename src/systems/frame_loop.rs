//! Self-scheduling frame loop
//!
//! Each tick updates the controls, animates the scene, renders it and then
//! asks the [`FramePacer`] for the next frame. Rendering and pacing sit
//! behind traits so the loop can run without a window or GPU.

use atomviz_core::Scene;
use atomviz_render::PerspectiveCamera;

use crate::scene::SceneContext;
use crate::systems::{Animation, RenderError};

/// Draws a scene through a camera
pub trait FrameRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    /// Resize the output surface in physical pixels
    fn set_size(&mut self, width: u32, height: u32);
}

/// Schedules the next frame tick
pub trait FramePacer {
    fn request_frame(&mut self);
}

/// Drives frame ticks and stops for good after a render failure
#[derive(Debug, Default)]
pub struct FrameLoop {
    frames: u64,
    halted: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame tick
    ///
    /// On a render error the loop halts: the error is logged and returned,
    /// no further frame is requested, and every later tick does nothing.
    pub fn tick<A, R, P>(
        &mut self,
        context: &mut SceneContext<A>,
        renderer: &mut R,
        pacer: &mut P,
    ) -> Result<(), RenderError>
    where
        A: Animation,
        R: FrameRenderer + ?Sized,
        P: FramePacer + ?Sized,
    {
        if self.halted {
            return Ok(());
        }

        if let Some(controls) = context.controls.as_mut() {
            controls.update(&mut context.camera);
        }
        context.animation.animate(&mut context.scene);

        if let Err(e) = renderer.render(&context.scene, &context.camera) {
            log::error!("Frame {} failed, stopping frame loop: {}", self.frames, e);
            self.halted = true;
            return Err(e);
        }

        context.scene.clear_all_dirty();
        self.frames += 1;
        pacer.request_frame();
        Ok(())
    }

    /// Number of frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
