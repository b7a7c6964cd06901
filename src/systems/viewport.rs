//! Viewport resize handling

use atomviz_render::PerspectiveCamera;

use crate::systems::FrameRenderer;

/// Match the camera and the render surface to a new window size
///
/// Returns false (and changes nothing) when either dimension is zero, as
/// happens while the window is minimized.
pub fn resize_viewport<R: FrameRenderer + ?Sized>(
    camera: &mut PerspectiveCamera,
    renderer: &mut R,
    width: u32,
    height: u32,
) -> bool {
    if width == 0 || height == 0 {
        log::debug!("Ignoring resize to {}x{}", width, height);
        return false;
    }

    camera.aspect = width as f32 / height as f32;
    camera.update_projection_matrix();
    renderer.set_size(width, height);
    log::debug!("Viewport resized to {}x{}", width, height);
    true
}
