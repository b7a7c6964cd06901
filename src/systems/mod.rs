//! Application systems
//!
//! Window, rendering, animation and frame pacing, kept apart so the frame
//! logic can be tested without a window or GPU.

mod animation;
mod frame_loop;
mod render;
mod viewport;
mod window;

pub use animation::{Animation, AtomAnimation, SmokeAnimation};
pub use frame_loop::{FrameLoop, FramePacer, FrameRenderer};
pub use render::{RenderError, RenderSystem};
pub use viewport::resize_viewport;
pub use window::{WindowError, WindowSystem};
