//! Windowed application
//!
//! Owns the window, renderer, scene and frame loop, and routes winit events
//! to them. Nothing is created until the event loop resumes.

use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::input::{InputAction, InputMapper};
use crate::scene::{AtomSceneBuilder, SceneBuildError, SceneContext, SmokeSceneBuilder};
use crate::systems::{resize_viewport, Animation, FrameLoop, RenderSystem, WindowSystem};

/// Pixels of trackpad scroll per wheel line
const PIXELS_PER_LINE: f32 = 50.0;

/// Which scene the application shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    /// Nucleus and orbiting electrons with orbit controls
    Atom,
    /// Single spinning cube
    SmokeTest,
}

impl Program {
    /// Build this program's scene for the given aspect ratio
    pub fn build_scene(
        self,
        config: &AppConfig,
        aspect: f32,
    ) -> Result<SceneContext<Box<dyn Animation>>, SceneBuildError> {
        match self {
            Program::Atom => {
                let builder = AtomSceneBuilder::new(config.atom.clone())
                    .with_controls_config(&config.controls)
                    .with_background(config.rendering.background);
                let context = match config.atom.seed {
                    Some(seed) => builder.build(aspect, &mut StdRng::seed_from_u64(seed))?,
                    None => builder.build(aspect, &mut rand::rng())?,
                };
                Ok(context.boxed())
            }
            Program::SmokeTest => Ok(SmokeSceneBuilder::new(config.smoke.clone())
                .with_background(config.rendering.background)
                .build(aspect)
                .boxed()),
        }
    }

    fn title_suffix(self) -> &'static str {
        match self {
            Program::Atom => "",
            Program::SmokeTest => " (smoke test)",
        }
    }
}

/// Main application state
pub struct App {
    config: AppConfig,
    program: Program,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    context: Option<SceneContext<Box<dyn Animation>>>,
    frame_loop: FrameLoop,
}

impl App {
    pub fn new(program: Program, config: AppConfig) -> Self {
        Self {
            config,
            program,
            window: None,
            renderer: None,
            context: None,
            frame_loop: FrameLoop::new(),
        }
    }

    /// Create window, renderer and scene; false if any of them failed
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let mut window_config = self.config.window.clone();
        window_config.title.push_str(self.program.title_suffix());

        let window = match WindowSystem::create(event_loop, &window_config) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };

        let renderer = match RenderSystem::new(window.window().clone(), self.config.window.vsync) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };

        let (width, height) = renderer.size();
        let aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
        let context = match self.program.build_scene(&self.config, aspect) {
            Ok(context) => context,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.context = Some(context);
        true
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => {
                if let Some(context) = &mut self.context {
                    context.camera.reset();
                    if let Some(controls) = &mut context.controls {
                        controls.reset();
                    }
                    log::info!("Camera reset");
                }
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
        }
    }

    fn controls(&mut self) -> Option<&mut atomviz_input::OrbitControls> {
        self.context.as_mut().and_then(|c| c.controls.as_mut())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if !self.initialize(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let (Some(context), Some(renderer)) = (&mut self.context, &mut self.renderer) {
                    resize_viewport(&mut context.camera, renderer, size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(controls) = self.controls() {
                    controls.process_mouse_button(button, state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(controls) = self.controls() {
                    controls.process_cursor_moved(position.x, position.y);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                if let Some(controls) = self.controls() {
                    controls.process_scroll(lines);
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(context), Some(renderer), Some(window)) =
                    (&mut self.context, &mut self.renderer, &mut self.window)
                {
                    if self.frame_loop.tick(context, renderer, window).is_err() {
                        window.set_status("rendering stopped");
                    }
                }
            }
            _ => {}
        }
    }
}

/// Run a program until its window closes
pub fn run(program: Program) -> Result<(), winit::error::EventLoopError> {
    let config = AppConfig::load_or_default();
    log::info!("Loaded configuration: {}x{} window", config.window.width, config.window.height);

    let event_loop = EventLoop::new()?;
    // Frames are requested by the frame loop itself
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(program, config);
    event_loop.run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.atom.nucleus.segments = 8;
        config.atom.seed = Some(1);
        config
    }

    #[test]
    fn test_atom_program_scene() {
        let context = Program::Atom.build_scene(&test_config(), 1.0).unwrap();
        assert_eq!(context.scene.node_count(), 30);
        assert!(context.controls.is_some());
    }

    #[test]
    fn test_smoke_program_scene() {
        let context = Program::SmokeTest.build_scene(&test_config(), 1.0).unwrap();
        assert_eq!(context.scene.node_count(), 1);
        assert!(context.controls.is_none());
    }

    #[test]
    fn test_background_from_config() {
        let mut config = test_config();
        config.rendering.background = atomviz_core::Color::WHITE;
        let context = Program::SmokeTest.build_scene(&config, 1.0).unwrap();
        assert_eq!(context.scene.background, atomviz_core::Color::WHITE);
    }
}
