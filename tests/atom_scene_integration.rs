//! End-to-end tests for the atom scene
//!
//! Builds the scene from config, drives it through the frame loop with a
//! recording renderer and a counting pacer, and checks the resulting state.

use atomviz::config::AtomConfig;
use atomviz::scene::{AtomSceneBuilder, ElectronConfig, NUCLEUS_BALL_NAME, NUCLEUS_GROUP_NAME, NUCLEUS_TAG};
use atomviz::systems::{resize_viewport, FrameLoop, FramePacer, FrameRenderer, RenderError};
use atomviz_core::{Color, Scene};
use atomviz_render::PerspectiveCamera;
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPSILON: f32 = 1e-3;

#[derive(Default)]
struct RecordingRenderer {
    frames: usize,
    node_counts: Vec<usize>,
    size: Option<(u32, u32)>,
}

impl FrameRenderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.frames += 1;
        self.node_counts.push(scene.node_count());
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }
}

#[derive(Default)]
struct CountingPacer {
    requests: usize,
}

impl FramePacer for CountingPacer {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

fn atom_config() -> AtomConfig {
    let mut config = AtomConfig::default();
    config.nucleus.segments = 8;
    config.electrons = (1..=3)
        .map(|i| ElectronConfig::named(format!("electron{}", i)).with_angle(i as f32 * 0.25))
        .collect();
    config
}

#[test]
fn test_atom_scene_runs_for_n_ticks() {
    const TICKS: usize = 200;
    let mut rng = StdRng::seed_from_u64(99);
    let mut context = AtomSceneBuilder::new(atom_config()).build(16.0 / 9.0, &mut rng).unwrap();
    let mut renderer = RecordingRenderer::default();
    let mut pacer = CountingPacer::default();
    let mut frame_loop = FrameLoop::new();

    for _ in 0..TICKS {
        frame_loop.tick(&mut context, &mut renderer, &mut pacer).unwrap();
    }

    assert_eq!(renderer.frames, TICKS);
    assert_eq!(pacer.requests, TICKS);
    assert_eq!(frame_loop.frame_count(), TICKS as u64);

    // Nothing is created or destroyed while running
    assert!(renderer.node_counts.iter().all(|&n| n == 30));

    // Angles grow linearly without wrapping
    for (i, electron) in context.animation.electrons().iter().enumerate() {
        let start = (i + 1) as f32 * 0.25;
        let expected = start + TICKS as f32 * 0.05;
        assert!((electron.angle - expected).abs() < EPSILON, "{} angle", electron.name);
        assert!(electron.angle > std::f32::consts::TAU);

        // Last written position is from the angle before the final increment
        let position = context.scene.node(electron.node).unwrap().position();
        let (a, b) = electron.plane.plane_coords(position);
        let last = expected - 0.05;
        assert!((a - 10.0 * last.cos()).abs() < 1e-2);
        assert!((b - 10.0 * last.sin()).abs() < 1e-2);
    }

    let (group, _) = context.scene.get_by_name(NUCLEUS_GROUP_NAME).unwrap();
    let rotation = context.scene.node(group).unwrap().rotation();
    assert!((rotation.y - TICKS as f32 * 0.002).abs() < EPSILON);
}

#[test]
fn test_nucleus_colors() {
    let mut rng = StdRng::seed_from_u64(1);
    let context = AtomSceneBuilder::new(atom_config()).build(1.0, &mut rng).unwrap();

    let balls: Vec<_> = context
        .scene
        .iter_tagged(NUCLEUS_TAG)
        .map(|(_, node)| node)
        .collect();
    assert_eq!(balls.len(), 26);
    assert!(balls.iter().all(|n| n.name.as_deref() == Some(NUCLEUS_BALL_NAME)));

    let red = balls.iter().filter(|n| n.material().color == Color::RED).count();
    let blue = balls
        .iter()
        .filter(|n| n.material().color == Color::from_hex(0x2e30d1))
        .count();
    assert_eq!(red + blue, 26);
    assert_eq!(red, 13);
}

#[test]
fn test_fifty_ball_nucleus() {
    let mut config = atom_config();
    config.nucleus.polar_divisions = 7;
    let mut rng = StdRng::seed_from_u64(1);
    let context = AtomSceneBuilder::new(config).build(1.0, &mut rng).unwrap();
    assert_eq!(context.scene.iter_tagged(NUCLEUS_TAG).count(), 50);
}

#[test]
fn test_electrons_follow_nucleus_spin() {
    let mut config = atom_config();
    config.electrons = vec![ElectronConfig::named("solo").with_angle(0.0).with_speed(0.0)];
    config.nucleus_spin = std::f32::consts::FRAC_PI_2;
    let mut rng = StdRng::seed_from_u64(1);
    let mut context = AtomSceneBuilder::new(config).build(1.0, &mut rng).unwrap();
    let mut renderer = RecordingRenderer::default();
    let mut pacer = CountingPacer::default();
    let mut frame_loop = FrameLoop::new();

    frame_loop.tick(&mut context, &mut renderer, &mut pacer).unwrap();

    // Local (10, 0, 0) in the XY plane, group turned a quarter around Y
    let electron = &context.animation.electrons()[0];
    let world = context.scene.world_position(electron.node).unwrap();
    assert!(world.x.abs() < EPSILON);
    assert!((world.z + 10.0).abs() < EPSILON);
}

#[test]
fn test_resize() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut context = AtomSceneBuilder::new(atom_config()).build(1.0, &mut rng).unwrap();
    let mut renderer = RecordingRenderer::default();

    assert!(resize_viewport(&mut context.camera, &mut renderer, 800, 600));
    assert_eq!(context.camera.aspect, 800.0 / 600.0);
    assert_eq!(renderer.size, Some((800, 600)));

    assert!(!resize_viewport(&mut context.camera, &mut renderer, 800, 0));
    assert_eq!(renderer.size, Some((800, 600)));
}
