//! Atom scene: a spinning nucleus with three orbiting electrons

use atomviz_core::{Color, Light, Node, Scene, Vec3};
use atomviz_input::OrbitControls;
use rand::Rng;

use crate::config::{AtomConfig, ControlsConfig};
use crate::scene::{ElectronFactory, OrbitPlane, SceneBuildError, SceneContext};
use crate::systems::AtomAnimation;

/// Name of the group node holding the nucleus and electrons
pub const NUCLEUS_GROUP_NAME: &str = "nucleus";

/// Builder for the atom scene
///
/// # Example
/// ```ignore
/// let context = AtomSceneBuilder::new(config.atom.clone())
///     .with_controls(config.controls.build())
///     .build(16.0 / 9.0, &mut rand::rng())?;
/// ```
pub struct AtomSceneBuilder {
    config: AtomConfig,
    controls: Option<OrbitControls>,
    background: Color,
}

impl AtomSceneBuilder {
    pub fn new(config: AtomConfig) -> Self {
        Self {
            config,
            controls: None,
            background: Color::BLACK,
        }
    }

    /// Attach orbit controls
    pub fn with_controls(mut self, controls: OrbitControls) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Attach orbit controls built from config
    pub fn with_controls_config(self, config: &ControlsConfig) -> Self {
        self.with_controls(config.build())
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Build the scene, camera and animation
    ///
    /// Electrons without a configured angle draw one from `rng`.
    pub fn build<R: Rng + ?Sized>(
        self,
        aspect: f32,
        rng: &mut R,
    ) -> Result<SceneContext<AtomAnimation>, SceneBuildError> {
        let config = self.config;
        let mut scene = Scene::new();
        scene.background = self.background;
        scene.set_fog(config.fog.build());

        let group = scene.add_node(Node::group().with_name(NUCLEUS_GROUP_NAME));

        config.nucleus.build(&mut scene, group)?;

        let factory = ElectronFactory::new().with_segments(config.nucleus.segments);
        let electrons = config
            .electrons
            .iter()
            .zip(OrbitPlane::ALL.iter().cycle())
            .map(|(electron, &plane)| factory.spawn(electron, plane, &mut scene, group, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;

        scene.add_light(Light::ambient(Color::from_hex(0x333333), 1.0));
        scene.add_light(Light::directional(Color::WHITE, 0.5, Vec3::Y));
        scene.add_light(Light::spot(Color::WHITE, 1.0, Vec3::new(-20.0, 20.0, 10.0)));

        log::info!(
            "Atom scene built: {} nodes, {} electrons",
            scene.node_count(),
            electrons.len()
        );

        Ok(SceneContext {
            scene,
            camera: config.camera.build(aspect),
            controls: self.controls,
            animation: AtomAnimation::new(group, electrons, config.nucleus_spin),
        })
    }
}
