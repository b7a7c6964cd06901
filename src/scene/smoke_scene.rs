//! Smoke-test scene: one spinning cube under a red point light

use atomviz_core::{Color, Cuboid3D, Light, Material, Node, Scene, Vec3};

use crate::config::SmokeConfig;
use crate::scene::SceneContext;
use crate::systems::SmokeAnimation;

/// Name of the cube node
pub const CUBE_NAME: &str = "cube";

/// Builder for the smoke-test scene
pub struct SmokeSceneBuilder {
    config: SmokeConfig,
    background: Color,
}

impl SmokeSceneBuilder {
    pub fn new(config: SmokeConfig) -> Self {
        Self {
            config,
            background: Color::BLACK,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Build the scene, camera and animation
    pub fn build(self, aspect: f32) -> SceneContext<SmokeAnimation> {
        let config = self.config;
        let mut scene = Scene::new();
        scene.background = self.background;
        scene.set_fog(config.fog.build());

        let cube = scene.add_shape(Cuboid3D::cube(config.cube_size));
        let key = scene.add_node(Node::mesh(cube, Material::WHITE).with_name(CUBE_NAME));

        scene.add_light(Light::point(
            config.light_color,
            config.light_intensity,
            Vec3::from_array(config.light_position),
            config.light_distance,
        ));
        scene.add_light(Light::ambient(config.light_color, config.ambient_intensity));

        log::info!("Smoke-test scene built");

        SceneContext {
            scene,
            camera: config.camera.build(aspect),
            controls: None,
            animation: SmokeAnimation::new(key, config.spin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::Animation;

    #[test]
    fn test_smoke_scene() {
        let context = SmokeSceneBuilder::new(SmokeConfig::default()).build(1.0);
        assert_eq!(context.scene.node_count(), 1);
        assert_eq!(context.scene.lights().len(), 2);
        assert!(context.scene.lights().iter().any(|l| l.is_ambient()));
        assert_eq!(context.camera.position, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(context.camera.fov, 70.0);

        let (key, node) = context.scene.get_by_name(CUBE_NAME).unwrap();
        assert_eq!(key, context.animation.target());
        assert_eq!(node.material().color, Color::WHITE);
    }

    #[test]
    fn test_smoke_scene_spins() {
        let mut context = SmokeSceneBuilder::new(SmokeConfig::default()).build(1.0);
        context.animation.animate(&mut context.scene);
        let rotation = context.scene.node(context.animation.target()).unwrap().rotation();
        assert!((rotation.x - 0.01).abs() < 1e-6);
        assert!((rotation.y - 0.01).abs() < 1e-6);
    }
}
