//! Per-frame scene animation
//!
//! An [`Animation`] mutates the scene once per frame tick. Animations are
//! frame-based rather than time-based: every tick advances by a fixed step.

use atomviz_core::{NodeKey, Scene, Vec3};

use crate::scene::Electron;

/// Something that advances a scene by one frame
pub trait Animation {
    fn animate(&mut self, scene: &mut Scene);
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn animate(&mut self, scene: &mut Scene) {
        (**self).animate(scene);
    }
}

/// Orbits the electrons and spins the nucleus group
pub struct AtomAnimation {
    nucleus: NodeKey,
    electrons: Vec<Electron>,
    /// Radians added to the nucleus Y rotation per frame
    nucleus_spin: f32,
}

impl AtomAnimation {
    pub fn new(nucleus: NodeKey, electrons: Vec<Electron>, nucleus_spin: f32) -> Self {
        Self {
            nucleus,
            electrons,
            nucleus_spin,
        }
    }

    pub fn nucleus(&self) -> NodeKey {
        self.nucleus
    }

    pub fn electrons(&self) -> &[Electron] {
        &self.electrons
    }

    pub fn nucleus_spin(&self) -> f32 {
        self.nucleus_spin
    }
}

impl Animation for AtomAnimation {
    fn animate(&mut self, scene: &mut Scene) {
        for electron in &mut self.electrons {
            electron.advance(scene);
        }
        scene.rotate(self.nucleus, Vec3::new(0.0, self.nucleus_spin, 0.0));
    }
}

/// Spins a single node around X and Y
pub struct SmokeAnimation {
    target: NodeKey,
    /// Radians added to the X and Y rotation per frame
    spin: f32,
}

impl SmokeAnimation {
    pub fn new(target: NodeKey, spin: f32) -> Self {
        Self { target, spin }
    }

    pub fn target(&self) -> NodeKey {
        self.target
    }
}

impl Animation for SmokeAnimation {
    fn animate(&mut self, scene: &mut Scene) {
        scene.rotate(self.target, Vec3::new(self.spin, self.spin, 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ElectronConfig, ElectronFactory, OrbitPlane};
    use atomviz_core::{Cuboid3D, Material, Node};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_atom_animation_spins_nucleus() {
        let mut scene = Scene::new();
        let group = scene.add_node(Node::group());
        let mut animation = AtomAnimation::new(group, Vec::new(), 0.002);

        for _ in 0..10 {
            animation.animate(&mut scene);
        }
        let rotation = scene.node(group).unwrap().rotation();
        assert!((rotation.y - 0.02).abs() < EPSILON);
        assert_eq!(rotation.x, 0.0);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_atom_animation_moves_electrons() {
        let mut scene = Scene::new();
        let group = scene.add_node(Node::group());
        let mut rng = StdRng::seed_from_u64(5);
        let factory = ElectronFactory::new().with_segments(8);
        let electrons = OrbitPlane::ALL
            .iter()
            .map(|&plane| {
                factory
                    .spawn(&ElectronConfig::default().with_angle(1.0), plane, &mut scene, group, &mut rng)
                    .unwrap()
            })
            .collect();
        let mut animation = AtomAnimation::new(group, electrons, 0.002);

        for _ in 0..100 {
            animation.animate(&mut scene);
        }

        for electron in animation.electrons() {
            assert!((electron.angle - (1.0 + 100.0 * 0.05)).abs() < 1e-3);
            let position = scene.node(electron.node).unwrap().position();
            let (a, b) = electron.plane.plane_coords(position);
            assert!((a * a + b * b - 100.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_smoke_animation_rotates_x_and_y() {
        let mut scene = Scene::new();
        let cube = scene.add_shape(Cuboid3D::cube(0.2));
        let key = scene.add_node(Node::mesh(cube, Material::WHITE));
        let mut animation = SmokeAnimation::new(key, 0.01);

        for _ in 0..3 {
            animation.animate(&mut scene);
        }
        let rotation = scene.node(key).unwrap().rotation();
        assert!((rotation.x - 0.03).abs() < EPSILON);
        assert!((rotation.y - 0.03).abs() < EPSILON);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_boxed_animation() {
        let mut scene = Scene::new();
        let key = scene.add_node(Node::group());
        let mut animation: Box<dyn Animation> = Box::new(SmokeAnimation::new(key, 0.5));
        animation.animate(&mut scene);
        assert!((scene.node(key).unwrap().rotation().x - 0.5).abs() < EPSILON);
    }
}
