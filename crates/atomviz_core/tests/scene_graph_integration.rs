//! Integration tests for the scene graph
//!
//! These tests exercise groups, shared shapes and world transforms together,
//! the way the atom scene uses them.

use atomviz_core::{Color, Material, Node, Scene, Sphere3D, Vec3};

const EPSILON: f32 = 0.0001;

/// Build a group with spheres on the four compass points of a circle
fn ring_scene() -> (Scene, atomviz_core::NodeKey, Vec<atomviz_core::NodeKey>) {
    let mut scene = Scene::new();
    let shape = scene.add_shape(Sphere3D::new(0.5, 8, 8));
    let group = scene.add_node(Node::group().with_name("group"));
    let children = [Vec3::X, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Z]
        .into_iter()
        .map(|p| {
            scene
                .add_child(group, Node::mesh(shape, Material::lambert(Color::RED)).with_position(p * 3.0))
                .unwrap()
        })
        .collect();
    (scene, group, children)
}

#[test]
fn test_group_rotation_is_rigid() {
    let (mut scene, group, children) = ring_scene();

    let before: Vec<Vec3> = children.iter().map(|&c| scene.world_position(c).unwrap()).collect();
    for _ in 0..500 {
        scene.rotate(group, Vec3::new(0.0, 0.002, 0.0));
    }
    let after: Vec<Vec3> = children.iter().map(|&c| scene.world_position(c).unwrap()).collect();

    // Pairwise distances are preserved
    for i in 0..children.len() {
        for j in 0..children.len() {
            let d0 = before[i].distance(before[j]);
            let d1 = after[i].distance(after[j]);
            assert!((d0 - d1).abs() < EPSILON);
        }
    }

    // Rotation about Y keeps every child at the same height and radius
    for (b, a) in before.iter().zip(&after) {
        assert!((b.y - a.y).abs() < EPSILON);
        assert!((b.length() - a.length()).abs() < EPSILON);
    }

    // Children's own transforms were never touched
    for &c in &children {
        assert_eq!(scene.node(c).unwrap().rotation(), Vec3::ZERO);
    }
}

#[test]
fn test_shared_shape_used_by_all_children() {
    let (scene, group, children) = ring_scene();
    assert_eq!(scene.shape_count(), 1);
    let shape = scene.node(children[0]).unwrap().shape().unwrap();
    assert!(children.iter().all(|&c| scene.node(c).unwrap().shape() == Some(shape)));
    assert!(scene.node(group).unwrap().is_group());
}

#[test]
fn test_visit_visible_reaches_every_child() {
    let (scene, _, children) = ring_scene();
    let mut meshes = 0;
    scene.visit_visible(|_, node, _| {
        if !node.is_group() {
            meshes += 1;
        }
    });
    assert_eq!(meshes, children.len());
}
