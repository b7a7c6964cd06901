//! Scene graph container
//!
//! The Scene owns every shape, node and light. Nodes form a forest: roots
//! live directly in the scene, children inherit their parent's transform.
//! Rotating a group therefore moves its whole subtree rigidly.

use std::sync::Arc;
use slotmap::{new_key_type, SlotMap};
use atomviz_math::{Mat4, Shape3D, Vec3};
use crate::{Color, DirtyFlags, Fog, Light, Node};

new_key_type! {
    /// Generational key to a node in the scene
    pub struct NodeKey;
    /// Generational key to a shared shape in the scene
    pub struct ShapeKey;
}

/// A retained 3D scene: shapes, a node hierarchy, lights and fog
pub struct Scene {
    shapes: SlotMap<ShapeKey, Arc<dyn Shape3D>>,
    nodes: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
    lights: Vec<Light>,
    fog: Option<Fog>,
    /// Clear color behind all geometry
    pub background: Color,
    /// Set when nodes are removed (removal leaves no dirty node behind)
    structure_dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with a black background
    pub fn new() -> Self {
        Self {
            shapes: SlotMap::with_key(),
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            lights: Vec::new(),
            fog: None,
            background: Color::BLACK,
            structure_dirty: false,
        }
    }

    // --- Shapes ---

    /// Register a shape so nodes can draw it
    pub fn add_shape<S: Shape3D + 'static>(&mut self, shape: S) -> ShapeKey {
        self.shapes.insert(Arc::new(shape))
    }

    /// Get a shape by key
    pub fn shape(&self, key: ShapeKey) -> Option<&Arc<dyn Shape3D>> {
        self.shapes.get(key)
    }

    /// Number of registered shapes
    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    // --- Nodes ---

    /// Add a node at the root of the scene
    pub fn add_node(&mut self, mut node: Node) -> NodeKey {
        node.parent = None;
        node.children.clear();
        let key = self.nodes.insert(node);
        self.roots.push(key);
        key
    }

    /// Add a node as a child of `parent`
    ///
    /// Returns None if the parent does not exist.
    pub fn add_child(&mut self, parent: NodeKey, mut node: Node) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            log::warn!("add_child: parent node {:?} does not exist", parent);
            return None;
        }
        node.parent = Some(parent);
        node.children.clear();
        let key = self.nodes.insert(node);
        self.nodes[parent].children.push(key);
        Some(key)
    }

    /// Remove a node and its whole subtree
    ///
    /// Returns the removed node itself (its children are dropped).
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Node> {
        let parent = self.nodes.get(key)?.parent;
        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|&c| c != key);
                }
            }
            None => self.roots.retain(|&r| r != key),
        }

        let mut stack = self.nodes[key].children.clone();
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.nodes.remove(child) {
                stack.extend(removed.children);
            }
        }

        self.structure_dirty = true;
        self.nodes.remove(key)
    }

    /// Check whether a node exists
    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Get a reference to a node
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Get a mutable reference to a node
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Set a node's local position, returning false if it does not exist
    pub fn set_position(&mut self, key: NodeKey, position: Vec3) -> bool {
        self.nodes.get_mut(key).map(|n| n.set_position(position)).is_some()
    }

    /// Set a node's local Euler rotation, returning false if it does not exist
    pub fn set_rotation(&mut self, key: NodeKey, rotation: Vec3) -> bool {
        self.nodes.get_mut(key).map(|n| n.set_rotation(rotation)).is_some()
    }

    /// Add Euler deltas to a node's rotation, returning false if it does not exist
    pub fn rotate(&mut self, key: NodeKey, delta: Vec3) -> bool {
        self.nodes.get_mut(key).map(|n| n.rotate(delta)).is_some()
    }

    /// Find the first node with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(NodeKey, &Node)> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name.as_deref() == Some(name))
    }

    /// Iterate over nodes carrying a tag
    pub fn iter_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (NodeKey, &'a Node)> + 'a {
        self.nodes.iter().filter(move |(_, n)| n.has_tag(tag))
    }

    /// Children of a node (empty if the node does not exist)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|n| n.children()).unwrap_or(&[])
    }

    /// Root nodes in insertion order
    #[inline]
    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Total number of nodes (groups included)
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes with their keys
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }

    /// Compose the node's transform with all of its ancestors
    pub fn world_matrix(&self, key: NodeKey) -> Option<Mat4> {
        let mut node = self.nodes.get(key)?;
        let mut matrix = node.transform().matrix();
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            matrix = node.transform().matrix() * matrix;
        }
        Some(matrix)
    }

    /// World-space position of a node's origin
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.world_matrix(key).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Depth-first walk over visible nodes with their world matrices
    ///
    /// Hidden nodes prune their whole subtree.
    pub fn visit_visible<F>(&self, mut f: F)
    where
        F: FnMut(NodeKey, &Node, Mat4),
    {
        let mut stack: Vec<(NodeKey, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&k| (k, Mat4::IDENTITY))
            .collect();

        while let Some((key, parent_matrix)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else { continue };
            if !node.visible {
                continue;
            }
            let world = parent_matrix * node.transform().matrix();
            f(key, node, world);
            stack.extend(node.children.iter().rev().map(|&c| (c, world)));
        }
    }

    // --- Lights and fog ---

    /// Add a light to the scene
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// All lights in insertion order
    #[inline]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Set or clear the scene fog
    pub fn set_fog(&mut self, fog: Option<Fog>) {
        self.fog = fog;
    }

    /// The scene fog, if any
    #[inline]
    pub fn fog(&self) -> Option<&Fog> {
        self.fog.as_ref()
    }

    // --- Dirty tracking ---

    /// Check whether anything drawable changed since the last clear
    pub fn is_dirty(&self) -> bool {
        self.structure_dirty || self.nodes.values().any(|n| n.is_dirty())
    }

    /// Union of all node dirty flags
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.nodes
            .values()
            .fold(DirtyFlags::NONE, |acc, n| acc | n.dirty_flags())
    }

    /// Clear dirty flags on every node
    pub fn clear_all_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_dirty();
        }
        self.structure_dirty = false;
    }
}
