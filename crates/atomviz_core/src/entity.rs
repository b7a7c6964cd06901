//! Node and Material types
//!
//! A Node is one element of the scene graph: either a group (no shape) that
//! only carries a transform for its children, or a mesh node that draws a
//! shared shape with a material.

use std::collections::HashSet;
use bitflags::bitflags;
use atomviz_math::Vec3;
use crate::{Color, ShapeKey, NodeKey, Transform3D};

bitflags! {
    /// Flags indicating which parts of a node have changed since the last frame
    ///
    /// The renderer only re-collects instance data when some node is dirty.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Shape or visibility has changed
        const MESH = 1 << 1;
        /// Material has changed
        const MATERIAL = 1 << 2;
        /// All flags set - node needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// A Lambert material: diffuse color only
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color
    pub color: Color,
    /// Opacity (1.0 = opaque)
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
        }
    }
}

impl Material {
    /// Create an opaque material with the given color
    pub fn lambert(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// White material
    pub const WHITE: Self = Self { color: Color::WHITE, opacity: 1.0 };

    /// Linear RGBA as uploaded to the GPU
    pub fn linear_rgba(&self) -> [f32; 4] {
        self.color.to_linear_rgba(self.opacity)
    }
}

/// A node in the scene graph
///
/// Each node has:
/// - An optional name (for lookup by name)
/// - Tags (for categorization and filtering)
/// - A transform relative to its parent
/// - An optional shape (None = group node)
/// - A material (ignored for groups)
/// - Parent/children links maintained by [`crate::Scene`]
/// - Dirty flags (for change tracking)
#[derive(Clone, Debug)]
pub struct Node {
    /// Optional name for this node (for lookup)
    pub name: Option<String>,
    /// Tags for categorization (e.g., "nucleus", "electron")
    pub tags: HashSet<String>,
    /// Whether this node and its subtree are drawn
    pub visible: bool,
    pub(crate) transform: Transform3D,
    pub(crate) shape: Option<ShapeKey>,
    pub(crate) material: Material,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    dirty: DirtyFlags,
}

impl Node {
    /// Create a group node: a transform with no geometry of its own
    pub fn group() -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            visible: true,
            transform: Transform3D::identity(),
            shape: None,
            material: Material::default(),
            parent: None,
            children: Vec::new(),
            dirty: DirtyFlags::ALL, // New nodes are dirty
        }
    }

    /// Create a mesh node drawing the given shape with a material
    pub fn mesh(shape: ShapeKey, material: Material) -> Self {
        Self {
            shape: Some(shape),
            material,
            ..Self::group()
        }
    }

    /// Set the name of this node (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this node
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Set the initial position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the initial transform
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Check if this node has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Transform relative to the parent
    #[inline]
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Local position
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Local Euler rotation in radians
    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    /// The shape this node draws, if any
    #[inline]
    pub fn shape(&self) -> Option<ShapeKey> {
        self.shape
    }

    /// Check if this is a group node
    #[inline]
    pub fn is_group(&self) -> bool {
        self.shape.is_none()
    }

    /// The node's material
    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Parent node, None for roots
    #[inline]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Child nodes in insertion order
    #[inline]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    // --- Dirty tracking methods ---

    /// Check if this node has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this node as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the position and mark the transform as dirty
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the Euler rotation and mark the transform as dirty
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Add Euler deltas to the rotation and mark the transform as dirty
    pub fn rotate(&mut self, delta: Vec3) {
        self.transform.rotate(delta);
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the transform and mark it as dirty
    pub fn set_transform(&mut self, transform: Transform3D) {
        self.transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// Set the material and mark it as dirty
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.mark_dirty(DirtyFlags::MATERIAL);
    }

    /// Show or hide this node's subtree
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.mark_dirty(DirtyFlags::MESH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_has_no_shape() {
        let node = Node::group().with_name("nucleus");
        assert!(node.is_group());
        assert_eq!(node.name.as_deref(), Some("nucleus"));
    }

    #[test]
    fn test_new_node_is_dirty() {
        let node = Node::group();
        assert!(node.is_dirty());
        assert_eq!(node.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn test_setters_mark_dirty() {
        let mut node = Node::group();
        node.clear_dirty();
        assert!(!node.is_dirty());

        node.set_position(Vec3::ONE);
        assert_eq!(node.dirty_flags(), DirtyFlags::TRANSFORM);

        node.clear_dirty();
        node.set_material(Material::lambert(Color::RED));
        assert_eq!(node.dirty_flags(), DirtyFlags::MATERIAL);

        node.clear_dirty();
        node.set_visible(false);
        assert_eq!(node.dirty_flags(), DirtyFlags::MESH);
    }

    #[test]
    fn test_tags() {
        let node = Node::group().with_tag("nucleus").with_tag("spinning");
        assert!(node.has_tag("nucleus"));
        assert!(node.has_tag("spinning"));
        assert!(!node.has_tag("electron"));
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut node = Node::group();
        node.rotate(Vec3::new(0.0, 0.002, 0.0));
        node.rotate(Vec3::new(0.0, 0.002, 0.0));
        assert!((node.rotation().y - 0.004).abs() < 1e-7);
    }

    #[test]
    fn test_material_linear_rgba() {
        let m = Material::lambert(Color::RED);
        assert_eq!(m.linear_rgba(), [1.0, 0.0, 0.0, 1.0]);
    }
}
