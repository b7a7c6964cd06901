//! Shape traits and primitives for 3D geometry
//!
//! Shapes are pure geometric data - no colors, materials, or rendering info.

use crate::Vec3;

/// A triangle defined by three vertex indices
///
/// Vertices are wound counter-clockwise when seen from outside the shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Indices into the parent shape's vertex array
    pub indices: [u32; 3],
}

impl Triangle {
    /// Create a new triangle with the given vertex indices
    #[inline]
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// Trait for indexed triangle meshes
///
/// A Shape3D provides the geometric data the renderer uploads once:
/// - Positions and per-vertex normals (same length)
/// - Triangles indexing into those arrays
pub trait Shape3D: Send + Sync {
    /// Get the vertex positions of this shape
    fn positions(&self) -> &[Vec3];

    /// Get the per-vertex normals (unit length)
    fn normals(&self) -> &[Vec3];

    /// Get the triangle list of this shape
    fn triangles(&self) -> &[Triangle];

    /// Get the number of vertices
    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions().len()
    }

    /// Get the number of triangles
    #[inline]
    fn triangle_count(&self) -> usize {
        self.triangles().len()
    }

    /// Flatten the triangle list into a plain index buffer
    fn indices(&self) -> Vec<u32> {
        self.triangles().iter().flat_map(|t| t.indices).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneTriangle {
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        triangles: Vec<Triangle>,
    }

    impl Shape3D for OneTriangle {
        fn positions(&self) -> &[Vec3] {
            &self.positions
        }
        fn normals(&self) -> &[Vec3] {
            &self.normals
        }
        fn triangles(&self) -> &[Triangle] {
            &self.triangles
        }
    }

    #[test]
    fn test_triangle_new() {
        let tri = Triangle::new(0, 1, 2);
        assert_eq!(tri.indices, [0, 1, 2]);
    }

    #[test]
    fn test_default_counts_and_indices() {
        let shape = OneTriangle {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            triangles: vec![Triangle::new(0, 1, 2)],
        };
        assert_eq!(shape.vertex_count(), 3);
        assert_eq!(shape.triangle_count(), 1);
        assert_eq!(shape.indices(), vec![0, 1, 2]);
    }
}
