//! Axis-aligned box geometry
//!
//! Each face gets its own four vertices so normals stay flat.

use crate::{Vec3, shape::{Shape3D, Triangle}};

/// An axis-aligned box centered at the origin
#[derive(Clone, Debug)]
pub struct Cuboid3D {
    half_extents: Vec3,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl Cuboid3D {
    /// Create a box with the given full width, height and depth
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;

        // (normal, four corners counter-clockwise seen from outside)
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (Vec3::Z, [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
            ]),
            (Vec3::NEG_Z, [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(h.x, -h.y, -h.z),
            ]),
            (Vec3::Y, [
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, h.y, -h.z),
            ]),
            (Vec3::NEG_Y, [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(-h.x, -h.y, h.z),
            ]),
            (Vec3::X, [
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, -h.y, h.z),
            ]),
            (Vec3::NEG_X, [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, -h.z),
            ]),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);

        for (normal, corners) in faces {
            let base = positions.len() as u32;
            positions.extend_from_slice(&corners);
            normals.extend_from_slice(&[normal; 4]);
            triangles.push(Triangle::new(base, base + 1, base + 2));
            triangles.push(Triangle::new(base + 2, base + 3, base));
        }

        Self {
            half_extents: h,
            positions,
            normals,
            triangles,
        }
    }

    /// Create a cube with equal sides
    pub fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    /// Half the box size along each axis
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }
}

impl Shape3D for Cuboid3D {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = Cuboid3D::cube(0.2);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_cube_half_extents() {
        let cube = Cuboid3D::new(2.0, 4.0, 6.0);
        assert_eq!(cube.half_extents(), Vec3::new(1.0, 2.0, 3.0));
        for p in cube.positions() {
            assert_eq!(p.abs(), Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        let cube = Cuboid3D::cube(1.0);
        let p = cube.positions();
        let n = cube.normals();
        for tri in cube.triangles() {
            let [a, b, c] = tri.indices.map(|i| p[i as usize]);
            let face_normal = (b - a).cross(c - a).normalize();
            let expected = n[tri.indices[0] as usize];
            assert!(face_normal.dot(expected) > 0.99, "triangle {:?} wound wrong", tri);
        }
    }
}
