//! UV sphere geometry
//!
//! The sphere is a grid of `(width_segments + 1) * (height_segments + 1)`
//! vertices swept over azimuth (phi, 0..2π) and polar angle (theta, 0..π).
//! The seam column is duplicated so every row closes. The first and last
//! rows collapse onto the poles, so their degenerate triangles are skipped.

use std::f32::consts::{PI, TAU};

use crate::{Vec3, shape::{Shape3D, Triangle}};

/// A UV sphere centered at the origin - pure geometry without colors
#[derive(Clone, Debug)]
pub struct Sphere3D {
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<Triangle>,
}

impl Sphere3D {
    /// Minimum azimuthal segments
    pub const MIN_WIDTH_SEGMENTS: u32 = 3;
    /// Minimum polar segments
    pub const MIN_HEIGHT_SEGMENTS: u32 = 2;

    /// Create a sphere with the given radius and tessellation
    ///
    /// Segment counts below the minimum are raised to it.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(Self::MIN_WIDTH_SEGMENTS);
        let height_segments = height_segments.max(Self::MIN_HEIGHT_SEGMENTS);

        let vertex_count = ((width_segments + 1) * (height_segments + 1)) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);

        for iy in 0..=height_segments {
            let theta = PI * iy as f32 / height_segments as f32;
            for ix in 0..=width_segments {
                let phi = TAU * ix as f32 / width_segments as f32;
                let normal = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                positions.push(normal * radius);
                normals.push(normal);
            }
        }

        let row = width_segments + 1;
        let mut triangles = Vec::with_capacity((2 * width_segments * (height_segments - 1)) as usize);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    triangles.push(Triangle::new(a, b, d));
                }
                if iy != height_segments - 1 {
                    triangles.push(Triangle::new(b, c, d));
                }
            }
        }

        Self {
            radius,
            width_segments,
            height_segments,
            positions,
            normals,
            triangles,
        }
    }

    /// The sphere radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Azimuthal segment count
    #[inline]
    pub fn width_segments(&self) -> u32 {
        self.width_segments
    }

    /// Polar segment count
    #[inline]
    pub fn height_segments(&self) -> u32 {
        self.height_segments
    }
}

impl Shape3D for Sphere3D {
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
