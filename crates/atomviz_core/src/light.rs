//! Scene lighting
//!
//! Light kinds mirror a typical retained-mode renderer: ambient, directional,
//! point and spot. Intensities are plain multipliers on the light color.

use atomviz_math::Vec3;
use crate::Color;

/// A light source in the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform light from all directions
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// Parallel rays shining from `position` towards `target`
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
        target: Vec3,
    },
    /// Light radiating from a point
    ///
    /// `distance == 0` means unlimited range.
    Point {
        color: Color,
        intensity: f32,
        position: Vec3,
        distance: f32,
        decay: f32,
    },
    /// A cone of light from `position` towards `target`
    Spot {
        color: Color,
        intensity: f32,
        position: Vec3,
        target: Vec3,
        /// Half-angle of the cone in radians
        angle: f32,
        /// Fraction of the cone that fades out (0 = hard edge)
        penumbra: f32,
        distance: f32,
        decay: f32,
    },
}

impl Light {
    /// Ambient light with the given color and intensity
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    /// Directional light shining from `position` towards the origin
    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Self::Directional {
            color,
            intensity,
            position,
            target: Vec3::ZERO,
        }
    }

    /// Point light at `position`
    pub fn point(color: Color, intensity: f32, position: Vec3, distance: f32) -> Self {
        Self::Point {
            color,
            intensity,
            position,
            distance,
            decay: 2.0,
        }
    }

    /// Spot light at `position` aimed at the origin, 60 degree half-angle
    pub fn spot(color: Color, intensity: f32, position: Vec3) -> Self {
        Self::Spot {
            color,
            intensity,
            position,
            target: Vec3::ZERO,
            angle: std::f32::consts::FRAC_PI_3,
            penumbra: 0.0,
            distance: 0.0,
            decay: 2.0,
        }
    }

    /// Check if this is an ambient light
    pub fn is_ambient(&self) -> bool {
        matches!(self, Self::Ambient { .. })
    }

    /// Light color scaled by intensity
    pub fn radiance(&self) -> Color {
        match *self {
            Self::Ambient { color, intensity }
            | Self::Directional { color, intensity, .. }
            | Self::Point { color, intensity, .. }
            | Self::Spot { color, intensity, .. } => color.scaled(intensity),
        }
    }
}

/// Linear distance fog
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    /// Distance where fog starts
    pub near: f32,
    /// Distance where fog is fully opaque
    pub far: f32,
}

impl Fog {
    pub fn new(color: Color, near: f32, far: f32) -> Self {
        Self { color, near, far }
    }

    /// Fog blend factor at a view distance (0 = clear, 1 = fully fogged)
    pub fn factor(&self, distance: f32) -> f32 {
        if self.far <= self.near {
            return if distance >= self.far { 1.0 } else { 0.0 };
        }
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radiance_scales_color() {
        let light = Light::ambient(Color::WHITE, 0.5);
        assert_eq!(light.radiance(), Color::rgb(0.5, 0.5, 0.5));
        assert!(light.is_ambient());
    }

    #[test]
    fn test_spot_defaults() {
        match Light::spot(Color::WHITE, 1.0, Vec3::new(-20.0, 20.0, 10.0)) {
            Light::Spot { target, distance, penumbra, .. } => {
                assert_eq!(target, Vec3::ZERO);
                assert_eq!(distance, 0.0);
                assert_eq!(penumbra, 0.0);
            }
            other => panic!("expected spot light, got {:?}", other),
        }
    }

    #[test]
    fn test_fog_factor() {
        let fog = Fog::new(Color::from_hex(0x090b33), 5.0, 50.0);
        assert_eq!(fog.factor(0.0), 0.0);
        assert_eq!(fog.factor(5.0), 0.0);
        assert!((fog.factor(27.5) - 0.5).abs() < 1e-6);
        assert_eq!(fog.factor(80.0), 1.0);
    }
}
