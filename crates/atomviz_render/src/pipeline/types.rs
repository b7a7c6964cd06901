//! GPU-compatible data types for the mesh pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

use atomviz_core::{Light, Scene};
use atomviz_math::Vec3;

use crate::camera::PerspectiveCamera;

/// Maximum number of non-ambient lights the shader evaluates
pub const MAX_LIGHTS: usize = 4;

/// Light kinds as encoded in `GpuLight::position.w`
pub const LIGHT_NONE: f32 = 0.0;
pub const LIGHT_DIRECTIONAL: f32 = 1.0;
pub const LIGHT_POINT: f32 = 2.0;
pub const LIGHT_SPOT: f32 = 3.0;

/// A mesh vertex in model space
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Per-instance data: world matrix and linear RGBA color
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// One packed light
/// Layout: 64 bytes (must match mesh.wgsl Light)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct GpuLight {
    /// xyz = position, w = kind
    pub position: [f32; 4],
    /// rgb = linear color * intensity, w = range (0 = unlimited)
    pub color: [f32; 4],
    /// xyz = direction the light travels, w = decay exponent
    pub direction: [f32; 4],
    /// x = cos(outer angle), y = cos(inner angle)
    pub cone: [f32; 4],
}

impl GpuLight {
    /// Pack a light; ambient lights have no slot and yield `None`
    pub fn from_light(light: &Light) -> Option<Self> {
        match *light {
            Light::Ambient { .. } => None,
            Light::Directional { color, intensity, position, target } => Some(Self {
                position: position.extend(LIGHT_DIRECTIONAL).to_array(),
                color: radiance(color.to_linear(), intensity, 0.0),
                direction: direction(position, target).extend(0.0).to_array(),
                cone: [0.0; 4],
            }),
            Light::Point { color, intensity, position, distance, decay } => Some(Self {
                position: position.extend(LIGHT_POINT).to_array(),
                color: radiance(color.to_linear(), intensity, distance),
                direction: [0.0, 0.0, 0.0, decay],
                cone: [0.0; 4],
            }),
            Light::Spot {
                color,
                intensity,
                position,
                target,
                angle,
                penumbra,
                distance,
                decay,
            } => Some(Self {
                position: position.extend(LIGHT_SPOT).to_array(),
                color: radiance(color.to_linear(), intensity, distance),
                direction: direction(position, target).extend(decay).to_array(),
                cone: [
                    angle.cos(),
                    (angle * (1.0 - penumbra.clamp(0.0, 1.0))).cos(),
                    0.0,
                    0.0,
                ],
            }),
        }
    }
}

fn radiance(linear: [f32; 3], intensity: f32, range: f32) -> [f32; 4] {
    [linear[0] * intensity, linear[1] * intensity, linear[2] * intensity, range]
}

fn direction(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).try_normalize().unwrap_or(Vec3::NEG_Y)
}

/// Per-frame uniforms
/// Layout: 384 bytes (must match mesh.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = camera position
    pub camera_pos: [f32; 4],
    /// rgb = summed ambient radiance
    pub ambient: [f32; 4],
    /// rgb = linear fog color, w = 1 when fog is enabled
    pub fog_color: [f32; 4],
    /// x = near, y = far, z = light count
    pub fog_params: [f32; 4],
    pub lights: [GpuLight; MAX_LIGHTS],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            camera_pos: [0.0; 4],
            ambient: [0.0; 4],
            fog_color: [0.0; 4],
            fog_params: [0.0; 4],
            lights: [GpuLight::default(); MAX_LIGHTS],
        }
    }
}

impl SceneUniforms {
    /// Gather camera, ambient, fog and light data for one frame
    ///
    /// Lights past [`MAX_LIGHTS`] are ignored.
    pub fn from_scene(scene: &Scene, camera: &PerspectiveCamera) -> Self {
        let mut uniforms = Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            ..Self::default()
        };

        let mut count = 0;
        for light in scene.lights() {
            if let Light::Ambient { color, intensity } = *light {
                let [r, g, b] = color.to_linear();
                uniforms.ambient[0] += r * intensity;
                uniforms.ambient[1] += g * intensity;
                uniforms.ambient[2] += b * intensity;
            } else if let Some(gpu) = GpuLight::from_light(light) {
                if count < MAX_LIGHTS {
                    uniforms.lights[count] = gpu;
                    count += 1;
                } else {
                    log::debug!("Ignoring light beyond the first {}", MAX_LIGHTS);
                }
            }
        }
        uniforms.fog_params[2] = count as f32;

        if let Some(fog) = scene.fog() {
            uniforms.fog_color = fog.color.to_linear_rgba(1.0);
            uniforms.fog_params[0] = fog.near;
            uniforms.fog_params[1] = fog.far;
        }

        uniforms
    }

    pub fn light_count(&self) -> usize {
        self.fog_params[2] as usize
    }

    pub fn fog_enabled(&self) -> bool {
        self.fog_color[3] > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomviz_core::{Color, Fog};
    use std::mem::size_of;

    const EPSILON: f32 = 1e-5;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(40.0, 1.0, 0.1, 100.0)
            .with_position(Vec3::new(16.0, 10.0, 12.0))
            .looking_at(Vec3::ZERO)
    }

    #[test]
    fn test_sizes() {
        assert_eq!(size_of::<MeshVertex>(), 24);
        assert_eq!(size_of::<InstanceRaw>(), 80);
        assert_eq!(size_of::<GpuLight>(), 64);
        // 64 view_proj + 4 * 16 vec4s + 4 * 64 lights
        assert_eq!(size_of::<SceneUniforms>(), 384);
    }

    #[test]
    fn test_uniform_alignment() {
        // Uniform buffers need 16-byte multiples
        assert_eq!(size_of::<SceneUniforms>() % 16, 0);
        assert_eq!(size_of::<GpuLight>() % 16, 0);
    }

    #[test]
    fn test_ambient_not_packed_as_light() {
        assert!(GpuLight::from_light(&Light::ambient(Color::WHITE, 1.0)).is_none());
    }

    #[test]
    fn test_directional_points_from_position_to_target() {
        let light = Light::directional(Color::WHITE, 0.5, Vec3::new(0.0, 1.0, 0.0));
        let gpu = GpuLight::from_light(&light).unwrap();
        assert_eq!(gpu.position[3], LIGHT_DIRECTIONAL);
        assert!((gpu.direction[1] + 1.0).abs() < EPSILON);
        assert!((gpu.color[0] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_spot_cone() {
        let light = Light::spot(Color::WHITE, 1.0, Vec3::new(-20.0, 20.0, 10.0));
        let gpu = GpuLight::from_light(&light).unwrap();
        assert_eq!(gpu.position[3], LIGHT_SPOT);
        // No penumbra: inner and outer cones coincide
        assert!((gpu.cone[0] - 0.5).abs() < EPSILON);
        assert!((gpu.cone[1] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_from_scene() {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient(Color::WHITE, 0.3));
        scene.add_light(Light::ambient(Color::WHITE, 0.2));
        scene.add_light(Light::point(Color::RED, 5.0, Vec3::splat(50.0), 100.0));
        scene.set_fog(Some(Fog::new(Color::from_hex(0x090b33), 5.0, 50.0)));

        let uniforms = SceneUniforms::from_scene(&scene, &camera());
        assert!((uniforms.ambient[0] - 0.5).abs() < EPSILON);
        assert_eq!(uniforms.light_count(), 1);
        assert_eq!(uniforms.lights[0].position[3], LIGHT_POINT);
        assert_eq!(uniforms.lights[0].color[3], 100.0);
        assert!(uniforms.fog_enabled());
        assert_eq!(uniforms.fog_params[0], 5.0);
        assert_eq!(uniforms.fog_params[1], 50.0);
        assert_eq!(uniforms.camera_pos[0], 16.0);
    }

    #[test]
    fn test_light_overflow_is_capped() {
        let mut scene = Scene::new();
        for _ in 0..(MAX_LIGHTS + 2) {
            scene.add_light(Light::point(Color::WHITE, 1.0, Vec3::ONE, 0.0));
        }
        let uniforms = SceneUniforms::from_scene(&scene, &camera());
        assert_eq!(uniforms.light_count(), MAX_LIGHTS);
    }

    #[test]
    fn test_no_fog() {
        let uniforms = SceneUniforms::from_scene(&Scene::new(), &camera());
        assert!(!uniforms.fog_enabled());
        assert_eq!(uniforms.light_count(), 0);
    }
}
