//! Electrons orbiting the nucleus
//!
//! Each electron is a small sphere circling the origin in one coordinate
//! plane. The sphere node is parented to the nucleus group, so it also
//! follows the group's spin.

use atomviz_core::{Color, Material, Node, NodeKey, Scene, Sphere3D, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// The coordinate plane an electron orbits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitPlane {
    Xy,
    Xz,
    Yz,
}

impl OrbitPlane {
    /// One plane per electron, in spawn order
    pub const ALL: [OrbitPlane; 3] = [OrbitPlane::Xy, OrbitPlane::Xz, OrbitPlane::Yz];

    /// Place `current` on the orbit at `angle`
    ///
    /// Only the two in-plane coordinates are written; the third is kept.
    pub fn orbit_position(self, current: Vec3, radius: f32, angle: f32) -> Vec3 {
        let a = radius * angle.cos();
        let b = radius * angle.sin();
        match self {
            OrbitPlane::Xy => Vec3::new(a, b, current.z),
            OrbitPlane::Xz => Vec3::new(a, current.y, b),
            OrbitPlane::Yz => Vec3::new(current.x, a, b),
        }
    }

    /// The two in-plane coordinates of `position`
    pub fn plane_coords(self, position: Vec3) -> (f32, f32) {
        match self {
            OrbitPlane::Xy => (position.x, position.y),
            OrbitPlane::Xz => (position.x, position.z),
            OrbitPlane::Yz => (position.y, position.z),
        }
    }
}

/// Electron options; every field has a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectronConfig {
    /// Distance from the origin
    pub orbit_radius: f32,
    /// Radians advanced per frame
    pub speed: f32,
    /// Starting angle in radians; `None` picks one at random in [0, 2π)
    pub angle: Option<f32>,
    /// Sphere radius
    pub radius: f32,
    pub name: String,
    pub color: Color,
}

impl Default for ElectronConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 10.0,
            speed: 0.05,
            angle: None,
            radius: 0.2,
            name: "electron".to_string(),
            color: Color::WHITE,
        }
    }
}

impl ElectronConfig {
    /// Default electron with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self::default().with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_orbit_radius(mut self, orbit_radius: f32) -> Self {
        self.orbit_radius = orbit_radius;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Reject values that would produce a degenerate or invisible orbit
    pub fn validate(&self) -> Result<(), ElectronError> {
        check_positive("orbit_radius", self.orbit_radius)?;
        check_positive("radius", self.radius)?;
        check_finite("speed", self.speed)?;
        if let Some(angle) = self.angle {
            check_finite("angle", angle)?;
        }
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ElectronError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ElectronError::NonFinite { field, value })
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ElectronError> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ElectronError::NonPositive { field, value })
    }
}

/// Error building an electron
#[derive(Debug, Clone, PartialEq)]
pub enum ElectronError {
    /// A field is NaN or infinite
    NonFinite { field: &'static str, value: f32 },
    /// A radius is zero or negative
    NonPositive { field: &'static str, value: f32 },
    /// The parent node does not exist in the scene
    MissingParent,
}

impl std::fmt::Display for ElectronError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElectronError::NonFinite { field, value } => {
                write!(f, "Electron {} must be finite, got {}", field, value)
            }
            ElectronError::NonPositive { field, value } => {
                write!(f, "Electron {} must be positive, got {}", field, value)
            }
            ElectronError::MissingParent => write!(f, "Electron parent node not found"),
        }
    }
}

impl std::error::Error for ElectronError {}

/// A live electron: orbit parameters plus the node it drives
#[derive(Debug, Clone)]
pub struct Electron {
    pub orbit_radius: f32,
    pub speed: f32,
    /// Current angle in radians, grows without wrapping
    pub angle: f32,
    pub radius: f32,
    pub name: String,
    pub color: Color,
    pub node: NodeKey,
    pub plane: OrbitPlane,
}

impl Electron {
    /// Write the current orbit position to the node, then advance the angle
    pub fn advance(&mut self, scene: &mut Scene) {
        if let Some(node) = scene.node_mut(self.node) {
            let position = self.plane.orbit_position(node.position(), self.orbit_radius, self.angle);
            node.set_position(position);
        }
        self.angle += self.speed;
    }
}

/// Creates electron spheres in a scene
pub struct ElectronFactory {
    segments: u32,
}

impl Default for ElectronFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ElectronFactory {
    pub fn new() -> Self {
        Self { segments: 32 }
    }

    /// Builder: sphere tessellation (used for both width and height)
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Validate `config`, add its sphere under `parent` and return the electron
    ///
    /// A missing starting angle is drawn from `rng`.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        config: &ElectronConfig,
        plane: OrbitPlane,
        scene: &mut Scene,
        parent: NodeKey,
        rng: &mut R,
    ) -> Result<Electron, ElectronError> {
        config.validate()?;
        if !scene.contains(parent) {
            return Err(ElectronError::MissingParent);
        }

        let angle = config.angle.unwrap_or_else(|| rng.random_range(0.0..TAU));
        let shape = scene.add_shape(Sphere3D::new(config.radius, self.segments, self.segments));
        let position = plane.orbit_position(Vec3::ZERO, config.orbit_radius, angle);

        let node = Node::mesh(shape, Material::lambert(config.color))
            .with_name(config.name.clone())
            .with_tag("electron")
            .with_position(position);
        let node = scene.add_child(parent, node).ok_or(ElectronError::MissingParent)?;

        log::debug!("Spawned {} in {:?} plane at angle {:.3}", config.name, plane, angle);

        Ok(Electron {
            orbit_radius: config.orbit_radius,
            speed: config.speed,
            angle,
            radius: config.radius,
            name: config.name.clone(),
            color: config.color,
            node,
            plane,
        })
    }
}
