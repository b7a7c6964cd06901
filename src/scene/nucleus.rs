//! Procedural nucleus generator
//!
//! Places spheres on the surface of a larger sphere, ring by ring from the
//! top pole down. Each pole gets a single sphere; every ring in between gets
//! `azimuth_divisions` spheres. Colors alternate along a ring and the
//! alternation also flips at the end of each ring, giving a checkerboard.

use std::f32::consts::{PI, TAU};

use atomviz_core::{Color, Material, Node, NodeKey, Scene, Sphere3D, Vec3};
use serde::{Deserialize, Serialize};

/// Name given to every nucleus sphere
pub const NUCLEUS_BALL_NAME: &str = "atom";
/// Tag given to every nucleus sphere
pub const NUCLEUS_TAG: &str = "nucleus";
/// Upper bound on either division count
pub const MAX_DIVISIONS: u32 = 256;

/// One sphere of the nucleus layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NucleusBall {
    pub position: Vec3,
    pub color: Color,
}

/// Error building a nucleus
#[derive(Debug, Clone, PartialEq)]
pub enum NucleusError {
    /// The nucleus radius is not a positive finite number
    InvalidRadius(f32),
    /// The sphere radius is not a positive finite number
    InvalidBallRadius(f32),
    /// The angular step is not a positive finite number
    InvalidStep(f32),
    /// A division count is zero
    ZeroDivisions,
    /// A division count exceeds [`MAX_DIVISIONS`]
    TooManyDivisions(u32),
    /// The parent node does not exist in the scene
    MissingParent,
}

impl std::fmt::Display for NucleusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NucleusError::InvalidRadius(r) => write!(f, "Invalid nucleus radius: {}", r),
            NucleusError::InvalidBallRadius(r) => write!(f, "Invalid nucleus ball radius: {}", r),
            NucleusError::InvalidStep(s) => write!(f, "Invalid angular step: {}", s),
            NucleusError::ZeroDivisions => write!(f, "Nucleus division counts must be at least 1"),
            NucleusError::TooManyDivisions(n) => {
                write!(f, "Nucleus division count {} exceeds {}", n, MAX_DIVISIONS)
            }
            NucleusError::MissingParent => write!(f, "Nucleus parent node not found"),
        }
    }
}

impl std::error::Error for NucleusError {}

/// Generator for the nucleus sphere cluster
///
/// Deserializes directly from the `[atom.nucleus]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NucleusGenerator {
    /// Radius of the sphere the balls sit on
    pub radius: f32,
    /// Radius of each ball
    pub ball_radius: f32,
    /// Balls per intermediate ring
    pub azimuth_divisions: u32,
    /// Polar steps from the top pole to the bottom pole
    pub polar_divisions: u32,
    /// Alternating ball colors, first one used first
    pub colors: [Color; 2],
    /// Ball tessellation (used for both width and height)
    pub segments: u32,
}

impl Default for NucleusGenerator {
    fn default() -> Self {
        Self {
            radius: 2.0,
            ball_radius: 0.9,
            azimuth_divisions: 8,
            polar_divisions: 4,
            colors: [Color::RED, Color::from_hex(0x2e30d1)],
            segments: 32,
        }
    }
}

impl NucleusGenerator {
    /// Generator with the given radius and defaults elsewhere
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Derive the division counts from a single angular step
    ///
    /// A step of 2π/8 gives 8 balls per ring and 4 polar steps.
    pub fn from_step(radius: f32, step: f32) -> Result<Self, NucleusError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(NucleusError::InvalidStep(step));
        }
        // Saturating casts land above the cap and fail validation
        let generator = Self {
            azimuth_divisions: (TAU / step).round() as u32,
            polar_divisions: (PI / step).round() as u32,
            ..Self::new(radius)
        };
        generator.validate()?;
        Ok(generator)
    }

    pub fn with_ball_radius(mut self, ball_radius: f32) -> Self {
        self.ball_radius = ball_radius;
        self
    }

    pub fn with_divisions(mut self, azimuth: u32, polar: u32) -> Self {
        self.azimuth_divisions = azimuth;
        self.polar_divisions = polar;
        self
    }

    pub fn with_colors(mut self, first: Color, second: Color) -> Self {
        self.colors = [first, second];
        self
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    pub fn validate(&self) -> Result<(), NucleusError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(NucleusError::InvalidRadius(self.radius));
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err(NucleusError::InvalidBallRadius(self.ball_radius));
        }
        if self.azimuth_divisions == 0 || self.polar_divisions == 0 {
            return Err(NucleusError::ZeroDivisions);
        }
        let largest = self.azimuth_divisions.max(self.polar_divisions);
        if largest > MAX_DIVISIONS {
            return Err(NucleusError::TooManyDivisions(largest));
        }
        Ok(())
    }

    /// Number of balls `layout` produces
    pub fn ball_count(&self) -> usize {
        2 + (self.polar_divisions as usize).saturating_sub(1) * self.azimuth_divisions as usize
    }

    /// Compute ball positions and colors without touching a scene
    pub fn layout(&self) -> Result<Vec<NucleusBall>, NucleusError> {
        self.validate()?;

        let polar_step = PI / self.polar_divisions as f32;
        let azimuth_step = TAU / self.azimuth_divisions as f32;
        let mut balls = Vec::with_capacity(self.ball_count());
        let mut use_first = true;

        // Integer steps so each pole is emitted exactly once
        for i in 0..=self.polar_divisions {
            let polar = i as f32 * polar_step;
            let y = self.radius * polar.cos();
            let color = |first: bool| if first { self.colors[0] } else { self.colors[1] };

            if i == 0 || i == self.polar_divisions {
                balls.push(NucleusBall {
                    position: Vec3::new(0.0, y, 0.0),
                    color: color(use_first),
                });
                continue;
            }

            let ring_radius = self.radius * polar.sin();
            for j in 0..self.azimuth_divisions {
                let azimuth = j as f32 * azimuth_step;
                balls.push(NucleusBall {
                    position: Vec3::new(ring_radius * azimuth.cos(), y, ring_radius * azimuth.sin()),
                    color: color(use_first),
                });
                use_first = !use_first;
            }
            use_first = !use_first;
        }

        Ok(balls)
    }

    /// Add one ball node per layout entry as children of `parent`
    ///
    /// All balls share a single sphere shape.
    pub fn build(&self, scene: &mut Scene, parent: NodeKey) -> Result<Vec<NodeKey>, NucleusError> {
        let balls = self.layout()?;
        if !scene.contains(parent) {
            return Err(NucleusError::MissingParent);
        }

        let shape = scene.add_shape(Sphere3D::new(self.ball_radius, self.segments, self.segments));
        let mut keys = Vec::with_capacity(balls.len());
        for ball in balls {
            let node = Node::mesh(shape, Material::lambert(ball.color))
                .with_name(NUCLEUS_BALL_NAME)
                .with_tag(NUCLEUS_TAG)
                .with_position(ball.position);
            let key = scene.add_child(parent, node).ok_or(NucleusError::MissingParent)?;
            keys.push(key);
        }

        log::info!("Nucleus built: {} balls on radius {}", keys.len(), self.radius);
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn blue() -> Color {
        Color::from_hex(0x2e30d1)
    }

    #[test]
    fn test_from_step_divisions() {
        let generator = NucleusGenerator::from_step(2.0, TAU / 8.0).unwrap();
        assert_eq!(generator.azimuth_divisions, 8);
        assert_eq!(generator.polar_divisions, 4);
        assert_eq!(generator, NucleusGenerator::default());
    }

    #[test]
    fn test_default_layout_count() {
        let balls = NucleusGenerator::default().layout().unwrap();
        assert_eq!(balls.len(), 26);
        assert_eq!(NucleusGenerator::default().ball_count(), 26);
    }

    #[test]
    fn test_seven_polar_divisions_give_fifty() {
        let generator = NucleusGenerator::default().with_divisions(8, 7);
        assert_eq!(generator.layout().unwrap().len(), 50);
    }

    #[test]
    fn test_poles_single_ball() {
        let balls = NucleusGenerator::default().layout().unwrap();
        let top = balls.first().unwrap();
        let bottom = balls.last().unwrap();
        assert!((top.position - Vec3::new(0.0, 2.0, 0.0)).length() < EPSILON);
        assert!((bottom.position - Vec3::new(0.0, -2.0, 0.0)).length() < EPSILON);
        let at_poles = balls
            .iter()
            .filter(|b| b.position.x.abs() < EPSILON && b.position.z.abs() < EPSILON)
            .count();
        assert_eq!(at_poles, 2);
    }

    #[test]
    fn test_rings_have_eight_balls_at_same_height() {
        let balls = NucleusGenerator::default().layout().unwrap();
        for ring in balls[1..25].chunks(8) {
            let y = ring[0].position.y;
            assert!(ring.iter().all(|b| (b.position.y - y).abs() < EPSILON));
        }
    }

    #[test]
    fn test_balls_on_sphere_surface() {
        for ball in NucleusGenerator::default().layout().unwrap() {
            assert!((ball.position.length() - 2.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_color_alternation() {
        let balls = NucleusGenerator::default().layout().unwrap();
        assert_eq!(balls[0].color, Color::RED);

        let rings: Vec<&[NucleusBall]> = balls[1..25].chunks(8).collect();
        for ring in &rings {
            for pair in ring.windows(2) {
                assert_ne!(pair[0].color, pair[1].color);
            }
        }
        assert_eq!(rings[0][0].color, Color::RED);
        assert_eq!(rings[1][0].color, blue());
        assert_eq!(rings[2][0].color, Color::RED);
        assert_eq!(balls[25].color, blue());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            NucleusGenerator::new(0.0).layout(),
            Err(NucleusError::InvalidRadius(0.0))
        );
        assert_eq!(
            NucleusGenerator::default().with_ball_radius(-1.0).layout(),
            Err(NucleusError::InvalidBallRadius(-1.0))
        );
        assert_eq!(
            NucleusGenerator::default().with_divisions(0, 4).layout(),
            Err(NucleusError::ZeroDivisions)
        );
        assert!(matches!(
            NucleusGenerator::from_step(2.0, 0.0),
            Err(NucleusError::InvalidStep(_))
        ));
        assert!(matches!(
            NucleusGenerator::from_step(2.0, f32::NAN),
            Err(NucleusError::InvalidStep(_))
        ));
    }

    #[test]
    fn test_division_cap() {
        assert_eq!(
            NucleusGenerator::default().with_divisions(8, u32::MAX).layout(),
            Err(NucleusError::TooManyDivisions(u32::MAX))
        );
        assert_eq!(
            NucleusGenerator::default().with_divisions(MAX_DIVISIONS + 1, 4).validate(),
            Err(NucleusError::TooManyDivisions(MAX_DIVISIONS + 1))
        );
        assert!(NucleusGenerator::default()
            .with_divisions(MAX_DIVISIONS, MAX_DIVISIONS)
            .validate()
            .is_ok());
        assert!(matches!(
            NucleusGenerator::from_step(2.0, 1e-30),
            Err(NucleusError::TooManyDivisions(_))
        ));
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let generator: NucleusGenerator =
            toml::from_str("polar_divisions = 7\ncolors = [\"white\", \"#000\"]\n").unwrap();
        assert_eq!(generator.polar_divisions, 7);
        assert_eq!(generator.azimuth_divisions, 8);
        assert_eq!(generator.colors, [Color::WHITE, Color::BLACK]);
        assert_eq!(generator.layout().unwrap().len(), 50);
    }

    #[test]
    fn test_single_polar_division_is_poles_only() {
        let balls = NucleusGenerator::default().with_divisions(8, 1).layout().unwrap();
        assert_eq!(balls.len(), 2);
    }

    #[test]
    fn test_build_adds_children_sharing_one_shape() {
        let mut scene = Scene::new();
        let group = scene.add_node(Node::group());
        let keys = NucleusGenerator::default().with_segments(8).build(&mut scene, group).unwrap();

        assert_eq!(keys.len(), 26);
        assert_eq!(scene.children(group).len(), 26);
        assert_eq!(scene.shape_count(), 1);
        assert_eq!(scene.iter_tagged(NUCLEUS_TAG).count(), 26);
        for key in keys {
            let node = scene.node(key).unwrap();
            assert_eq!(node.name.as_deref(), Some(NUCLEUS_BALL_NAME));
            assert_eq!(node.parent(), Some(group));
        }
    }
}
